//! # VM Gateway Library
//!
//! Pass-through gateway for VM lifecycle operations (servers, volumes,
//! networks, subnets, ports, security groups, key pairs) on the OSPC and
//! Flex cloud environments. Every inbound request is forwarded to the
//! OpenStack-compatible cloud API with a bearer credential attached.
//!
//! Modules:
//! - `auth` — credential cache, per-key refresh coordination, identity call
//! - `config` — process settings and the per-environment endpoint catalog
//! - `gateway` — the forwarding resource routers
//! - `models` — enums and request payload models
//! - `server` — axum application assembly

pub mod auth;
pub mod config;
pub mod flavors;
pub mod gateway;
pub mod images;
pub mod models;
pub mod observability;
pub mod server;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub mod common;

mod expiration_and_cache;
mod identity_errors;
mod lookups;
mod settings_env;
mod single_flight;

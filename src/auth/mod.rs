pub mod credential;
pub mod error;
pub mod identity;
pub mod refresh;
pub mod service;
pub mod store;

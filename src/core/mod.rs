pub mod authenticator;
pub mod cli;
pub mod client;
pub mod common;
pub mod configuration;
pub mod core;
pub mod logger;
pub mod session;

//! HNAP client for the Motorola MB8611 cable modem.
//!
//! [`core::client::Client`] signs and sends HNAP calls,
//! [`core::authenticator::Authenticator`] runs the login handshake and
//! [`api`] holds the action names and typed request bodies.

pub mod api;
pub mod core;

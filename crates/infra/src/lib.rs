//! Infrastructure layer: configuration, persistence, outbound mail and the
//! application services that tie the domain crates together.

pub mod config;
pub mod mail;
pub mod services;
pub mod store;

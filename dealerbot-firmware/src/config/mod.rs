//! Configuration loading
//!
//! The machine configuration is embedded at build time and parsed by the
//! `no_std` parser in `dealerbot_core::config`.

pub mod loader;

pub use loader::load_config;

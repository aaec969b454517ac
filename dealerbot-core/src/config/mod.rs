//! Configuration types and the `machine.toml` parser
//!
//! Board-agnostic configuration structures, filled in by the firmware's
//! config loader from the embedded TOML.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;

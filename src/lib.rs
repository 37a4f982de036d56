// ABOUTME: Library root for stackshift - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod platform;
pub mod precondition;
pub mod publish;
pub mod types;
pub mod validate;

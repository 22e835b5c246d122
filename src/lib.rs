//! Bar console library exports for the binary and integration tests

pub mod client;
pub mod core;
pub mod screens;
pub mod tui;

#[cfg(test)]
pub mod test_support;

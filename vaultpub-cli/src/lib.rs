//! Command-line host for the vaultpub publish engine.
//!
//! The binary in `main.rs` parses arguments and dispatches into
//! [`commands`]; [`settings`] owns the persisted configuration blob,
//! including the sync cache the engine advances.

pub mod commands;
pub mod settings;

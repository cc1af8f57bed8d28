//! Shortcut Editor core library.
//!
//! This library manages keyboard-shortcut bindings for a large set of named
//! commands organized into hierarchical contexts (menus): recording raw key
//! events into canonical shortcut values, maintaining the default/override/
//! effective three-layer model per command, detecting per-context conflicts,
//! and persisting user overrides in a versioned settings file.
//!
//! Everything runs on one logical thread servicing discrete input events; a
//! multi-threaded host must serialize all calls into this core.

// Module declarations
pub mod capture;
pub mod catalog;
pub mod cli;
pub mod conflict;
pub mod constants;
pub mod diagnostics;
pub mod export;
pub mod filter;
pub mod models;
pub mod registry;
pub mod store;
pub mod timer;

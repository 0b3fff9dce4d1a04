//! Shared test utilities for the confstore workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`dir`] — [`ConfigDir`](dir::ConfigDir), a scratch directory for config files

pub mod dir;

pub use dir::ConfigDir;

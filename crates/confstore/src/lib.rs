//! Hierarchical file-backed JSON configuration store
//!
//! - [`ConfigStore`] owns a JSON object and its file `<directory>/<name>.json`.
//!   Mutations stay in memory until saved; [`ConfigStore::sync`] merges the
//!   file back in, letting disk win on shared keys.
//! - [`Subconfiguration`] is a scoped view with its own document that borrows
//!   its parent, so any view can reach the root store through
//!   [`Configurable::as_configuration`].
//! - [`ConfigRead`] is the query surface both share: absent keys read as
//!   zero values, mismatched kinds are [`Error::TypeMismatch`].
//!
//! # Architecture
//!
//! ```text
//!     Subconfiguration --borrows--> Subconfiguration --borrows--> ConfigStore
//!                                                                     |
//!                                                               confstore-fs
//!                                                                     |
//!                                                                  <name>.json
//! ```
//!
//! # Logging
//!
//! Store activity is reported through `tracing`. Applications that do not
//! install their own subscriber can call [`logging::init`] once at startup,
//! or [`logging::init_with_directive`] to pick the default verbosity.

pub mod configurable;
pub mod entry;
pub mod error;
pub mod logging;
pub mod read;
pub mod store;
pub mod view;

pub use configurable::Configurable;
pub use entry::ConfigEntry;
pub use error::{Error, Result};
pub use read::ConfigRead;
pub use store::{ConfigStore, FILE_EXTENSION, StoreOptions};
pub use view::Subconfiguration;

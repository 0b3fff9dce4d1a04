//! Filesystem primitives for confstore
//!
//! Provides normalized path handling and whole-file text I/O. This is the
//! only layer that touches the disk; everything above it works on paths and
//! strings.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use io::WriteOptions;
pub use path::NormalizedPath;

//! Capability shared by stores and views

use std::fmt;

use crate::{ConfigStore, Subconfiguration};

/// Anything that can hand out its persistable root and its local scope.
///
/// A holder of `&dyn Configurable` can always reach the [`ConfigStore`] that
/// owns the file, however deeply it is nested, and can ask whether it is
/// itself a scoped [`Subconfiguration`].
pub trait Configurable: fmt::Debug {
    /// The root store at the end of the parent chain.
    fn as_configuration(&self) -> &ConfigStore;

    /// This value as a view, or `None` for a root store.
    fn as_subconfiguration(&self) -> Option<&Subconfiguration<'_>>;
}

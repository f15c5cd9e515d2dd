use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::info::NamedField;

/// The default recursion depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

// -----------------------------------------------------------------------------
// NullHandling

/// How absent values are written into object nodes.
///
/// A value is absent when a field holds an empty optional, or when a
/// back-reference to an open wrapper is omitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullHandling {
    /// Leave the key out entirely (the default).
    #[default]
    Omit,
    /// Write an explicit `Null` node.
    Include,
}

// -----------------------------------------------------------------------------
// Config

/// Immutable settings captured at engine construction.
///
/// Consulted by both converters, never mutated mid-operation. Built through
/// [`EngineBuilder`](crate::EngineBuilder).
#[derive(Clone, Default)]
pub struct Config {
    pub(crate) null_handling: NullHandling,
    pub(crate) rename: Option<Arc<dyn Fn(&str) -> String + Send + Sync>>,
    pub(crate) exclude: Option<Arc<dyn Fn(&NamedField) -> bool + Send + Sync>>,
    pub(crate) max_depth: Option<usize>,
}

impl Config {
    /// How absent values are written.
    #[inline]
    pub fn null_handling(&self) -> NullHandling {
        self.null_handling
    }

    /// The recursion depth limit.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// The document key for a field, after the naming policy.
    pub(crate) fn key_for(&self, field: &NamedField) -> Cow<'static, str> {
        match &self.rename {
            None => Cow::Borrowed(field.name()),
            Some(rename) => Cow::Owned(rename(field.name())),
        }
    }

    /// Whether a field is excluded from conversion, both directions.
    pub(crate) fn is_excluded(&self, field: &NamedField) -> bool {
        match &self.exclude {
            None => false,
            Some(exclude) => exclude(field),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("null_handling", &self.null_handling)
            .field("max_depth", &self.max_depth())
            .field("rename", &self.rename.is_some())
            .field("exclude", &self.exclude.is_some())
            .finish()
    }
}

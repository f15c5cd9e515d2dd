//! Kind traits and kind-cast enums: the type-erased operations the generic
//! converter is built from.

mod list_ops;
mod map_ops;
mod optional_ops;
mod struct_ops;
mod wrapper_ops;

pub use list_ops::{List, ListItemIter};
pub use map_ops::Map;
pub use optional_ops::Optional;
pub use struct_ops::{Struct, StructFieldIter};
pub use wrapper_ops::Wrapper;

use crate::Reflect;
use crate::info::ReflectKind;

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of the kind-casts of a reflected value.
///
/// Obtained from [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Wrapper(&'a dyn Wrapper),
    Opaque(&'a dyn Reflect),
}

impl ReflectRef<'_> {
    /// The kind of the cast value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Wrapper(_) => ReflectKind::Wrapper,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the struct cast, if the value is a struct.
    pub fn as_struct(&self) -> Option<&dyn Struct> {
        match self {
            Self::Struct(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the list cast, if the value is a list.
    pub fn as_list(&self) -> Option<&dyn List> {
        match self {
            Self::List(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the map cast, if the value is a map.
    pub fn as_map(&self) -> Option<&dyn Map> {
        match self {
            Self::Map(value) => Some(*value),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of the kind-casts of a reflected value.
///
/// Obtained from [`Reflect::reflect_mut`]. There is no mutable wrapper
/// cast: wrapper contents are rebuilt through the registry, not mutated in
/// place, so wrapper types answer [`ReflectMut::Opaque`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectMut<'_> {
    /// The kind of the cast value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

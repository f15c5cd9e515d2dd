use std::any::{Any, TypeId, type_name};
use std::fmt;

use crate::info::{ListInfo, MapInfo, OpaqueInfo, OptionalInfo, StructInfo, WrapperInfo};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to a reflection trait ([`Struct`], [`List`],
/// [`Map`], [`Optional`], [`Wrapper`]) or to an opaque leaf converted
/// through a registered capability or user adapter.
///
/// [`Struct`]: crate::ops::Struct
/// [`List`]: crate::ops::List
/// [`Map`]: crate::ops::Map
/// [`Optional`]: crate::ops::Optional
/// [`Wrapper`]: crate::ops::Wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Map,
    Optional,
    Wrapper,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Optional => f.pad("Optional"),
            Self::Wrapper => f.pad("Wrapper"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// Type

/// A type identity: [`TypeId`] plus the full type path.
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Creates the identity of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for a reflected type.
///
/// Obtained statically via [`Typed::type_info`], dynamically via
/// [`Reflect::reflect_type_info`], or from the registry via
/// [`AdapterRegistry::get_type_info`].
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`Reflect::reflect_type_info`]: crate::Reflect::reflect_type_info
/// [`AdapterRegistry::get_type_info`]: crate::registry::AdapterRegistry::get_type_info
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Wrapper(WrapperInfo),
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    /// The kind of the described type.
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

    /// The [`Type`] identity of the described type.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Wrapper(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// The [`TypeId`] of the described type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    /// The full path of the described type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the struct info, if the described type is a struct.
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            Self::Struct(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the list info, if the described type is a list.
    pub const fn as_list(&self) -> Option<&ListInfo> {
        match self {
            Self::List(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the map info, if the described type is a map.
    pub const fn as_map(&self) -> Option<&MapInfo> {
        match self {
            Self::Map(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the optional info, if the described type is an optional.
    pub const fn as_optional(&self) -> Option<&OptionalInfo> {
        match self {
            Self::Optional(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the wrapper info, if the described type is a wrapper.
    pub const fn as_wrapper(&self) -> Option<&WrapperInfo> {
        match self {
            Self::Wrapper(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the opaque info, if the described type is opaque.
    pub const fn as_opaque(&self) -> Option<&OpaqueInfo> {
        match self {
            Self::Opaque(info) => Some(info),
            _ => None,
        }
    }
}

use std::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// MapInfo

/// Compile-time information for a string-keyed map type.
///
/// Document objects are string-keyed, so only string-keyed maps take part
/// in generic conversion; maps with other key types need a user adapter.
#[derive(Clone, Copy, Debug)]
pub struct MapInfo {
    ty: Type,
    value_ty_id: TypeId,
    // Created on first access; the function pointer delays it.
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    /// Creates a new [`MapInfo`] for map type `TMap` with values of `TValue`.
    pub fn new<TMap: Any, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            value_ty_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
        }
    }

    /// Returns the [`Type`] identity of the map type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full path of the map type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the [`TypeId`] of the value type.
    #[inline]
    pub const fn value_ty_id(&self) -> TypeId {
        self.value_ty_id
    }

    /// Returns the [`TypeInfo`] of the value type.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}

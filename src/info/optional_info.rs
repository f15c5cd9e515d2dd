use std::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// OptionalInfo

/// Compile-time information for an optional type.
///
/// Optionals are the engine's absent-value sentinel: a `None` field follows
/// the configured null handling, and an absent input key leaves the default
/// (`None`) in place.
#[derive(Clone, Copy, Debug)]
pub struct OptionalInfo {
    ty: Type,
    value_ty_id: TypeId,
    // Created on first access; the function pointer delays it.
    value_info: fn() -> &'static TypeInfo,
}

impl OptionalInfo {
    /// Creates a new [`OptionalInfo`] for `TOptional` holding `TValue`.
    pub fn new<TOptional: Any, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TOptional>(),
            value_ty_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
        }
    }

    /// Returns the [`Type`] identity of the optional type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full path of the optional type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the [`TypeId`] of the contained value type.
    #[inline]
    pub const fn value_ty_id(&self) -> TypeId {
        self.value_ty_id
    }

    /// Returns the [`TypeInfo`] of the contained value type.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}

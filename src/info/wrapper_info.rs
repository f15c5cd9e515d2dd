use std::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// WrapperInfo

/// Compile-time information for a wrapper type.
///
/// A wrapper is an indirection with an observable address and scoped access
/// to exactly one referenced value: `Box`, `Rc`, `Arc`, `Cell`, `RefCell`,
/// `Mutex`. In safe Rust every aliased or cyclic edge of an object graph
/// passes through such a wrapper, which is why wrapper identities are what
/// the serializer's visitation stack tracks.
#[derive(Clone, Copy, Debug)]
pub struct WrapperInfo {
    ty: Type,
    value_ty_id: TypeId,
    // Created on first access; the function pointer delays it.
    value_info: fn() -> &'static TypeInfo,
}

impl WrapperInfo {
    /// Creates a new [`WrapperInfo`] for `TWrapper` referencing `TValue`.
    pub fn new<TWrapper: Any, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TWrapper>(),
            value_ty_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
        }
    }

    /// Returns the [`Type`] identity of the wrapper type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full path of the wrapper type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the [`TypeId`] of the referenced value type.
    #[inline]
    pub const fn value_ty_id(&self) -> TypeId {
        self.value_ty_id
    }

    /// Returns the [`TypeInfo`] of the referenced value type.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}

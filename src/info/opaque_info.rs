use std::any::Any;

use crate::info::Type;

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Compile-time information for an opaque type.
///
/// Opaque types have no reflected structure; the engine converts them only
/// through registered capabilities (scalars) or user adapters.
#[derive(Clone, Copy, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    /// Creates a new [`OpaqueInfo`] for `T`.
    pub fn new<T: Any>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    /// Returns the [`Type`] identity.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }
}

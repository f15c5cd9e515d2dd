use std::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// ListInfo

/// Compile-time information for a homogeneous sequence type.
#[derive(Clone, Copy, Debug)]
pub struct ListInfo {
    ty: Type,
    item_ty_id: TypeId,
    // Created on first access; the function pointer delays it.
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    /// Creates a new [`ListInfo`] for list type `TList` with items of `TItem`.
    pub fn new<TList: Any, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_ty_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
        }
    }

    /// Returns the [`Type`] identity of the list type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full path of the list type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the [`TypeId`] of the item type.
    #[inline]
    pub const fn item_ty_id(&self) -> TypeId {
        self.item_ty_id
    }

    /// Returns the [`TypeInfo`] of the item type.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

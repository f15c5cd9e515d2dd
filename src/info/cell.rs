//! Containers for static storage of type information.
//!
//! These back [`Typed`](crate::info::Typed) implementations. Non-generic
//! types use [`NonGenericTypeInfoCell`], a thin `OnceLock`. Generic types
//! share one `static` per definition, so [`GenericTypeInfoCell`] keys the
//! stored info by the concrete [`TypeId`].

use std::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use hashbrown::HashMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage for the [`TypeInfo`] of one non-generic type.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it on first access.
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Static storage for the [`TypeInfo`] of each instantiation of one generic
/// type definition.
///
/// Entries are leaked once per instantiation, which is equivalent to one
/// more `static` per concrete type.
pub struct GenericTypeInfoCell(OnceLock<RwLock<HashMap<TypeId, &'static TypeInfo>>>);

impl GenericTypeInfoCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the info stored for `T`, initializing it on first access.
    pub fn get_or_insert<T: Any>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        let mapping = self.0.get_or_init(Default::default);
        let type_id = TypeId::of::<T>();

        if let Some(info) = mapping
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return info;
        }

        let mut mapping = mapping.write().unwrap_or_else(PoisonError::into_inner);
        *mapping
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(f())))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::GenericTypeInfoCell;
    use crate::info::{OpaqueInfo, TypeInfo};

    #[test]
    fn generic_cell_keys_by_type() {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();

        let a = CELL.get_or_insert::<u8>(|| TypeInfo::Opaque(OpaqueInfo::new::<u8>()));
        let b = CELL.get_or_insert::<u16>(|| TypeInfo::Opaque(OpaqueInfo::new::<u16>()));
        let a_again = CELL.get_or_insert::<u8>(|| unreachable!());

        assert_eq!(a.type_path(), "u8");
        assert_eq!(b.type_path(), "u16");
        assert!(std::ptr::eq(a, a_again));
    }
}

use std::any::Any;

use hashbrown::HashMap;

use crate::info::{NamedField, Type};

// -----------------------------------------------------------------------------
// StructInfo

/// Compile-time information for a named-field struct.
///
/// Field order is the declaration order of the type.
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    indices: HashMap<&'static str, usize>,
}

impl StructInfo {
    /// Creates a new [`StructInfo`] for `T` from its field descriptors.
    pub fn new<T: Any>(fields: &[NamedField]) -> Self {
        let indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            indices,
        }
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

    /// Returns the [`NamedField`] with the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.indices.get(name).map(|&index| &self.fields[index])
    }

    /// Returns the [`NamedField`] at the given index, if present.
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the index of the field with the given `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns an iterator over the fields in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }
}

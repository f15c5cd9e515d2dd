use std::any::type_name;

use crate::Reflect;
use crate::document::Document;
use crate::error::Error;
use crate::registry::FromType;

// -----------------------------------------------------------------------------
// TypeTraitToDocument

/// Capability: convert an opaque value into a [`Document`] node.
///
/// This is how the built-in scalar adapters serialize; an opaque type
/// without this capability (and without a user adapter) fails with
/// [`Error::NotSerializable`].
#[derive(Clone)]
pub struct TypeTraitToDocument {
    func: fn(&dyn Reflect) -> Result<Document, Error>,
}

impl TypeTraitToDocument {
    /// Creates the capability from a conversion function.
    #[inline]
    pub const fn new(func: fn(&dyn Reflect) -> Result<Document, Error>) -> Self {
        Self { func }
    }

    /// Converts `value` into a node.
    #[inline]
    pub fn to_document(&self, value: &dyn Reflect) -> Result<Document, Error> {
        (self.func)(value)
    }
}

impl<T: Reflect + Clone + Into<Document>> FromType<T> for TypeTraitToDocument {
    fn from_type() -> Self {
        Self {
            func: |value| match value.downcast_ref::<T>() {
                Some(concrete) => Ok(concrete.clone().into()),
                None => Err(Error::custom(format!(
                    "expected a `{}`, received `{}`",
                    type_name::<T>(),
                    value.reflect_type_path(),
                ))),
            },
        }
    }
}

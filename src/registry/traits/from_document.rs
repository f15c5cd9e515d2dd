use crate::Reflect;
use crate::document::Document;
use crate::engine::DeserializeContext;
use crate::error::Error;

// -----------------------------------------------------------------------------
// TypeTraitFromDocument

/// Capability: build an opaque value from a [`Document`] node.
///
/// This is how the built-in scalar adapters deserialize; an opaque type
/// without this capability (and without a user adapter) fails with
/// [`Error::NotDeserializable`].
///
/// The context parameter provides the current document path for error
/// reporting via [`DeserializeContext::type_mismatch`].
#[derive(Clone)]
pub struct TypeTraitFromDocument {
    func: fn(&Document, &mut DeserializeContext) -> Result<Box<dyn Reflect>, Error>,
}

impl TypeTraitFromDocument {
    /// Creates the capability from a conversion function.
    #[inline]
    pub const fn new(
        func: fn(&Document, &mut DeserializeContext) -> Result<Box<dyn Reflect>, Error>,
    ) -> Self {
        Self { func }
    }

    /// Builds a value from `document`.
    #[inline]
    pub fn from_document(
        &self,
        document: &Document,
        context: &mut DeserializeContext,
    ) -> Result<Box<dyn Reflect>, Error> {
        (self.func)(document, context)
    }
}

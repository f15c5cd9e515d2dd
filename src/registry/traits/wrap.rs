use crate::Reflect;

// -----------------------------------------------------------------------------
// TypeTraitWrap

/// Capability: rebuild a wrapper around a deserialized inner value.
///
/// Deserialization of a [`Wrapper`](crate::ops::Wrapper) type converts the
/// referenced value first, then hands it to this capability — `Rc::new`,
/// `RefCell::new`, and so on, behind a function pointer.
#[derive(Clone)]
pub struct TypeTraitWrap {
    func: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl TypeTraitWrap {
    /// Creates the capability from a wrapping function.
    #[inline]
    pub const fn new(
        func: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
    ) -> Self {
        Self { func }
    }

    /// Wraps `inner`, handing it back unchanged on type mismatch.
    #[inline]
    pub fn wrap(&self, inner: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.func)(inner)
    }
}

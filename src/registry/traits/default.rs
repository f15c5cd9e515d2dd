use crate::Reflect;
use crate::registry::FromType;

// -----------------------------------------------------------------------------
// TypeTraitDefault

/// Capability: create a fresh instance of the type.
///
/// Deserialization of structs and containers starts from this instance and
/// fills it in, so absent input keys keep the default values and no user
/// construction logic runs during conversion.
///
/// # Examples
///
/// ```
/// use docbind::registry::{FromType, TypeTraitDefault};
///
/// let capability = <TypeTraitDefault as FromType<u32>>::from_type();
/// let value = capability.default_value();
/// assert_eq!(value.take::<u32>().unwrap(), 0);
/// ```
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    /// Creates a boxed default instance.
    #[inline]
    pub fn default_value(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Reflect + Default> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::new(T::default()),
        }
    }
}

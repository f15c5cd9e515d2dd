use std::any::TypeId;
use std::fmt;

use hashbrown::HashMap;

use crate::info::{TypeInfo, Typed};
use crate::registry::{AdapterRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime metadata for one registered type: its [`TypeInfo`] plus a table
/// of [capabilities](crate::registry::TypeTrait).
///
/// Usually generated through [`Describe`], which
/// [`reflect_struct!`](crate::reflect_struct) and the built-in
/// implementations provide.
///
/// # Examples
///
/// ```
/// use docbind::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait(<TypeTraitDefault as FromType<String>>::from_type());
///
/// let capability = meta.get_trait::<TypeTraitDefault>().unwrap();
/// assert_eq!(capability.default_value().take::<String>().unwrap(), "");
/// ```
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    trait_table: HashMap<TypeId, Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates an empty [`TypeMeta`] for `T`.
    pub fn of<T: Typed>() -> Self {
        Self {
            type_info: T::type_info(),
            trait_table: HashMap::new(),
        }
    }

    /// Returns the [`TypeInfo`].
    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_info.ty_id()
    }

    /// Returns the full path of the described type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_info.type_path()
    }

    /// Inserts a capability, replacing any previous one of the same type.
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, capability: T) {
        self.trait_table
            .insert(TypeId::of::<T>(), Box::new(capability));
    }

    /// Returns the capability of type `T`, if present.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|capability| capability.downcast_ref())
    }

    /// Whether a capability of type `T` is present.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of capabilities.
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = HashMap::with_capacity(self.trait_table.len());
        for (id, capability) in &self.trait_table {
            trait_table.insert(*id, (**capability).clone_type_trait());
        }
        Self {
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("traits", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Describe

/// A type that can generate its own [`TypeMeta`] for registration into the
/// [`AdapterRegistry`].
///
/// Implemented by [`reflect_struct!`](crate::reflect_struct) and by the
/// built-in implementations. `register_dependencies` recursively registers
/// the types a registration relies on — for structs, every field type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot describe itself for registration",
    note = "define the type through `docbind::reflect_struct!` to implement `Describe`"
)]
pub trait Describe: Typed {
    /// Returns the default [`TypeMeta`] for this type.
    fn type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    ///
    /// Implementations do not need to register `Self`.
    fn register_dependencies(_registry: &mut AdapterRegistry) {}
}

use std::any::{Any, TypeId};

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// Information for one named struct field.
///
/// The field's own [`TypeInfo`] is reached through a function pointer and
/// only created on first access; this keeps mutually recursive struct
/// definitions well-founded.
///
/// # Examples
///
/// ```
/// use docbind::info::Typed;
///
/// docbind::reflect_struct! {
///     #[derive(Default)]
///     struct Probe {
///         mass: f64,
///     }
/// }
///
/// let info = Probe::type_info().as_struct().unwrap();
/// let field = info.field_at(0).unwrap();
/// assert_eq!(field.name(), "mass");
/// assert!(field.type_is::<f64>());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; the function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the field's declared type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches the field's declared type.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the full path of the field's declared type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_info().type_path()
    }
}

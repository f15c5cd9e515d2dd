use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by [`reflect_struct!`](crate::reflect_struct) and by the
/// built-in implementations in this crate, allowing access to type
/// information without an instance of the type.
///
/// # Manual implementation
///
/// Non-generic types store their [`TypeInfo`] in a
/// [`NonGenericTypeInfoCell`](crate::info::NonGenericTypeInfoCell):
///
/// ```
/// use docbind::info::{NamedField, NonGenericTypeInfoCell, StructInfo, TypeInfo, Typed};
///
/// struct Sensor {
///     gain: f64,
/// }
///
/// impl Typed for Sensor {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(&[
///                 NamedField::new::<f64>("gain"),
///             ]))
///         })
///     }
/// }
///
/// assert_eq!(Sensor::type_info().as_struct().unwrap().field_len(), 1);
/// ```
///
/// Generic types share one `static` per definition, so they use a
/// [`GenericTypeInfoCell`](crate::info::GenericTypeInfoCell) keyed by the
/// concrete [`TypeId`](std::any::TypeId) instead.
pub trait Typed: 'static {
    /// Returns the compile-time [`TypeInfo`] of this type.
    fn type_info() -> &'static TypeInfo;
}

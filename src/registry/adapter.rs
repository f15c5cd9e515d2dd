use std::sync::Arc;

use crate::Reflect;
use crate::document::Document;
use crate::engine::{DeserializeContext, SerializeContext};
use crate::error::Error;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Adapter

/// A user-supplied converter for one exact type.
///
/// Registered adapters take priority over the generic field converter for
/// the type they are registered under — and only that type; adapters are
/// never inherited across type boundaries. Both directions must be
/// implemented.
///
/// Adapters may delegate nested values back into the engine through the
/// context parameters ([`SerializeContext::serialize`],
/// [`DeserializeContext::deserialize_as`]); those recursive calls run under
/// the same visitation and depth accounting as everything else. Any error
/// an adapter returns is propagated to the top-level caller unchanged.
///
/// # Examples
///
/// ```
/// use docbind::registry::Adapter;
/// use docbind::engine::{DeserializeContext, SerializeContext};
/// use docbind::{Document, Engine, Error, Reflect};
///
/// docbind::reflect_struct! {
///     #[derive(Default, Debug, PartialEq)]
///     pub struct Celsius {
///         pub degrees: f64,
///     }
/// }
///
/// /// Serializes `Celsius` as a bare number instead of an object.
/// struct CelsiusAdapter;
///
/// impl Adapter for CelsiusAdapter {
///     fn serialize(
///         &self,
///         value: &dyn Reflect,
///         _context: &mut SerializeContext,
///     ) -> Result<Document, Error> {
///         let celsius = value
///             .downcast_ref::<Celsius>()
///             .ok_or_else(|| Error::custom("adapter registered for the wrong type"))?;
///         Ok(Document::from(celsius.degrees))
///     }
///
///     fn deserialize(
///         &self,
///         document: &Document,
///         context: &mut DeserializeContext,
///     ) -> Result<Box<dyn Reflect>, Error> {
///         let degrees = document
///             .as_f64()
///             .ok_or_else(|| context.type_mismatch("number", document))?;
///         Ok(Box::new(Celsius { degrees }))
///     }
/// }
///
/// let engine = Engine::builder()
///     .register::<Celsius>()
///     .adapter::<Celsius>(CelsiusAdapter)
///     .build();
///
/// let document = engine.serialize(&Celsius { degrees: 21.5 }).unwrap();
/// assert_eq!(document, Document::from(21.5));
///
/// let back: Celsius = engine.deserialize(&document).unwrap();
/// assert_eq!(back, Celsius { degrees: 21.5 });
/// ```
pub trait Adapter: Send + Sync {
    /// Converts `value` into a document node.
    fn serialize(
        &self,
        value: &dyn Reflect,
        context: &mut SerializeContext,
    ) -> Result<Document, Error>;

    /// Builds a value of the registered type from `document`.
    fn deserialize(
        &self,
        document: &Document,
        context: &mut DeserializeContext,
    ) -> Result<Box<dyn Reflect>, Error>;
}

// -----------------------------------------------------------------------------
// AdapterFactory

/// Creates adapters for whole families of types.
///
/// Factories are consulted during resolution after exact adapters and
/// before the generic converter, in last-registered-first order. A factory
/// sees the [`TypeInfo`] of the type being resolved and answers `None` to
/// pass.
pub trait AdapterFactory: Send + Sync {
    /// Returns an adapter for the described type, or `None` to pass.
    fn create(&self, info: &'static TypeInfo) -> Option<Arc<dyn Adapter>>;
}

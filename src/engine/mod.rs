//! The engine: construction-time configuration and the per-call
//! conversion contexts.

use std::any::TypeId;

use crate::Reflect;
use crate::document::Document;
use crate::error::Error;
use crate::info::NamedField;
use crate::registry::{Adapter, AdapterFactory, AdapterRegistry, Describe};

mod config;
mod de;
mod path;
mod ser;

pub use config::{Config, DEFAULT_MAX_DEPTH, NullHandling};
pub use de::DeserializeContext;
pub use ser::SerializeContext;

// -----------------------------------------------------------------------------
// Engine

/// The serialization engine: a frozen registry plus configuration.
///
/// Built once through [`Engine::builder`], then shared freely — all
/// conversion state lives in per-call contexts, so any number of calls may
/// run concurrently against one engine.
///
/// # Examples
///
/// ```
/// use docbind::Engine;
///
/// docbind::reflect_struct! {
///     #[derive(Default, Debug, PartialEq)]
///     pub struct Part {
///         pub id: u64,
///         pub name: String,
///     }
/// }
///
/// let engine = Engine::builder().register::<Part>().build();
///
/// let part = Part { id: 7, name: "bolt".into() };
/// let document = engine.serialize(&part).unwrap();
/// let back: Part = engine.deserialize(&document).unwrap();
/// assert_eq!(back, part);
/// ```
pub struct Engine {
    registry: AdapterRegistry,
    config: Config,
}

impl Default for Engine {
    /// An engine with only the built-in scalar registrations.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Engine {
    /// Starts building an engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// The frozen registry.
    #[inline]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// The engine configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Converts `value` into a document tree.
    ///
    /// Fails on an irreducible repeated reference
    /// ([`Error::CircularReference`]) or when recursion exceeds the depth
    /// limit ([`Error::DepthLimit`]).
    pub fn serialize<T: Reflect>(&self, value: &T) -> Result<Document, Error> {
        self.serialize_dyn(value.as_reflect())
    }

    /// Type-erased form of [`serialize`](Engine::serialize).
    pub fn serialize_dyn(&self, value: &dyn Reflect) -> Result<Document, Error> {
        SerializeContext::new(&self.registry, &self.config).run(value)
    }

    /// Reconstructs a `T` from a document tree.
    ///
    /// Fails with [`Error::TypeMismatch`] when the tree shape is
    /// incompatible with the target type.
    pub fn deserialize<T: Reflect>(&self, document: &Document) -> Result<T, Error> {
        DeserializeContext::new(&self.registry, &self.config).deserialize_as(document)
    }

    /// Type-erased form of [`deserialize`](Engine::deserialize).
    pub fn deserialize_dyn(
        &self,
        document: &Document,
        type_id: TypeId,
    ) -> Result<Box<dyn Reflect>, Error> {
        DeserializeContext::new(&self.registry, &self.config).deserialize(document, type_id)
    }
}

// -----------------------------------------------------------------------------
// EngineBuilder

/// Configures and builds an [`Engine`].
///
/// All registration happens here; the built engine is immutable. This is
/// the freeze-after-setup contract: finish every `register`/`adapter`
/// call before the first conversion, and no locking is needed afterwards.
pub struct EngineBuilder {
    registry: AdapterRegistry,
    config: Config,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Starts from the built-in scalar registrations.
    pub fn new() -> Self {
        Self {
            registry: AdapterRegistry::new(),
            config: Config::default(),
        }
    }

    /// Registers `T` and its dependencies.
    pub fn register<T: Describe>(mut self) -> Self {
        self.registry.register::<T>();
        self
    }

    /// Registers every type submitted through
    /// [`reflect_struct!`](crate::reflect_struct) across the binary.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(mut self) -> Self {
        self.registry.auto_register();
        self
    }

    /// Installs a user adapter for the exact type `T`.
    ///
    /// The last adapter registered for a type wins.
    pub fn adapter<T: Reflect>(mut self, adapter: impl Adapter + 'static) -> Self {
        self.registry.register_adapter::<T>(adapter);
        self
    }

    /// Appends an adapter factory, consulted newest-first.
    pub fn adapter_factory(mut self, factory: impl AdapterFactory + 'static) -> Self {
        self.registry.register_factory(factory);
        self
    }

    /// Sets how absent values are written. Defaults to
    /// [`NullHandling::Omit`].
    pub fn null_handling(mut self, null_handling: NullHandling) -> Self {
        self.config.null_handling = null_handling;
        self
    }

    /// Sets the field naming policy applied in both directions.
    pub fn rename_fields(
        mut self,
        rename: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.config.rename = Some(std::sync::Arc::new(rename));
        self
    }

    /// Sets the field exclusion predicate applied in both directions.
    pub fn exclude_fields(
        mut self,
        exclude: impl Fn(&NamedField) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.config.exclude = Some(std::sync::Arc::new(exclude));
        self
    }

    /// Sets the recursion depth limit. Defaults to [`DEFAULT_MAX_DEPTH`].
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.config.max_depth = Some(limit);
        self
    }

    /// Freezes the configuration into an [`Engine`].
    pub fn build(self) -> Engine {
        Engine {
            registry: self.registry,
            config: self.config,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::document::{Document, DocumentObject};
    use crate::engine::{DeserializeContext, Engine, NullHandling, SerializeContext};
    use crate::error::Error;
    use crate::Reflect;
    use crate::registry::Adapter;

    crate::reflect_struct! {
        #[derive(Default, Debug, PartialEq)]
        struct Inventory {
            location: String,
            quantities: std::collections::BTreeMap<String, u32>,
            note: Option<String>,
            secret_token: String,
        }
    }

    fn sample() -> Inventory {
        Inventory {
            location: "attic".to_owned(),
            quantities: [("bolt".to_owned(), 4_u32), ("nut".to_owned(), 9)]
                .into_iter()
                .collect(),
            note: None,
            secret_token: "t0ken".to_owned(),
        }
    }

    #[test]
    fn round_trip_reconstructs_field_wise() {
        let engine = Engine::builder().register::<Inventory>().build();
        let value = sample();

        let document = engine.serialize(&value).unwrap();
        let back: Inventory = engine.deserialize(&document).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn absent_values_follow_null_handling() {
        let value = sample();

        let engine = Engine::builder().register::<Inventory>().build();
        let document = engine.serialize(&value).unwrap();
        assert!(!document.as_object().unwrap().contains_key("note"));

        let engine = Engine::builder()
            .register::<Inventory>()
            .null_handling(NullHandling::Include)
            .build();
        let document = engine.serialize(&value).unwrap();
        assert_eq!(
            document.as_object().unwrap().get("note"),
            Some(&Document::Null),
        );
    }

    #[test]
    fn unknown_keys_are_ignored_and_missing_fields_keep_defaults() {
        let engine = Engine::builder().register::<Inventory>().build();

        let mut object = DocumentObject::new();
        object.insert("location", Document::from("cellar"));
        object.insert("added_in_v2", Document::from(true));

        let back: Inventory = engine.deserialize(&Document::Object(object)).unwrap();
        assert_eq!(back.location, "cellar");
        assert_eq!(back.quantities.len(), 0);
        assert_eq!(back.note, None);
    }

    #[test]
    fn rename_policy_applies_both_directions() {
        let engine = Engine::builder()
            .register::<Inventory>()
            .rename_fields(|name| {
                let mut out = String::with_capacity(name.len());
                let mut upper = false;
                for ch in name.chars() {
                    if ch == '_' {
                        upper = true;
                    } else if upper {
                        out.extend(ch.to_uppercase());
                        upper = false;
                    } else {
                        out.push(ch);
                    }
                }
                out
            })
            .build();

        let value = sample();
        let document = engine.serialize(&value).unwrap();
        let object = document.as_object().unwrap();
        assert!(object.contains_key("secretToken"));
        assert!(!object.contains_key("secret_token"));

        let back: Inventory = engine.deserialize(&document).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn exclusion_predicate_applies_both_directions() {
        let engine = Engine::builder()
            .register::<Inventory>()
            .exclude_fields(|field| field.name().starts_with("secret"))
            .build();

        let value = sample();
        let document = engine.serialize(&value).unwrap();
        assert!(!document.as_object().unwrap().contains_key("secret_token"));

        // A present key for an excluded field is not read back either.
        let mut object = DocumentObject::new();
        object.insert("secret_token", Document::from("injected"));
        let back: Inventory = engine.deserialize(&Document::Object(object)).unwrap();
        assert_eq!(back.secret_token, "");
    }

    crate::reflect_struct! {
        #[derive(Default, Debug, PartialEq)]
        struct Flagged {
            raw: u8,
        }
    }

    /// Serializes `Flagged` as a bare string of bits, delegating nothing.
    struct BitsAdapter;

    impl Adapter for BitsAdapter {
        fn serialize(
            &self,
            value: &dyn Reflect,
            _context: &mut SerializeContext,
        ) -> Result<Document, Error> {
            let flagged = value
                .downcast_ref::<Flagged>()
                .ok_or_else(|| Error::custom("wrong type"))?;
            Ok(Document::from(format!("{:08b}", flagged.raw)))
        }

        fn deserialize(
            &self,
            document: &Document,
            context: &mut DeserializeContext,
        ) -> Result<Box<dyn Reflect>, Error> {
            let text = document
                .as_str()
                .ok_or_else(|| context.type_mismatch("string", document))?;
            let raw = u8::from_str_radix(text, 2)
                .map_err(|err| Error::custom(format!("bad bit string: {err}")))?;
            Ok(Box::new(Flagged { raw }))
        }
    }

    #[test]
    fn custom_adapters_replace_generic_conversion() {
        let engine = Engine::builder()
            .register::<Flagged>()
            .adapter::<Flagged>(BitsAdapter)
            .build();

        let document = engine.serialize(&Flagged { raw: 0b1010_0001 }).unwrap();
        assert_eq!(document, Document::from("10100001"));

        let back: Flagged = engine.deserialize(&document).unwrap();
        assert_eq!(back.raw, 0b1010_0001);
    }

    #[test]
    fn adapter_faults_propagate_unchanged() {
        let engine = Engine::builder()
            .register::<Flagged>()
            .adapter::<Flagged>(BitsAdapter)
            .build();

        let err = engine
            .deserialize::<Flagged>(&Document::from("22"))
            .unwrap_err();
        assert!(err.to_string().starts_with("bad bit string"));
    }

    crate::reflect_struct! {
        #[derive(Default, Debug, PartialEq)]
        struct Wheel {
            spokes: u32,
        }
    }

    crate::reflect_struct! {
        #[derive(Default, Debug, PartialEq)]
        struct Bicycle {
            front: Wheel,
            rear: Wheel,
        }
    }

    /// Serializes a wheel as its spoke count, delegating nested values back
    /// into the engine on the way in.
    struct WheelAdapter;

    impl Adapter for WheelAdapter {
        fn serialize(
            &self,
            value: &dyn Reflect,
            context: &mut SerializeContext,
        ) -> Result<Document, Error> {
            let wheel = value
                .downcast_ref::<Wheel>()
                .ok_or_else(|| Error::custom("wrong type"))?;
            context.serialize(wheel.spokes.as_reflect())
        }

        fn deserialize(
            &self,
            document: &Document,
            context: &mut DeserializeContext,
        ) -> Result<Box<dyn Reflect>, Error> {
            let spokes: u32 = context.deserialize_as(document)?;
            Ok(Box::new(Wheel { spokes }))
        }
    }

    #[test]
    fn adapters_delegate_nested_conversion_through_the_context() {
        let engine = Engine::builder()
            .register::<Bicycle>()
            .adapter::<Wheel>(WheelAdapter)
            .build();

        let bicycle = Bicycle {
            front: Wheel { spokes: 32 },
            rear: Wheel { spokes: 36 },
        };
        let document = engine.serialize(&bicycle).unwrap();
        let object = document.as_object().unwrap();
        assert_eq!(object.get("front"), Some(&Document::from(32_u32)));

        let back: Bicycle = engine.deserialize(&document).unwrap();
        assert_eq!(back, bicycle);
    }

    #[test]
    fn engines_are_shareable_across_threads() {
        let engine = std::sync::Arc::new(Engine::builder().register::<Inventory>().build());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let value = sample();
                    let document = engine.serialize(&value).unwrap();
                    let back: Inventory = engine.deserialize(&document).unwrap();
                    assert_eq!(back, value);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}

use std::any::TypeId;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::Reflect;
use crate::info::TypeInfo;
use crate::registry::{Adapter, AdapterFactory, Describe, TypeMeta};

// -----------------------------------------------------------------------------
// AdapterRegistry

/// The central store mapping types to conversion behavior.
///
/// A registry holds the [`TypeMeta`] of every registered type, user
/// [`Adapter`]s keyed by exact type, and an ordered list of
/// [`AdapterFactory`]s. Population happens exclusively at configuration
/// time — through [`EngineBuilder`](crate::EngineBuilder) — after which the
/// registry is read-only for any number of concurrent calls.
///
/// Resolution never fails structurally: a type without a custom adapter and
/// without a factory match falls back to the generic converter driven by
/// its [`TypeInfo`].
///
/// # Examples
///
/// ```
/// use std::any::TypeId;
/// use docbind::registry::AdapterRegistry;
///
/// docbind::reflect_struct! {
///     #[derive(Default)]
///     struct Tag {
///         name: String,
///     }
/// }
///
/// let mut registry = AdapterRegistry::new();
/// registry.register::<Tag>();
///
/// // The type and its field dependencies are registered.
/// assert!(registry.contains(TypeId::of::<Tag>()));
/// assert!(registry.contains(TypeId::of::<String>()));
/// ```
pub struct AdapterRegistry {
    type_meta_table: HashMap<TypeId, TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    adapters: HashMap<TypeId, Arc<dyn Adapter>>,
    factories: Vec<Arc<dyn AdapterFactory>>,
}

/// The outcome of adapter resolution for one type.
pub(crate) enum Resolution {
    /// A user adapter (exact registration or factory-created).
    Custom(Arc<dyn Adapter>),
    /// No user adapter; use the generic converter.
    Generic,
}

impl Default for AdapterRegistry {
    /// See [`AdapterRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterRegistry {
    /// Creates a registry with no registrations at all.
    pub fn empty() -> Self {
        Self {
            type_meta_table: HashMap::new(),
            type_path_to_id: HashMap::new(),
            adapters: HashMap::new(),
            factories: Vec::new(),
        }
    }

    /// Creates a registry with the built-in scalar types registered:
    /// `()`, `bool`, `char`, the 8–64 bit integers plus `usize`/`isize`,
    /// `f32`/`f64`, and `String`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    /// Registers `T` if it has not been registered yet, then registers its
    /// dependencies.
    ///
    /// `T` is inserted before its dependencies, so mutually recursive types
    /// terminate. Re-registering is a cheap no-op.
    pub fn register<T: Describe>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.type_meta_table.contains_key(&type_id) {
            return;
        }
        self.insert_type_meta(T::type_meta());
        T::register_dependencies(self);
    }

    /// Inserts pre-built metadata, replacing any previous entry for the
    /// same type.
    ///
    /// This does not register dependencies; prefer
    /// [`register`](Self::register).
    pub fn insert_type_meta(&mut self, meta: TypeMeta) {
        log::trace!("registering type `{}`", meta.type_path());
        self.type_path_to_id.insert(meta.type_path(), meta.type_id());
        self.type_meta_table.insert(meta.type_id(), meta);
    }

    /// Installs a user adapter for the exact type `T`.
    ///
    /// Later registrations for the same type replace earlier ones — the
    /// last registration wins.
    pub fn register_adapter<T: Reflect>(&mut self, adapter: impl Adapter + 'static) {
        let replaced = self
            .adapters
            .insert(TypeId::of::<T>(), Arc::new(adapter));
        if replaced.is_some() {
            log::debug!(
                "replacing adapter for `{}`",
                std::any::type_name::<T>(),
            );
        }
    }

    /// Appends an adapter factory.
    ///
    /// Factories are consulted in last-registered-first order.
    pub fn register_factory(&mut self, factory: impl AdapterFactory + 'static) {
        self.factories.push(Arc::new(factory));
    }

    /// Whether the type with the given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    /// Returns the [`TypeMeta`] for the given [`TypeId`], if registered.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeInfo`] for the given [`TypeId`], if registered.
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns the [`TypeMeta`] for the given full type path, if registered.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(&type_id) => self.get(type_id),
            None => None,
        }
    }

    /// Returns an iterator over the registered [`TypeMeta`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    /// Resolves the converter responsible for `type_id`.
    ///
    /// Priority: exact user adapter, then factories (newest first), then
    /// the generic converter.
    pub(crate) fn resolve(&self, type_id: TypeId) -> Resolution {
        if let Some(adapter) = self.adapters.get(&type_id) {
            return Resolution::Custom(adapter.clone());
        }
        if !self.factories.is_empty() {
            if let Some(info) = self.get_type_info(type_id) {
                for factory in self.factories.iter().rev() {
                    if let Some(adapter) = factory.create(info) {
                        log::trace!("factory adapter created for `{}`", info.type_path());
                        return Resolution::Custom(adapter);
                    }
                }
            }
        }
        Resolution::Generic
    }

    /// Registers every type submitted through
    /// [`reflect_struct!`](crate::reflect_struct) across the binary.
    ///
    /// Repeated calls are cheap and insert no duplicates.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) {
        for entry in inventory::iter::<AutoRegistration> {
            (entry.func)(self);
        }
    }
}

// -----------------------------------------------------------------------------
// AutoRegistration

/// One collected auto-registration entry.
///
/// Submitted by [`reflect_struct!`](crate::reflect_struct) when the
/// `auto_register` feature is enabled.
#[cfg(feature = "auto_register")]
pub struct AutoRegistration {
    func: fn(&mut AdapterRegistry),
}

#[cfg(feature = "auto_register")]
impl AutoRegistration {
    /// Creates an entry from a registration function.
    pub const fn new(func: fn(&mut AdapterRegistry)) -> Self {
        Self { func }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::any::TypeId;
    use std::sync::Arc;

    use super::{AdapterRegistry, Resolution};
    use crate::Reflect;
    use crate::document::Document;
    use crate::engine::{Config, DeserializeContext, SerializeContext};
    use crate::error::Error;
    use crate::info::TypeInfo;
    use crate::registry::{Adapter, AdapterFactory};

    struct TaggingAdapter(&'static str);

    impl Adapter for TaggingAdapter {
        fn serialize(
            &self,
            _value: &dyn Reflect,
            _context: &mut SerializeContext,
        ) -> Result<Document, Error> {
            Ok(Document::from(self.0))
        }

        fn deserialize(
            &self,
            _document: &Document,
            _context: &mut DeserializeContext,
        ) -> Result<Box<dyn Reflect>, Error> {
            Err(Error::custom("not used"))
        }
    }

    struct BoolFactory(&'static str);

    impl AdapterFactory for BoolFactory {
        fn create(&self, info: &'static TypeInfo) -> Option<Arc<dyn Adapter>> {
            (info.ty_id() == TypeId::of::<bool>())
                .then(|| Arc::new(TaggingAdapter(self.0)) as Arc<dyn Adapter>)
        }
    }

    fn resolved_tag(registry: &AdapterRegistry, type_id: TypeId) -> Option<Document> {
        match registry.resolve(type_id) {
            Resolution::Custom(adapter) => {
                let config = Config::default();
                let mut context = SerializeContext::new(registry, &config);
                Some(adapter.serialize(false.as_reflect(), &mut context).unwrap())
            }
            Resolution::Generic => None,
        }
    }

    #[cfg(feature = "auto_register")]
    crate::reflect_struct! {
        #[derive(Default)]
        struct AutoTag {
            id: u64,
        }
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_submitted_types() {
        let mut registry = AdapterRegistry::new();
        assert!(!registry.contains(TypeId::of::<AutoTag>()));

        registry.auto_register();
        assert!(registry.contains(TypeId::of::<AutoTag>()));

        // Repeated calls are cheap no-ops.
        registry.auto_register();
        assert!(registry.contains(TypeId::of::<AutoTag>()));
    }

    #[test]
    fn primitives_are_preregistered() {
        let registry = AdapterRegistry::new();
        assert!(registry.contains(TypeId::of::<bool>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("f64").is_some());
        assert!(!registry.contains(TypeId::of::<Vec<bool>>()));
    }

    #[test]
    fn last_registered_adapter_wins() {
        let mut registry = AdapterRegistry::new();
        registry.register_adapter::<bool>(TaggingAdapter("first"));
        registry.register_adapter::<bool>(TaggingAdapter("second"));
        assert_eq!(
            resolved_tag(&registry, TypeId::of::<bool>()),
            Some(Document::from("second")),
        );
    }

    #[test]
    fn factories_run_newest_first_after_exact_adapters() {
        let mut registry = AdapterRegistry::new();
        registry.register_factory(BoolFactory("factory-a"));
        registry.register_factory(BoolFactory("factory-b"));
        assert_eq!(
            resolved_tag(&registry, TypeId::of::<bool>()),
            Some(Document::from("factory-b")),
        );

        // An exact adapter beats every factory.
        registry.register_adapter::<bool>(TaggingAdapter("first"));
        assert_eq!(
            resolved_tag(&registry, TypeId::of::<bool>()),
            Some(Document::from("first")),
        );

        // Factories never see unregistered types.
        assert_eq!(resolved_tag(&registry, TypeId::of::<Vec<bool>>()), None);
    }
}

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::Reflect;
use crate::info::{GenericTypeInfoCell, MapInfo, TypeInfo, Typed};
use crate::ops::Map;
use crate::registry::{AdapterRegistry, Describe, FromType, TypeMeta, TypeTraitDefault};

impl<V: Reflect + Typed, S: BuildHasher + 'static> Typed for HashMap<String, V, S> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, V>()))
    }
}

impl<V: Reflect + Typed, S: BuildHasher + 'static> Reflect for HashMap<String, V, S> {
    crate::__impl_reflect_common!(Map);
}

impl<V: Reflect + Typed, S: BuildHasher + 'static> Map for HashMap<String, V, S> {
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        HashMap::get(self, key).map(|value| value.as_reflect())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
        Box::new(
            HashMap::iter(self).map(|(key, value)| (key.as_str(), value.as_reflect())),
        )
    }

    fn try_insert(
        &mut self,
        key: String,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        HashMap::insert(self, key, value.take::<V>()?);
        Ok(())
    }
}

impl<V, S> Describe for HashMap<String, V, S>
where
    V: Reflect + Typed + Describe,
    S: BuildHasher + Default + 'static,
{
    fn type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut AdapterRegistry) {
        registry.register::<V>();
    }
}

impl<V: Reflect + Typed> Typed for BTreeMap<String, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, V>()))
    }
}

impl<V: Reflect + Typed> Reflect for BTreeMap<String, V> {
    crate::__impl_reflect_common!(Map);
}

impl<V: Reflect + Typed> Map for BTreeMap<String, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        BTreeMap::get(self, key).map(|value| value.as_reflect())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
        Box::new(
            BTreeMap::iter(self).map(|(key, value)| (key.as_str(), value.as_reflect())),
        )
    }

    fn try_insert(
        &mut self,
        key: String,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        BTreeMap::insert(self, key, value.take::<V>()?);
        Ok(())
    }
}

impl<V: Reflect + Typed + Describe> Describe for BTreeMap<String, V> {
    fn type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut AdapterRegistry) {
        registry.register::<V>();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::engine::Engine;

    #[test]
    fn maps_round_trip() {
        let engine = Engine::builder()
            .register::<BTreeMap<String, u32>>()
            .register::<HashMap<String, bool>>()
            .build();

        let sorted: BTreeMap<String, u32> =
            [("a".to_owned(), 1_u32), ("b".to_owned(), 2)].into_iter().collect();
        let document = engine.serialize(&sorted).unwrap();
        // BTreeMap gives a deterministic key order.
        let keys: Vec<&str> = document.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        let back: BTreeMap<String, u32> = engine.deserialize(&document).unwrap();
        assert_eq!(back, sorted);

        let hashed: HashMap<String, bool> =
            [("on".to_owned(), true)].into_iter().collect();
        let document = engine.serialize(&hashed).unwrap();
        let back: HashMap<String, bool> = engine.deserialize(&document).unwrap();
        assert_eq!(back, hashed);
    }
}

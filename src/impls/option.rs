use crate::Reflect;
use crate::info::{GenericTypeInfoCell, OptionalInfo, TypeInfo, Typed};
use crate::ops::Optional;
use crate::registry::{AdapterRegistry, Describe, FromType, TypeMeta, TypeTraitDefault};

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    crate::__impl_reflect_common!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value.as_reflect())
    }

    fn set_value(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Some(value.take::<T>()?);
        Ok(())
    }
}

impl<T: Reflect + Typed + Describe> Describe for Option<T> {
    fn type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut AdapterRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::document::Document;
    use crate::engine::Engine;

    #[test]
    fn optionals_nest() {
        let engine = Engine::builder().register::<Option<Option<u32>>>().build();

        let document = engine.serialize(&Some(Some(3_u32))).unwrap();
        assert_eq!(document, Document::from(3_u32));

        // A bare null collapses every optional layer to its default.
        let value: Option<Option<u32>> = engine.deserialize(&Document::Null).unwrap();
        assert_eq!(value, None);

        let value: Option<Option<u32>> = engine.deserialize(&Document::from(3_u32)).unwrap();
        assert_eq!(value, Some(Some(3)));
    }
}

use std::collections::VecDeque;

use crate::Reflect;
use crate::info::{GenericTypeInfoCell, ListInfo, TypeInfo, Typed};
use crate::ops::{List, ListItemIter};
use crate::registry::{AdapterRegistry, Describe, FromType, TypeMeta, TypeTraitDefault};

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    crate::__impl_reflect_common!(List);
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item.as_reflect())
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }
}

impl<T: Reflect + Typed + Describe> Describe for Vec<T> {
    fn type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut AdapterRegistry) {
        registry.register::<T>();
    }
}

impl<T: Reflect + Typed> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for VecDeque<T> {
    crate::__impl_reflect_common!(List);
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|item| item.as_reflect())
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        VecDeque::push_back(self, value.take::<T>()?);
        Ok(())
    }
}

impl<T: Reflect + Typed + Describe> Describe for VecDeque<T> {
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

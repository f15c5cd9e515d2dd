//! Wrapper support: `Box`, `Rc`, `Arc`, `Cell`, `RefCell`, `Mutex`.
//!
//! The shared wrappers (`Rc`, `Arc`) report the referent address — the
//! identity the serializer's visitation stack tracks. Uniquely-owned
//! wrappers report none; they only provide indirection or guarded access.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

use crate::Reflect;
use crate::error::Error;
use crate::info::{GenericTypeInfoCell, TypeInfo, Typed, WrapperInfo};
use crate::ops::Wrapper;
use crate::registry::{AdapterRegistry, Describe, TypeMeta, TypeTraitWrap};

macro_rules! impl_wrapper_common {
    ($wrapper:ident $(, $extra:ident)?) => {
        impl<T: Reflect + Typed $(+ $extra)?> Typed for $wrapper<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Wrapper(WrapperInfo::new::<Self, T>())
                })
            }
        }

        impl<T: Reflect + Typed $(+ $extra)?> Reflect for $wrapper<T> {
            crate::__impl_reflect_common!(Wrapper, Opaque);
        }

        impl<T: Reflect + Typed + Describe $(+ $extra)?> Describe for $wrapper<T> {
            fn type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait(TypeTraitWrap::new(|inner| {
                    Ok(Box::new($wrapper::new(inner.take::<T>()?)))
                }));
                meta
            }

            fn register_dependencies(registry: &mut AdapterRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_wrapper_common!(Box);
impl_wrapper_common!(Rc);
impl_wrapper_common!(Arc);
impl_wrapper_common!(Cell, Copy);
impl_wrapper_common!(RefCell);
impl_wrapper_common!(Mutex);

impl<T: Reflect + Typed> Wrapper for Box<T> {
    #[inline]
    fn address(&self) -> Option<usize> {
        None
    }

    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error> {
        f((**self).as_reflect())
    }
}

impl<T: Reflect + Typed> Wrapper for Rc<T> {
    #[inline]
    fn address(&self) -> Option<usize> {
        Some(Rc::as_ptr(self) as usize)
    }

    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error> {
        f((**self).as_reflect())
    }
}

impl<T: Reflect + Typed> Wrapper for Arc<T> {
    #[inline]
    fn address(&self) -> Option<usize> {
        Some(Arc::as_ptr(self) as usize)
    }

    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error> {
        f((**self).as_reflect())
    }
}

impl<T: Reflect + Typed + Copy> Wrapper for Cell<T> {
    #[inline]
    fn address(&self) -> Option<usize> {
        None
    }

    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let value = Cell::get(self);
        f(value.as_reflect())
    }
}

impl<T: Reflect + Typed> Wrapper for RefCell<T> {
    #[inline]
    fn address(&self) -> Option<usize> {
        None
    }

    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error> {
        match RefCell::try_borrow(self) {
            Ok(guard) => f((*guard).as_reflect()),
            Err(_) => Err(Error::Inaccessible {
                type_path: Cow::Borrowed(Reflect::reflect_type_path(self)),
            }),
        }
    }
}

impl<T: Reflect + Typed> Wrapper for Mutex<T> {
    #[inline]
    fn address(&self) -> Option<usize> {
        None
    }

    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        f((*guard).as_reflect())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use crate::document::Document;
    use crate::engine::Engine;

    #[test]
    fn wrappers_are_transparent_in_the_tree() {
        let engine = Engine::builder()
            .register::<Box<u32>>()
            .register::<Rc<String>>()
            .register::<Arc<bool>>()
            .register::<Cell<i8>>()
            .register::<RefCell<Vec<u8>>>()
            .register::<Mutex<u16>>()
            .build();

        assert_eq!(
            engine.serialize(&Box::new(7_u32)).unwrap(),
            Document::from(7_u32),
        );
        assert_eq!(
            engine.serialize(&Rc::new("s".to_owned())).unwrap(),
            Document::from("s"),
        );
        assert_eq!(engine.serialize(&Arc::new(true)).unwrap(), Document::from(true));
        assert_eq!(engine.serialize(&Cell::new(-2_i8)).unwrap(), Document::from(-2_i8));
        assert_eq!(
            engine.serialize(&Mutex::new(9_u16)).unwrap(),
            Document::from(9_u16),
        );

        let back: Box<u32> = engine.deserialize(&Document::from(7_u32)).unwrap();
        assert_eq!(*back, 7);
        let back: Rc<String> = engine.deserialize(&Document::from("s")).unwrap();
        assert_eq!(back.as_str(), "s");
        let back: RefCell<Vec<u8>> = engine
            .deserialize(&Document::Array(vec![Document::from(1_u8)]))
            .unwrap();
        assert_eq!(back.into_inner(), [1]);
        let back: Mutex<u16> = engine.deserialize(&Document::from(9_u16)).unwrap();
        assert_eq!(back.into_inner().unwrap(), 9);
    }
}

//! Built-in scalar support: `Reflect`/`Typed` plus the primitive adapters
//! registered by [`AdapterRegistry::new`](crate::registry::AdapterRegistry::new).

use crate::Reflect;
use crate::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
use crate::registry::{
    Describe, FromType, TypeMeta, TypeTraitDefault, TypeTraitFromDocument, TypeTraitToDocument,
};

macro_rules! impl_scalar {
    ($ty:ty, $from:expr) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<$ty>()))
            }
        }

        impl Reflect for $ty {
            crate::__impl_reflect_common!(Opaque);
        }

        impl Describe for $ty {
            fn type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<$ty>();
                meta.insert_trait(<TypeTraitDefault as FromType<$ty>>::from_type());
                meta.insert_trait(<TypeTraitToDocument as FromType<$ty>>::from_type());
                meta.insert_trait(TypeTraitFromDocument::new($from));
                meta
            }
        }
    };
}

macro_rules! impl_unsigned_scalar {
    ($($ty:ident),*) => {$(
        impl_scalar!($ty, |document, context| {
            let Some(number) = document.as_u64() else {
                return Err(context.type_mismatch(stringify!($ty), document));
            };
            match <$ty>::try_from(number) {
                Ok(value) => Ok(Box::new(value)),
                Err(_) => Err(context.value_mismatch(
                    stringify!($ty),
                    format!("out-of-range number {number}"),
                )),
            }
        });
    )*};
}

macro_rules! impl_signed_scalar {
    ($($ty:ident),*) => {$(
        impl_scalar!($ty, |document, context| {
            let Some(number) = document.as_i64() else {
                return Err(context.type_mismatch(stringify!($ty), document));
            };
            match <$ty>::try_from(number) {
                Ok(value) => Ok(Box::new(value)),
                Err(_) => Err(context.value_mismatch(
                    stringify!($ty),
                    format!("out-of-range number {number}"),
                )),
            }
        });
    )*};
}

impl_unsigned_scalar!(u8, u16, u32, u64, usize);
impl_signed_scalar!(i8, i16, i32, i64, isize);

impl_scalar!((), |document, context| {
    if document.is_null() {
        Ok(Box::new(()))
    } else {
        Err(context.type_mismatch("null", document))
    }
});

impl_scalar!(bool, |document, context| {
    match document.as_bool() {
        Some(value) => Ok(Box::new(value)),
        None => Err(context.type_mismatch("boolean", document)),
    }
});

impl_scalar!(char, |document, context| {
    let Some(text) = document.as_str() else {
        return Err(context.type_mismatch("string", document));
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Box::new(ch)),
        _ => Err(context.value_mismatch(
            "single-character string",
            format!("string {text:?}"),
        )),
    }
});

impl_scalar!(String, |document, context| {
    match document.as_str() {
        Some(text) => Ok(Box::new(text.to_owned())),
        None => Err(context.type_mismatch("string", document)),
    }
});

// Floats are lenient about the source lane; integers are not rebuilt from
// floats.
impl_scalar!(f64, |document, context| {
    match document.as_f64() {
        Some(value) => Ok(Box::new(value)),
        None => Err(context.type_mismatch("number", document)),
    }
});

impl_scalar!(f32, |document, context| {
    match document.as_f64() {
        Some(value) => Ok(Box::new(value as f32)),
        None => Err(context.type_mismatch("number", document)),
    }
});

// -----------------------------------------------------------------------------
// Tests

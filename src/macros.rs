//! The `reflect_struct!` schema macro and its helpers.

/// Implements the [`Reflect`](crate::Reflect) methods every kind shares.
///
/// The second identifier names the [`ReflectMut`](crate::ops::ReflectMut)
/// variant, for kinds (wrappers) whose mutable cast degrades to `Opaque`.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_common {
    ($kind:ident) => {
        $crate::__impl_reflect_common!($kind, $kind);
    };
    ($kind:ident, $mut_kind:ident) => {
        #[inline]
        fn reflect_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$mut_kind(self)
        }

        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> ::std::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            ::std::result::Result::Ok(())
        }
    };
}

#[cfg(feature = "auto_register")]
#[doc(hidden)]
#[macro_export]
macro_rules! __submit_auto_register {
    ($ty:ident) => {
        $crate::__exports::inventory::submit! {
            $crate::registry::AutoRegistration::new(|registry| {
                registry.register::<$ty>();
            })
        }
    };
}

#[cfg(not(feature = "auto_register"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __submit_auto_register {
    ($ty:ident) => {};
}

/// Defines a struct together with its reflection and registration
/// implementations.
///
/// The macro emits the struct itself plus [`Typed`](crate::info::Typed),
/// [`Reflect`](crate::Reflect), [`Struct`](crate::ops::Struct), and
/// [`Describe`](crate::registry::Describe) — the full static schema the
/// generic converter needs. Field descriptors carry the declaration order,
/// and dependency registration covers every field type.
///
/// The struct must implement `Default` (derive it); deserialization starts
/// from a default instance and fills in the keys present in the input.
/// With the `auto_register` feature enabled, each defined type is also
/// submitted for [`EngineBuilder::auto_register`](crate::EngineBuilder::auto_register).
///
/// Field exclusion and renaming are configuration concerns
/// ([`EngineBuilder::exclude_fields`](crate::EngineBuilder::exclude_fields),
/// [`EngineBuilder::rename_fields`](crate::EngineBuilder::rename_fields)),
/// so the macro takes no per-field options.
///
/// # Examples
///
/// ```
/// use docbind::info::Typed;
///
/// docbind::reflect_struct! {
///     /// A ship in the tracking fleet.
///     #[derive(Default, Debug, PartialEq)]
///     pub struct Ship {
///         pub name: String,
///         pub draft_meters: f64,
///         pub containers: Vec<u64>,
///     }
/// }
///
/// let info = Ship::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 3);
/// assert_eq!(info.field_at(2).unwrap().name(), "containers");
/// ```
#[macro_export]
macro_rules! reflect_struct {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $fname:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$fattr])*
                $fvis $fname: $fty,
            )*
        }

        impl $crate::info::Typed for $name {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Struct($crate::info::StructInfo::new::<Self>(&[
                        $($crate::info::NamedField::new::<$fty>(::core::stringify!($fname)),)*
                    ]))
                })
            }
        }

        impl $crate::Reflect for $name {
            $crate::__impl_reflect_common!(Struct);
        }

        impl $crate::ops::Struct for $name {
            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::Reflect> {
                $(
                    if name == ::core::stringify!($fname) {
                        return ::std::option::Option::Some(
                            $crate::Reflect::as_reflect(&self.$fname),
                        );
                    }
                )*
                let _ = name;
                ::std::option::Option::None
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::std::option::Option<&mut dyn $crate::Reflect> {
                $(
                    if name == ::core::stringify!($fname) {
                        return ::std::option::Option::Some(
                            $crate::Reflect::as_reflect_mut(&mut self.$fname),
                        );
                    }
                )*
                let _ = name;
                ::std::option::Option::None
            }

            #[allow(unused_mut)]
            fn field_at(&self, index: usize) -> ::std::option::Option<&dyn $crate::Reflect> {
                let mut cursor = 0_usize;
                $(
                    if index == cursor {
                        return ::std::option::Option::Some(
                            $crate::Reflect::as_reflect(&self.$fname),
                        );
                    }
                    cursor += 1;
                )*
                let _ = (index, cursor);
                ::std::option::Option::None
            }

            fn name_at(&self, index: usize) -> ::std::option::Option<&'static str> {
                const NAMES: &[&str] = &[$(::core::stringify!($fname)),*];
                NAMES.get(index).copied()
            }

            fn field_len(&self) -> usize {
                <[&str]>::len(&[$(::core::stringify!($fname)),*])
            }

            fn iter_fields(&self) -> $crate::ops::StructFieldIter<'_> {
                $crate::ops::StructFieldIter::new(self)
            }
        }

        impl $crate::registry::Describe for $name {
            fn type_meta() -> $crate::registry::TypeMeta {
                let mut meta = $crate::registry::TypeMeta::of::<Self>();
                meta.insert_trait(
                    <$crate::registry::TypeTraitDefault as $crate::registry::FromType<Self>>::from_type(),
                );
                meta
            }

            fn register_dependencies(registry: &mut $crate::registry::AdapterRegistry) {
                $(registry.register::<$fty>();)*
                let _ = registry;
            }
        }

        $crate::__submit_auto_register!($name);
    };
}

//! The type adapter registry: maps a requested type to the converter
//! responsible for it.
//!
//! Custom [`Adapter`]s (exact type, last registration wins) and
//! [`AdapterFactory`]s (last registered tried first) take priority; every
//! other type falls back to the generic converter driven by its registered
//! [`TypeMeta`]. Registration must finish before the first conversion call
//! — [`EngineBuilder`](crate::EngineBuilder) enforces this by freezing the
//! registry into the built engine.

mod adapter;
mod adapter_registry;
mod traits;
mod type_meta;

pub use adapter::{Adapter, AdapterFactory};
pub use adapter_registry::AdapterRegistry;
pub use traits::{
    FromType, TypeTrait, TypeTraitDefault, TypeTraitFromDocument, TypeTraitToDocument,
    TypeTraitWrap,
};
pub use type_meta::{Describe, TypeMeta};

pub(crate) use adapter_registry::Resolution;

#[cfg(feature = "auto_register")]
pub use adapter_registry::AutoRegistration;

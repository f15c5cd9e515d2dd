#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod macros;
mod reflection;

pub mod document;
pub mod engine;
pub mod error;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Macro exports

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub mod __exports {
    pub use inventory;
}

// -----------------------------------------------------------------------------
// Top-level exports

pub use document::{Document, Number};
pub use engine::{Engine, EngineBuilder, NullHandling};
pub use error::Error;
pub use reflection::Reflect;

//! Built-in `Reflect`/`Typed`/`Describe` implementations.

mod map;
mod option;
mod scalars;
mod vec;
mod wrappers;

//! Static type information: the schema descriptors that drive generic
//! conversion.

mod cell;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod optional_info;
mod struct_info;
mod type_info;
mod typed;
mod wrapper_info;

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use field_info::NamedField;
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::OpaqueInfo;
pub use optional_info::OptionalInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, Type, TypeInfo};
pub use typed::Typed;
pub use wrapper_info::WrapperInfo;

use std::any::TypeId;
use std::borrow::Cow;

use crate::Reflect;
use crate::document::Document;
use crate::engine::config::Config;
use crate::engine::path::KeyPath;
use crate::error::Error;
use crate::info::{ListInfo, MapInfo, OptionalInfo, StructInfo, TypeInfo, WrapperInfo};
use crate::ops::ReflectMut;
use crate::registry::{
    AdapterRegistry, Resolution, TypeMeta, TypeTraitDefault, TypeTraitFromDocument, TypeTraitWrap,
};

// -----------------------------------------------------------------------------
// DeserializeContext

/// The walker state of one top-level deserialize call.
///
/// Deserialization carries no visitation stack: a document tree is acyclic
/// by construction, so only the depth limit bounds the walk. User adapters
/// receive the context to delegate nested nodes back into the engine via
/// [`deserialize`](DeserializeContext::deserialize) or
/// [`deserialize_as`](DeserializeContext::deserialize_as).
pub struct DeserializeContext<'a> {
    registry: &'a AdapterRegistry,
    config: &'a Config,
    path: KeyPath,
    depth: usize,
}

impl<'a> DeserializeContext<'a> {
    pub(crate) fn new(registry: &'a AdapterRegistry, config: &'a Config) -> Self {
        Self {
            registry,
            config,
            path: KeyPath::new(),
            depth: 0,
        }
    }

    /// Builds a boxed value of the type identified by `type_id` from
    /// `document`.
    pub fn deserialize(
        &mut self,
        document: &Document,
        type_id: TypeId,
    ) -> Result<Box<dyn Reflect>, Error> {
        let limit = self.config.max_depth();
        if self.depth >= limit {
            return Err(Error::DepthLimit { limit });
        }
        self.depth += 1;
        let value = self.deserialize_inner(document, type_id);
        self.depth -= 1;
        value
    }

    /// Builds a `T` from `document`.
    pub fn deserialize_as<T: Reflect>(&mut self, document: &Document) -> Result<T, Error> {
        self.deserialize(document, TypeId::of::<T>())?
            .take::<T>()
            .map_err(|value| {
                Error::custom(format!(
                    "converter for `{}` produced a `{}`",
                    std::any::type_name::<T>(),
                    value.reflect_type_path(),
                ))
            })
    }

    /// Creates a [`Error::TypeMismatch`] at the current document location.
    pub fn type_mismatch(&self, expected: &'static str, found: &Document) -> Error {
        Error::TypeMismatch {
            expected: Cow::Borrowed(expected),
            found: Cow::Borrowed(found.kind().as_str()),
            path: self.path.render(),
        }
    }

    /// Creates a [`Error::TypeMismatch`] with an explicit description of
    /// what was found.
    pub fn value_mismatch(&self, expected: &'static str, found: String) -> Error {
        Error::TypeMismatch {
            expected: Cow::Borrowed(expected),
            found: Cow::Owned(found),
            path: self.path.render(),
        }
    }

    fn deserialize_inner(
        &mut self,
        document: &Document,
        type_id: TypeId,
    ) -> Result<Box<dyn Reflect>, Error> {
        if let Resolution::Custom(adapter) = self.registry.resolve(type_id) {
            return adapter.deserialize(document, self);
        }

        let Some(meta) = self.registry.get(type_id) else {
            return Err(Error::UnregisteredType {
                type_path: Cow::Owned(format!("{type_id:?}")),
            });
        };

        match meta.type_info() {
            TypeInfo::Struct(info) => self.deserialize_struct(document, info, meta),
            TypeInfo::List(info) => self.deserialize_list(document, info, meta),
            TypeInfo::Map(info) => self.deserialize_map(document, info, meta),
            TypeInfo::Optional(info) => self.deserialize_optional(document, info, meta),
            TypeInfo::Wrapper(info) => self.deserialize_wrapper(document, info, meta),
            TypeInfo::Opaque(info) => match meta.get_trait::<TypeTraitFromDocument>() {
                Some(capability) => capability.from_document(document, self),
                None => Err(Error::NotDeserializable {
                    type_path: Cow::Borrowed(info.type_path()),
                }),
            },
        }
    }

    /// Creates the default instance deserialization fills in.
    fn default_value(&self, meta: &TypeMeta) -> Result<Box<dyn Reflect>, Error> {
        match meta.get_trait::<TypeTraitDefault>() {
            Some(capability) => Ok(capability.default_value()),
            None => Err(Error::MissingDefault {
                type_path: Cow::Borrowed(meta.type_path()),
            }),
        }
    }

    fn deserialize_struct(
        &mut self,
        document: &Document,
        info: &'static StructInfo,
        meta: &TypeMeta,
    ) -> Result<Box<dyn Reflect>, Error> {
        let Some(object) = document.as_object() else {
            return Err(self.type_mismatch("object", document));
        };

        let mut value = self.default_value(meta)?;
        {
            let ReflectMut::Struct(target) = value.reflect_mut() else {
                return Err(Error::custom(format!(
                    "type `{}` reports the struct kind without struct access",
                    info.type_path(),
                )));
            };

            for field in info.iter() {
                if self.config.is_excluded(field) {
                    continue;
                }
                let key = self.config.key_for(field);
                // Keys absent from the input keep the default field value.
                let Some(child) = object.get(key.as_ref()) else {
                    continue;
                };

                self.path.push_key(key.as_ref());
                let converted = self.deserialize(child, field.ty_id());
                self.path.pop();

                let Some(slot) = target.field_mut(field.name()) else {
                    return Err(Error::custom(format!(
                        "field `{}` was missing while deserializing `{}`",
                        field.name(),
                        info.type_path(),
                    )));
                };
                slot.set(converted?).map_err(|rejected| {
                    Error::custom(format!(
                        "cannot store a `{}` into field `{}` of `{}`",
                        rejected.reflect_type_path(),
                        field.name(),
                        info.type_path(),
                    ))
                })?;
            }
        }

        // Keys with no matching field are ignored for forward compatibility.
        if log::log_enabled!(log::Level::Trace) {
            for (key, _) in object.iter() {
                let known = info
                    .iter()
                    .any(|field| !self.config.is_excluded(field) && self.config.key_for(field) == key);
                if !known {
                    log::trace!("ignoring unknown key `{key}` for `{}`", info.type_path());
                }
            }
        }

        Ok(value)
    }

    fn deserialize_list(
        &mut self,
        document: &Document,
        info: &'static ListInfo,
        meta: &TypeMeta,
    ) -> Result<Box<dyn Reflect>, Error> {
        let Some(items) = document.as_array() else {
            return Err(self.type_mismatch("array", document));
        };

        let mut value = self.default_value(meta)?;
        {
            let ReflectMut::List(target) = value.reflect_mut() else {
                return Err(Error::custom(format!(
                    "type `{}` reports the list kind without list access",
                    info.type_path(),
                )));
            };

            for (index, item) in items.iter().enumerate() {
                self.path.push_index(index);
                let converted = self.deserialize(item, info.item_ty_id());
                self.path.pop();

                target.try_push(converted?).map_err(|rejected| {
                    Error::custom(format!(
                        "cannot push a `{}` into `{}`",
                        rejected.reflect_type_path(),
                        info.type_path(),
                    ))
                })?;
            }
        }
        Ok(value)
    }

    fn deserialize_map(
        &mut self,
        document: &Document,
        info: &'static MapInfo,
        meta: &TypeMeta,
    ) -> Result<Box<dyn Reflect>, Error> {
        let Some(object) = document.as_object() else {
            return Err(self.type_mismatch("object", document));
        };

        let mut value = self.default_value(meta)?;
        {
            let ReflectMut::Map(target) = value.reflect_mut() else {
                return Err(Error::custom(format!(
                    "type `{}` reports the map kind without map access",
                    info.type_path(),
                )));
            };

            for (key, entry) in object.iter() {
                self.path.push_key(key);
                let converted = self.deserialize(entry, info.value_ty_id());
                self.path.pop();

                target
                    .try_insert(key.to_owned(), converted?)
                    .map_err(|rejected| {
                        Error::custom(format!(
                            "cannot insert a `{}` into `{}`",
                            rejected.reflect_type_path(),
                            info.type_path(),
                        ))
                    })?;
            }
        }
        Ok(value)
    }

    fn deserialize_optional(
        &mut self,
        document: &Document,
        info: &'static OptionalInfo,
        meta: &TypeMeta,
    ) -> Result<Box<dyn Reflect>, Error> {
        let mut value = self.default_value(meta)?;
        if document.is_null() {
            return Ok(value);
        }

        let inner = self.deserialize(document, info.value_ty_id())?;
        {
            let ReflectMut::Optional(target) = value.reflect_mut() else {
                return Err(Error::custom(format!(
                    "type `{}` reports the optional kind without optional access",
                    info.type_path(),
                )));
            };
            target.set_value(inner).map_err(|rejected| {
                Error::custom(format!(
                    "cannot fill `{}` with a `{}`",
                    info.type_path(),
                    rejected.reflect_type_path(),
                ))
            })?;
        }
        Ok(value)
    }

    fn deserialize_wrapper(
        &mut self,
        document: &Document,
        info: &'static WrapperInfo,
        meta: &TypeMeta,
    ) -> Result<Box<dyn Reflect>, Error> {
        let inner = self.deserialize(document, info.value_ty_id())?;
        let Some(capability) = meta.get_trait::<TypeTraitWrap>() else {
            return Err(Error::NotDeserializable {
                type_path: Cow::Borrowed(info.type_path()),
            });
        };
        capability.wrap(inner).map_err(|rejected| {
            Error::custom(format!(
                "cannot wrap a `{}` into `{}`",
                rejected.reflect_type_path(),
                info.type_path(),
            ))
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

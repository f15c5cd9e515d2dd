use std::borrow::Cow;

use crate::Reflect;
use crate::document::{Document, DocumentObject};
use crate::engine::config::{Config, NullHandling};
use crate::engine::path::KeyPath;
use crate::error::Error;
use crate::info::TypeInfo;
use crate::ops::{List, Map, ReflectRef, Struct, Wrapper};
use crate::registry::{AdapterRegistry, Resolution, TypeTraitToDocument};

// The number of times one shared address may sit open on the visitation
// stack. A first re-entry is what lets a shared node inside its own owner's
// collection serialize as a duplicate; a second re-entry proves a cycle
// that back-reference omission cannot break.
const REENTRY_LIMIT: usize = 2;

// -----------------------------------------------------------------------------
// VisitStack

/// The shared-wrapper addresses of the open call chain.
///
/// Entries are pushed before descending into a shared wrapper's referent
/// and popped on return, so the stack reflects only the currently open
/// calls — a value reachable twice through sibling branches is not on the
/// stack at its second visit and serializes again (duplicated, never
/// deduped).
#[derive(Default)]
pub(crate) struct VisitStack {
    entries: Vec<usize>,
}

impl VisitStack {
    fn open_count(&self, address: usize) -> usize {
        self.entries.as_slice().iter().filter(|&&entry| entry == address).count()
    }

    fn push(&mut self, address: usize) {
        self.entries.push(address);
    }

    fn pop(&mut self) {
        self.entries.pop();
    }
}

// -----------------------------------------------------------------------------
// Position

/// Where the value currently being converted sits in its parent.
///
/// Back-reference omission only applies in field position: an object node
/// can drop a key, but an array element or an adapter delegation has no
/// slot to drop.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Root,
    Field,
    Element,
}

// -----------------------------------------------------------------------------
// SerializeContext

/// The walker state of one top-level serialize call.
///
/// Created when the call starts and destroyed when it returns; nothing is
/// carried across calls. User adapters receive the context to delegate
/// nested values back into the engine via
/// [`serialize`](SerializeContext::serialize).
pub struct SerializeContext<'a> {
    registry: &'a AdapterRegistry,
    config: &'a Config,
    visits: VisitStack,
    path: KeyPath,
    depth: usize,
}

impl<'a> SerializeContext<'a> {
    pub(crate) fn new(registry: &'a AdapterRegistry, config: &'a Config) -> Self {
        Self {
            registry,
            config,
            visits: VisitStack::default(),
            path: KeyPath::new(),
            depth: 0,
        }
    }

    /// Runs a whole top-level call.
    pub(crate) fn run(&mut self, value: &dyn Reflect) -> Result<Document, Error> {
        Ok(self.convert(value, Position::Root)?.unwrap_or(Document::Null))
    }

    /// Converts a nested value into a node.
    ///
    /// This is the callback interface for user adapters; the recursive call
    /// runs under the same visitation and depth accounting as generic
    /// conversion. An absent value (an empty optional, or an omitted
    /// back-reference) converts to `Null` here, since the adapter decides
    /// placement itself.
    pub fn serialize(&mut self, value: &dyn Reflect) -> Result<Document, Error> {
        Ok(self
            .convert(value, Position::Element)?
            .unwrap_or(Document::Null))
    }

    /// Converts `value`, returning `None` when it is absent.
    fn convert(
        &mut self,
        value: &dyn Reflect,
        position: Position,
    ) -> Result<Option<Document>, Error> {
        let limit = self.config.max_depth();
        if self.depth >= limit {
            return Err(Error::DepthLimit { limit });
        }
        self.depth += 1;
        let converted = self.convert_inner(value, position);
        self.depth -= 1;
        converted
    }

    fn convert_inner(
        &mut self,
        value: &dyn Reflect,
        position: Position,
    ) -> Result<Option<Document>, Error> {
        if let Resolution::Custom(adapter) = self.registry.resolve(value.ty_id()) {
            return adapter.serialize(value, self).map(Some);
        }

        match value.reflect_ref() {
            ReflectRef::Struct(value) => self.convert_struct(value).map(Some),
            ReflectRef::List(value) => self.convert_list(value).map(Some),
            ReflectRef::Map(value) => self.convert_map(value).map(Some),
            ReflectRef::Optional(value) => match value.value() {
                Some(inner) => self.convert(inner, position),
                None => Ok(None),
            },
            ReflectRef::Wrapper(value) => self.convert_wrapper(value, position),
            ReflectRef::Opaque(value) => self.convert_opaque(value).map(Some),
        }
    }

    fn convert_struct(&mut self, value: &dyn Struct) -> Result<Document, Error> {
        let TypeInfo::Struct(info) = value.reflect_type_info() else {
            return Err(Error::custom(format!(
                "type `{}` reports the struct kind without struct info",
                value.reflect_type_path(),
            )));
        };

        let mut object = DocumentObject::with_capacity(info.field_len());
        for (index, field) in info.iter().enumerate() {
            if self.config.is_excluded(field) {
                continue;
            }
            let Some(field_value) = value.field_at(index) else {
                return Err(Error::custom(format!(
                    "field `{}` was missing while serializing `{}`",
                    field.name(),
                    info.type_path(),
                )));
            };

            let key = self.config.key_for(field);
            self.path.push_key(key.as_ref());
            let converted = self.convert(field_value, Position::Field);
            self.path.pop();

            match converted? {
                Some(node) => {
                    object.insert(key, node);
                }
                None => {
                    if self.config.null_handling() == NullHandling::Include {
                        object.insert(key, Document::Null);
                    }
                }
            }
        }
        Ok(Document::Object(object))
    }

    fn convert_list(&mut self, value: &dyn List) -> Result<Document, Error> {
        let mut items = Vec::with_capacity(value.len());
        for (index, item) in value.iter().enumerate() {
            self.path.push_index(index);
            let converted = self.convert(item, Position::Element);
            self.path.pop();
            // Elements have no slot to drop; absent items become `Null`.
            items.push(converted?.unwrap_or(Document::Null));
        }
        Ok(Document::Array(items))
    }

    fn convert_map(&mut self, value: &dyn Map) -> Result<Document, Error> {
        let mut object = DocumentObject::with_capacity(value.len());
        for (key, entry) in value.iter() {
            self.path.push_key(key);
            let converted = self.convert(entry, Position::Element);
            self.path.pop();
            object.insert(key, converted?.unwrap_or(Document::Null));
        }
        Ok(Document::Object(object))
    }

    fn convert_wrapper(
        &mut self,
        value: &dyn Wrapper,
        position: Position,
    ) -> Result<Option<Document>, Error> {
        let Some(address) = value.address() else {
            // Uniquely owned: cannot alias, nothing to track.
            return self.convert_referent(value, position);
        };

        let open = self.visits.open_count(address);
        if open > 0 && position == Position::Field {
            log::debug!(
                "omitting back-reference to `{}` at {}",
                value.reflect_type_path(),
                self.path,
            );
            return Ok(None);
        }
        if open >= REENTRY_LIMIT {
            return Err(Error::CircularReference {
                type_path: Cow::Borrowed(value.reflect_type_path()),
            });
        }

        self.visits.push(address);
        let converted = self.convert_referent(value, position);
        self.visits.pop();
        converted
    }

    fn convert_referent(
        &mut self,
        value: &dyn Wrapper,
        position: Position,
    ) -> Result<Option<Document>, Error> {
        let mut converted = None;
        value.with_value(&mut |referent| {
            converted = Some(self.convert(referent, position));
            Ok(())
        })?;
        converted.unwrap_or(Ok(None))
    }

    fn convert_opaque(&mut self, value: &dyn Reflect) -> Result<Document, Error> {
        let capability = self
            .registry
            .get(value.ty_id())
            .and_then(|meta| meta.get_trait::<TypeTraitToDocument>())
            .ok_or_else(|| Error::NotSerializable {
                type_path: Cow::Borrowed(value.reflect_type_path()),
            })?;
        capability.to_document(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::Reflect;
    use crate::document::{Document, DocumentObject};
    use crate::engine::{DeserializeContext, Engine, NullHandling, SerializeContext};
    use crate::error::Error;
    use crate::registry::Adapter;

    crate::reflect_struct! {
        #[derive(Default, Debug)]
        struct Order {
            id: u64,
            order_name: String,
            parts: RefCell<Vec<Rc<Parts>>>,
        }
    }

    crate::reflect_struct! {
        #[derive(Default, Debug)]
        struct Parts {
            id: u64,
            order: RefCell<Option<Rc<Order>>>,
            part: String,
        }
    }

    crate::reflect_struct! {
        #[derive(Default, Debug)]
        struct SelfRef {
            value: String,
            next: RefCell<Option<Rc<SelfRef>>>,
        }
    }

    crate::reflect_struct! {
        #[derive(Default, Debug)]
        struct Node {
            children: RefCell<Vec<Rc<Node>>>,
        }
    }

    fn part(id: u64, order: &Rc<Order>, part: &str) -> Rc<Parts> {
        Rc::new(Parts {
            id,
            order: RefCell::new(Some(order.clone())),
            part: part.to_owned(),
        })
    }

    #[test]
    fn back_references_serialize_as_a_dag() {
        let order = Rc::new(Order {
            id: 1,
            order_name: "Order A".to_owned(),
            parts: RefCell::new(Vec::new()),
        });
        let l1 = part(1, &order, "Part 1");
        let l2 = part(2, &order, "Part 2");
        let l3 = part(3, &order, "Part 3");
        // The same part instance appears twice: shared, not cyclic.
        order
            .parts
            .borrow_mut()
            .extend([l1.clone(), l2.clone(), l3.clone(), l3.clone()]);

        let engine = Engine::builder().register::<Parts>().build();
        let document = engine.serialize(&l1).unwrap();

        let top = document.as_object().unwrap();
        let keys: Vec<&str> = top.keys().collect();
        assert_eq!(keys, ["id", "order", "part"]);

        let nested_order = top.get("order").unwrap().as_object().unwrap();
        assert_eq!(nested_order.get("order_name").unwrap().as_str(), Some("Order A"));

        let parts = nested_order.get("parts").unwrap().as_array().unwrap();
        assert_eq!(parts.len(), 4);

        // The revisited part keeps its scalar fields; its back-reference to
        // the open order is omitted.
        let first = parts[0].as_object().unwrap();
        assert_eq!(first.get("id").unwrap().as_u64(), Some(1));
        assert_eq!(first.get("part").unwrap().as_str(), Some("Part 1"));
        assert!(!first.contains_key("order"));

        // The shared instance is duplicated, not deduped.
        assert_eq!(parts[2], parts[3]);
    }

    #[test]
    fn self_reference_field_is_omitted() {
        let node = Rc::new(SelfRef {
            value: "a".to_owned(),
            next: RefCell::new(None),
        });
        *node.next.borrow_mut() = Some(node.clone());

        let engine = Engine::builder().register::<SelfRef>().build();
        let document = engine.serialize(&node).unwrap();

        let object = document.as_object().unwrap();
        assert_eq!(object.get("value").unwrap().as_str(), Some("a"));
        assert!(!object.contains_key("next"));
    }

    #[test]
    fn omitted_back_reference_follows_null_handling() {
        let node = Rc::new(SelfRef {
            value: "a".to_owned(),
            next: RefCell::new(None),
        });
        *node.next.borrow_mut() = Some(node.clone());

        let engine = Engine::builder()
            .register::<SelfRef>()
            .null_handling(NullHandling::Include)
            .build();
        let document = engine.serialize(&node).unwrap();

        let object = document.as_object().unwrap();
        assert_eq!(object.get("next"), Some(&Document::Null));
    }

    #[test]
    fn self_in_own_collection_is_circular() {
        let node = Rc::new(Node::default());
        node.children.borrow_mut().push(node.clone());

        let engine = Engine::builder().register::<Node>().build();
        match engine.serialize(&node) {
            Err(Error::CircularReference { type_path }) => {
                assert!(type_path.contains("Node"), "unexpected path: {type_path}");
            }
            other => panic!("expected a circular reference fault, got {other:?}"),
        }
    }

    #[test]
    fn sibling_sharing_is_not_a_cycle() {
        let c = Rc::new(Node::default());
        let b = Rc::new(Node {
            children: RefCell::new(vec![c.clone()]),
        });
        let a = Rc::new(Node {
            children: RefCell::new(vec![b.clone(), c.clone()]),
        });

        let engine = Engine::builder().register::<Node>().build();
        let document = engine.serialize(&a).unwrap();

        // `c` is reachable twice through sibling branches and appears twice.
        let children = document
            .as_object()
            .unwrap()
            .get("children")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(children.len(), 2);
        let b_children = children[0]
            .as_object()
            .unwrap()
            .get("children")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(b_children[0], children[1]);
    }

    #[test]
    fn runaway_depth_is_reported() {
        let mut node = Rc::new(SelfRef {
            value: "end".to_owned(),
            next: RefCell::new(None),
        });
        for _ in 0..300 {
            node = Rc::new(SelfRef {
                value: "n".to_owned(),
                next: RefCell::new(Some(node)),
            });
        }

        let engine = Engine::builder().register::<SelfRef>().build();
        match engine.serialize(&node) {
            Err(Error::DepthLimit { limit }) => assert_eq!(limit, 128),
            other => panic!("expected a depth limit fault, got {other:?}"),
        }

        // A raised limit converts the same graph.
        let engine = Engine::builder()
            .register::<SelfRef>()
            .max_depth(4096)
            .build();
        assert!(engine.serialize(&node).is_ok());
    }

    // A hand-written opaque type with no registered conversion capability.
    #[derive(Debug)]
    struct Blob(#[allow(dead_code)] Vec<u8>);

    impl crate::info::Typed for Blob {
        fn type_info() -> &'static crate::info::TypeInfo {
            static CELL: crate::info::NonGenericTypeInfoCell =
                crate::info::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                crate::info::TypeInfo::Opaque(crate::info::OpaqueInfo::new::<Blob>())
            })
        }
    }

    impl Reflect for Blob {
        crate::__impl_reflect_common!(Opaque);
    }

    #[test]
    fn opaque_types_need_a_capability_or_adapter() {
        let engine = Engine::builder().build();
        match engine.serialize(&Blob(vec![1, 2])) {
            Err(Error::NotSerializable { type_path }) => {
                assert!(type_path.contains("Blob"), "unexpected path: {type_path}");
            }
            other => panic!("expected a not-serializable fault, got {other:?}"),
        }

        match engine.deserialize::<Blob>(&Document::Null) {
            Err(Error::UnregisteredType { .. }) => {}
            other => panic!("expected an unregistered type fault, got {other:?}"),
        }
    }

    /// Rebuilds the node by hand and delegates the child back into the
    /// engine, like a custom handler that does not know about cycles.
    struct NaiveSelfRefAdapter;

    impl Adapter for NaiveSelfRefAdapter {
        fn serialize(
            &self,
            value: &dyn Reflect,
            context: &mut SerializeContext,
        ) -> Result<Document, Error> {
            let node = value
                .downcast_ref::<SelfRef>()
                .ok_or_else(|| Error::custom("wrong type"))?;
            let mut object = DocumentObject::new();
            object.insert("property", Document::from("value"));
            let child = node.next.borrow().clone();
            if let Some(child) = child {
                object.insert("child", context.serialize(child.as_reflect())?);
            }
            Ok(Document::Object(object))
        }

        fn deserialize(
            &self,
            _document: &Document,
            _context: &mut DeserializeContext,
        ) -> Result<Box<dyn Reflect>, Error> {
            Err(Error::custom("not used"))
        }
    }

    #[test]
    fn adapter_driven_self_recursion_is_detected() {
        let node = Rc::new(SelfRef {
            value: "a".to_owned(),
            next: RefCell::new(None),
        });
        *node.next.borrow_mut() = Some(node.clone());

        let engine = Engine::builder()
            .register::<SelfRef>()
            .adapter::<SelfRef>(NaiveSelfRefAdapter)
            .build();

        match engine.serialize(&node) {
            Err(Error::CircularReference { .. }) => {}
            other => panic!("expected a circular reference fault, got {other:?}"),
        }
    }

    #[test]
    fn held_borrow_is_reported_not_panicked() {
        let node = Rc::new(Node::default());
        let guard = node.children.borrow_mut();

        let engine = Engine::builder().register::<Node>().build();
        match engine.serialize(&node) {
            Err(Error::Inaccessible { type_path }) => {
                assert!(type_path.contains("RefCell"), "unexpected path: {type_path}");
            }
            other => panic!("expected an inaccessible fault, got {other:?}"),
        }
        drop(guard);
        assert!(engine.serialize(&node).is_ok());
    }
}

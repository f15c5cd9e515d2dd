use crate::Reflect;
use crate::error::Error;

// -----------------------------------------------------------------------------
// Wrapper trait

/// Type-erased operations on an indirection around one referenced value.
///
/// Implemented for `Box`, `Rc`, `Arc`, `Cell`, `RefCell`, and `Mutex`. In
/// safe Rust every aliased or cyclic edge of an object graph passes through
/// a *shared* wrapper (`Rc`, `Arc`), so the serializer's visitation stack
/// tracks exactly the addresses those report: clones of one `Rc` report the
/// same [`address`](Wrapper::address), and an address stays stable for as
/// long as the wrapper is borrowed. Uniquely-owned wrappers cannot alias
/// and report no address; the walker passes through them.
///
/// Access is scoped rather than borrowed out because guard types
/// (`RefCell`, `Mutex`) cannot hand a plain reference past their guard's
/// lifetime.
pub trait Wrapper: Reflect {
    /// The address of the referenced value, if the wrapper is shared.
    ///
    /// `None` for uniquely-owned wrappers, which cannot take part in a
    /// repeated reference.
    fn address(&self) -> Option<usize>;

    /// Grants scoped access to the referenced value.
    ///
    /// Calls `f` exactly once on success and propagates its result. Fails
    /// with [`Error::Inaccessible`] when the referent cannot be borrowed
    /// (for example, a `RefCell` that is currently mutably borrowed).
    fn with_value(
        &self,
        f: &mut dyn FnMut(&dyn Reflect) -> Result<(), Error>,
    ) -> Result<(), Error>;
}

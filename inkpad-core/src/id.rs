//! # IDs
//! Shapes need a reference that survives reordering and deep copies - the selection, the moving
//! gesture, and the host all name a shape by one. This is implemented via the `InkID<T>` type,
//! which generates unique IDs namespaced by the type T. Order of IDs is not guaranteed.
//!
//! To get a process unique ID, simply use `InkID<YourNamespaceTy>`'s `Default` impl.

// Collection of next available ID by type.
static ID_SERVER: parking_lot::RwLock<
    std::collections::BTreeMap<std::any::TypeId, std::sync::atomic::AtomicU64>,
> = parking_lot::const_rwlock(std::collections::BTreeMap::new());

/// ID that is guaranteed unique within this execution of the program.
/// IDs with different types may share a value but should not be considered equal.
///
/// Cloning a value holding an ID clones the ID too - a snapshot of a shape *is* that shape.
pub struct InkID<T: std::any::Any> {
    id: std::num::NonZeroU64,
    // Namespace marker
    _phantom: std::marker::PhantomData<T>,
}
impl<T: std::any::Any> Clone for InkID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: std::any::Any> Copy for InkID<T> {}
impl<T: std::any::Any> std::cmp::PartialEq<InkID<T>> for InkID<T> {
    fn eq(&self, other: &InkID<T>) -> bool {
        self.id == other.id
    }
}
impl<T: std::any::Any> std::cmp::Eq for InkID<T> {}

// Safety - it's just a u64.
// If T is !Send or !Sync that would otherwise carry over to the ID, even though no T is stored.
unsafe impl<T: std::any::Any> Send for InkID<T> {}
unsafe impl<T: std::any::Any> Sync for InkID<T> {}

impl<T: std::any::Any> std::hash::Hash for InkID<T> {
    /// Relies on the internal representation of `TypeID`, which is unstable between compilations.
    /// Do NOT serialize these hashes.
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::any::TypeId::of::<T>().hash(state);
        self.id.hash(state);
    }
}

impl<T: std::any::Any> InkID<T> {
    /// Get the raw numeric value of this ID.
    /// IDs from differing namespaces may share the same numeric ID!
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id.get()
    }
    fn allocate() -> Self {
        let ty = std::any::TypeId::of::<T>();
        // ID of zero is invalid, start at one and go up.
        let id = {
            let read = ID_SERVER.upgradable_read();
            if let Some(atomic) = read.get(&ty) {
                atomic.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            } else {
                // First ID of this namespace - transition to exclusive access.
                // Rare (once per namespace), so the read path stays cheap.
                let mut write = parking_lot::RwLockUpgradableReadGuard::upgrade(read);
                write.insert(ty, 2.into());
                1
            }
        };
        // At one shape per nanosecond, this takes five centuries to hit.
        let Some(id) = std::num::NonZeroU64::new(id) else {
            log::error!("{} ID overflow! Aborting!", std::any::type_name::<T>());
            std::process::abort();
        };
        Self {
            id,
            _phantom: std::marker::PhantomData,
        }
    }
}
impl<T: std::any::Any> Default for InkID<T> {
    fn default() -> Self {
        Self::allocate()
    }
}
impl<T: std::any::Any> std::fmt::Display for InkID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // rsplit always yields at least one element, even for empty strings.
        let name = std::any::type_name::<T>().rsplit("::").next().unwrap_or_default();
        write!(f, "{name}#{}", self.id)
    }
}
impl<T: std::any::Any> std::fmt::Debug for InkID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <InkID<T> as std::fmt::Display>::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::InkID;
    // Tests share the global ID server, so each gets its own namespace.

    #[test]
    fn first_id() {
        struct Namespace;
        type TestID = InkID<Namespace>;

        let id = TestID::default();
        // Not a stable guarantee! Dont rely on this outside of here.
        assert_eq!(id.id(), 1);
    }
    #[test]
    fn unique() {
        struct Namespace;
        type TestID = InkID<Namespace>;

        let mut v: Vec<_> = (0..1024).map(|_| TestID::default()).collect();
        v.sort_unstable_by_key(InkID::id);
        let length_before = v.len();
        v.dedup();
        assert_eq!(length_before, v.len(), "had duplicate ids");
    }
    #[test]
    fn display() {
        struct Namespace;
        let id = InkID::<Namespace>::default();
        assert_eq!(format!("{id}"), "Namespace#1");
        assert_eq!(format!("{id:?}"), "Namespace#1");
    }
    #[test]
    fn copies_are_equal() {
        struct Namespace;
        let a = InkID::<Namespace>::default();
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, InkID::<Namespace>::default());
    }
}

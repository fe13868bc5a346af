use std::sync::Arc;

use parking_lot::Mutex;

use crate::token::ObserverToken;

/// Insertion-ordered, token-deduplicated set of observer handles.
///
/// `O` is the capability trait object the entries implement. The registry
/// never calls the entries itself; it only hands them back out, in
/// registration order, through [`Registry::for_each`].
pub struct Registry<O: ?Sized> {
    entries: Mutex<Vec<(ObserverToken, Arc<O>)>>,
}

impl<O: ?Sized> Registry<O> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Mints a fresh token and registers the observer under it.
    pub fn add(&self, observer: Arc<O>) -> ObserverToken {
        let token = ObserverToken::mint();
        self.insert(token, observer);
        token
    }

    /// Appends `observer` under `token` unless that token is already
    /// present. Re-inserting a registered token is a silent no-op, not a
    /// failure; returns whether the entry was appended.
    pub fn insert(&self, token: ObserverToken, observer: Arc<O>) -> bool {
        let mut entries = self.entries.lock();
        if entries.iter().any(|(existing, _)| *existing == token) {
            return false;
        }
        entries.push((token, observer));
        log::trace!("observer {:?} registered ({} total)", token, entries.len());
        true
    }

    /// Removes the entry for `token`. Removing an unknown or
    /// already-removed token is a no-op; returns whether an entry existed.
    pub fn remove(&self, token: ObserverToken) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != token);
        before != entries.len()
    }

    pub fn contains(&self, token: ObserverToken) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|(existing, _)| *existing == token)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Visits every registered entry once, in registration order,
    /// synchronously on the calling thread.
    ///
    /// Traversal runs over a snapshot taken up front, with membership
    /// re-checked right before each visit: an entry removed mid-traversal
    /// (by an earlier visit, or by its own) is skipped, an entry inserted
    /// mid-traversal waits for the next fan-out, and unrelated entries are
    /// neither skipped nor visited twice. No lock is held while `visit`
    /// runs, so a visit may re-enter the registry freely.
    pub fn for_each(&self, mut visit: impl FnMut(&O)) {
        let snapshot = self.entries.lock().clone();
        for (token, observer) in snapshot {
            if self.contains(token) {
                visit(&observer);
            }
        }
    }
}

impl<O: ?Sized> Default for Registry<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    type Callback = dyn Fn() + Send + Sync;

    fn noop() -> Arc<Callback> {
        Arc::new(|| {})
    }

    #[test]
    fn insert_is_idempotent_per_token() {
        let registry: Registry<Callback> = Registry::new();
        let token = ObserverToken::mint();

        assert!(registry.insert(token, noop()));
        assert!(!registry.insert(token, noop()));
        assert_eq!(registry.len(), 1);

        let mut visits = 0;
        registry.for_each(|_| visits += 1);
        assert_eq!(visits, 1);
    }

    #[test]
    fn remove_unknown_token_is_a_noop() {
        let registry: Registry<Callback> = Registry::new();
        let token = ObserverToken::mint();

        assert!(!registry.remove(token));

        registry.insert(token, noop());
        assert!(registry.remove(token));
        assert!(!registry.remove(token));
        assert!(registry.is_empty());
    }

    #[test]
    fn removed_entry_is_never_visited_again() {
        let registry: Registry<Callback> = Registry::new();
        let kept = registry.add(noop());
        let dropped = registry.add(noop());

        registry.remove(dropped);

        let mut visits = 0;
        registry.for_each(|_| visits += 1);
        assert_eq!(visits, 1);
        assert!(registry.contains(kept));
        assert!(!registry.contains(dropped));
    }

    #[test]
    fn visits_follow_registration_order() {
        let registry: Registry<Callback> = Registry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = order.clone();
            registry.add(Arc::new(move || order.lock().push(name)));
        }

        registry.for_each(|observer| observer());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn entry_removed_mid_traversal_is_skipped() {
        let registry = Arc::new(Registry::<Callback>::new());
        let visited = Arc::new(Mutex::new(Vec::new()));

        let token_c = ObserverToken::mint();
        let first: Arc<Callback> = {
            let registry = registry.clone();
            let visited = visited.clone();
            Arc::new(move || {
                visited.lock().push("a");
                registry.remove(token_c);
            })
        };
        registry.insert(ObserverToken::mint(), first);

        let second: Arc<Callback> = {
            let visited = visited.clone();
            Arc::new(move || visited.lock().push("b"))
        };
        registry.insert(ObserverToken::mint(), second);

        let third: Arc<Callback> = {
            let visited = visited.clone();
            Arc::new(move || visited.lock().push("c"))
        };
        registry.insert(token_c, third);

        registry.for_each(|observer| observer());
        assert_eq!(*visited.lock(), vec!["a", "b"]);
    }

    #[test]
    fn entry_removing_itself_mid_visit_is_safe() {
        let registry = Arc::new(Registry::<Callback>::new());
        let visited = Arc::new(Mutex::new(Vec::new()));

        let token = ObserverToken::mint();
        let suicidal: Arc<Callback> = {
            let registry = registry.clone();
            let visited = visited.clone();
            Arc::new(move || {
                visited.lock().push("self");
                registry.remove(token);
            })
        };
        registry.insert(token, suicidal);

        let bystander: Arc<Callback> = {
            let visited = visited.clone();
            Arc::new(move || visited.lock().push("bystander"))
        };
        registry.insert(ObserverToken::mint(), bystander);

        registry.for_each(|observer| observer());
        assert_eq!(*visited.lock(), vec!["self", "bystander"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn entry_inserted_mid_traversal_waits_for_next_fanout() {
        let registry = Arc::new(Registry::<Callback>::new());
        let visits = Arc::new(Mutex::new(0));

        let inserter: Arc<Callback> = {
            let registry = registry.clone();
            let visits = visits.clone();
            Arc::new(move || {
                *visits.lock() += 1;
                let visits = visits.clone();
                registry.insert(
                    ObserverToken::mint(),
                    Arc::new(move || *visits.lock() += 1),
                );
            })
        };
        registry.insert(ObserverToken::mint(), inserter);

        registry.for_each(|observer| observer());
        assert_eq!(*visits.lock(), 1);
        assert_eq!(registry.len(), 2);
    }
}

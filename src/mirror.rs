use std::sync::Arc;

use parking_lot::Mutex;

use crate::observer::{ContactsObserver, MessagesObserver};
use crate::store::{Store, Subscription};
use crate::token::ObserverToken;

/// A consumer-side cache of both collections, refreshed through the
/// notification callbacks. Reads never touch the store, so a renderer (or
/// any other hot path) can poll the mirror without contending on it.
pub struct Mirror<M, C> {
    messages: Mutex<Vec<M>>,
    contacts: Mutex<Vec<C>>,
}

impl<M, C> Mirror<M, C>
where
    M: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    /// Seeds both caches from the store's current snapshots. The mirror
    /// does not track anything until [`Mirror::subscribe`] is called.
    pub fn new(store: &Store<M, C>) -> Arc<Self> {
        Arc::new(Self {
            messages: Mutex::new(store.messages()),
            contacts: Mutex::new(store.contacts()),
        })
    }

    /// Registers both capabilities under one token. Pass the token back to
    /// [`Store::remove_observer`] to stop tracking.
    pub fn subscribe(self: &Arc<Self>, store: &Store<M, C>) -> ObserverToken {
        store.add_observer(
            Subscription::new()
                .messages(self.clone())
                .contacts(self.clone()),
        )
    }

    pub fn messages(&self) -> Vec<M> {
        self.messages.lock().clone()
    }

    pub fn contacts(&self) -> Vec<C> {
        self.contacts.lock().clone()
    }
}

impl<M, C> MessagesObserver<M> for Mirror<M, C>
where
    M: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    fn messages_set(&self, messages: &[M]) {
        *self.messages.lock() = messages.to_vec();
    }
}

impl<M, C> ContactsObserver<C> for Mirror<M, C>
where
    M: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    fn contacts_set(&self, contacts: &[C]) {
        *self.contacts.lock() = contacts.to_vec();
    }
}

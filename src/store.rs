use std::sync::Arc;

use parking_lot::Mutex;

use crate::observer::{ContactsObserver, MessagesObserver};
use crate::registry::Registry;
use crate::token::ObserverToken;

/// Two observable collections plus one observer registry per notification
/// capability. Setting either collection synchronously notifies every
/// registered observer holding the matching capability, in registration
/// order, on the calling thread.
///
/// All interior state sits behind mutexes, so a `Store` shared across
/// threads is safe. No lock is held while an observer callback runs, so a
/// callback may read from or mutate the store it is observing.
pub struct Store<M, C>
where
    M: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    messages: Mutex<Vec<M>>,
    contacts: Mutex<Vec<C>>,
    message_observers: Registry<dyn MessagesObserver<M>>,
    contact_observers: Registry<dyn ContactsObserver<C>>,
}

/// Which capabilities one registration carries. An observer may supply
/// neither, either, or both handlers; only supplied capabilities are ever
/// invoked.
pub struct Subscription<M, C>
where
    M: 'static,
    C: 'static,
{
    on_messages: Option<Arc<dyn MessagesObserver<M>>>,
    on_contacts: Option<Arc<dyn ContactsObserver<C>>>,
}

impl<M, C> Subscription<M, C>
where
    M: 'static,
    C: 'static,
{
    pub fn new() -> Self {
        Self {
            on_messages: None,
            on_contacts: None,
        }
    }

    pub fn messages(mut self, observer: Arc<dyn MessagesObserver<M>>) -> Self {
        self.on_messages = Some(observer);
        self
    }

    pub fn contacts(mut self, observer: Arc<dyn ContactsObserver<C>>) -> Self {
        self.on_contacts = Some(observer);
        self
    }
}

impl<M, C> Default for Subscription<M, C>
where
    M: 'static,
    C: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M, C> Store<M, C>
where
    M: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            contacts: Mutex::new(Vec::new()),
            message_observers: Registry::new(),
            contact_observers: Registry::new(),
        }
    }

    /// Snapshot of the current message list. The store's own list cannot be
    /// reached through the return value.
    pub fn messages(&self) -> Vec<M> {
        self.messages.lock().clone()
    }

    /// Snapshot of the current contact list.
    pub fn contacts(&self) -> Vec<C> {
        self.contacts.lock().clone()
    }

    /// Replaces the message list and notifies every observer with the
    /// messages capability. This is a "set" event, not a "changed" event:
    /// the fan-out fires on every call, including one assigning a value
    /// identical to the current one.
    pub fn set_messages(&self, messages: Vec<M>) {
        let snapshot = {
            let mut current = self.messages.lock();
            *current = messages;
            current.clone()
        };
        log::debug!(
            "messages set, notifying {} observer(s)",
            self.message_observers.len()
        );
        self.message_observers
            .for_each(|observer| observer.messages_set(&snapshot));
    }

    /// Replaces the contact list and notifies every observer with the
    /// contacts capability. Fires unconditionally, like [`Store::set_messages`].
    pub fn set_contacts(&self, contacts: Vec<C>) {
        let snapshot = {
            let mut current = self.contacts.lock();
            *current = contacts;
            current.clone()
        };
        log::debug!(
            "contacts set, notifying {} observer(s)",
            self.contact_observers.len()
        );
        self.contact_observers
            .for_each(|observer| observer.contacts_set(&snapshot));
    }

    /// Registers one observer under one freshly minted token. Each supplied
    /// capability handler lands in the matching registry; a subscription
    /// carrying no capability still yields a valid token that observes
    /// nothing.
    pub fn add_observer(&self, subscription: Subscription<M, C>) -> ObserverToken {
        let token = ObserverToken::mint();
        if let Some(observer) = subscription.on_messages {
            self.message_observers.insert(token, observer);
        }
        if let Some(observer) = subscription.on_contacts {
            self.contact_observers.insert(token, observer);
        }
        token
    }

    /// Detaches every capability registered under `token`. Removing an
    /// unknown or already-removed token is a no-op.
    pub fn remove_observer(&self, token: ObserverToken) {
        self.message_observers.remove(token);
        self.contact_observers.remove(token);
    }
}

impl<M, C> Default for Store<M, C>
where
    M: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

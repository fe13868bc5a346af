/// Capability: be told whenever the message list is set.
///
/// Fires on every assignment, including one that writes a value identical
/// to the current one.
pub trait MessagesObserver<M>: Send + Sync {
    fn messages_set(&self, messages: &[M]);
}

/// Capability: be told whenever the contact list is set.
pub trait ContactsObserver<C>: Send + Sync {
    fn contacts_set(&self, contacts: &[C]);
}

/// Adapter letting a plain closure serve as either capability.
pub struct FnObserver<F>(pub F);

impl<M, F> MessagesObserver<M> for FnObserver<F>
where
    F: Fn(&[M]) + Send + Sync,
{
    fn messages_set(&self, messages: &[M]) {
        (self.0)(messages)
    }
}

impl<C, F> ContactsObserver<C> for FnObserver<F>
where
    F: Fn(&[C]) + Send + Sync,
{
    fn contacts_set(&self, contacts: &[C]) {
        (self.0)(contacts)
    }
}

mod mirror;
mod observer;
mod registry;
mod store;
mod token;

pub use mirror::Mirror;
pub use observer::ContactsObserver;
pub use observer::FnObserver;
pub use observer::MessagesObserver;
pub use registry::Registry;
pub use store::Store;
pub use store::Subscription;
pub use token::ObserverToken;

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Identity of one registration. Comparing tokens is the only notion of
/// "same observer"; the observer object itself is never compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverToken(u64);

impl ObserverToken {
    pub(crate) fn mint() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minted_tokens_are_distinct() {
        let a = ObserverToken::mint();
        let b = ObserverToken::mint();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}

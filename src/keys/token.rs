//! # Identity-keyed tokens.
//!
//! A [`Token`] is an opaque key that is equal only to itself and its
//! clones. Two tokens created with the same label are still distinct:
//! equality and hashing go through the token's unique allocation, not
//! its label. The label exists purely for diagnostics.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Opaque unique key.
///
/// Cloning preserves identity; constructing does not:
///
/// ```
/// use eventry::Token;
///
/// let a = Token::new("ready");
/// let b = Token::new("ready");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Token {
    label: Cow<'static, str>,
    slot: Arc<()>,
}

impl Token {
    /// Creates a fresh token carrying a diagnostic label.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            slot: Arc::new(()),
        }
    }

    /// Returns the diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.slot) as usize).hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.label)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_label_distinct_identity() {
        let a = Token::new("x");
        let b = Token::new("x");
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_preserves_identity() {
        let a = Token::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_follows_identity() {
        let a = Token::new("x");
        let b = Token::new("x");

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&a));
        assert!(!set.contains(&b));
    }
}

//! # Emitter configuration.
//!
//! [`EmitterConfig`] carries the optional strict-key policy. The policy
//! is checked at the registration boundary, before the registry is
//! touched; dispatch and removal are never policy-checked.
//!
//! ## Field semantics
//! - `strict = false` → `allowed_keys` is ignored, any key registers.
//! - `strict = true` → registration of a key outside `allowed_keys`
//!   fails with [`RegistryError::KeyNotAllowed`](crate::RegistryError).

use std::collections::HashSet;

use crate::error::RegistryError;
use crate::keys::Key;

/// Configuration for an [`Emitter`](crate::Emitter).
///
/// ## Example
/// ```
/// use eventry::EmitterConfig;
///
/// let cfg = EmitterConfig::strict(["open", "close"]);
/// assert!(cfg.strict);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EmitterConfig {
    /// Whether registration is restricted to `allowed_keys`.
    pub strict: bool,
    /// Allow-list consulted only when `strict` is set.
    pub allowed_keys: HashSet<Key>,
}

impl EmitterConfig {
    /// Builds a strict configuration from an allow-list of keys.
    pub fn strict<K, I>(keys: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        Self {
            strict: true,
            allowed_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Enforces the policy for one registration.
    pub(crate) fn check(&self, key: &Key) -> Result<(), RegistryError> {
        if self.strict && !self.allowed_keys.contains(key) {
            return Err(RegistryError::KeyNotAllowed { key: key.clone() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_any_key() {
        let cfg = EmitterConfig::default();
        assert!(cfg.check(&Key::from("anything")).is_ok());
    }

    #[test]
    fn test_strict_rejects_unknown_key() {
        let cfg = EmitterConfig::strict(["event"]);
        assert!(cfg.check(&Key::from("event")).is_ok());
        assert!(matches!(
            cfg.check(&Key::from("test")),
            Err(RegistryError::KeyNotAllowed { .. })
        ));
    }
}

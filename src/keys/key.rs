//! # Key: the identifier handlers are grouped under.
//!
//! [`Key`] is the hashable identifier accepted by every registration and
//! dispatch entry point. String keys compare by content; token keys
//! compare by identity (see [`Token`]).

use std::fmt;
use std::sync::Arc;

use crate::keys::Token;

/// Identifier under which handlers are grouped.
///
/// Every public entry point takes `impl Into<Key>`, so plain string
/// literals and [`Token`]s both work:
///
/// ```
/// use eventry::{Key, Token};
///
/// let by_name: Key = "connect".into();
/// let by_token: Key = Token::new("connect").into();
/// assert_ne!(by_name, by_token);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    /// String key, compared by content.
    Name(Arc<str>),
    /// Opaque token key, compared by identity.
    Token(Token),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(Arc::from(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(Arc::from(name))
    }
}

impl From<Token> for Key {
    fn from(token: Token) -> Self {
        Key::Token(token)
    }
}

impl From<&Token> for Key {
    fn from(token: &Token) -> Self {
        Key::Token(token.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Token(token) => write!(f, "{token}"),
        }
    }
}

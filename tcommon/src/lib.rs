//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use tcommon::{ConversationId, Registry, TraceId};
//!
//! let conversation = ConversationId::from("conversation-1");
//! let trace = TraceId::new("trace-1");
//! let mut registry = Registry::new();
//! registry.try_insert("double".to_string(), 2_u32).unwrap();
//!
//! assert_eq!(conversation.as_str(), "conversation-1");
//! assert_eq!(trace.to_string(), "trace-1");
//! assert_eq!(registry.get("double"), Some(&2));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use tcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Identifier newtypes shared across crates.

    use std::fmt::{Display, Formatter};

    /// Key under which one conversation's state is persisted between calls.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct ConversationId(String);

    impl ConversationId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
    }

    impl Display for ConversationId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for ConversationId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for ConversationId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct TraceId(String);

    impl TraceId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for TraceId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for TraceId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for TraceId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod registry {
    //! Insertion-ordered registry used by runtime registries.
    //!
    //! Entries keep the order they were inserted in, and an existing key is
    //! never replaced.
    //!
    //! ```rust
    //! use tcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.try_insert("beta".to_string(), 2_u32).unwrap();
    //! registry.try_insert("alpha".to_string(), 1_u32).unwrap();
    //!
    //! assert_eq!(registry.try_insert("beta".to_string(), 3), Err(3));
    //! assert_eq!(registry.keys().collect::<Vec<_>>(), ["beta", "alpha"]);
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        entries: Vec<(K, V)>,
        index: HashMap<K, usize>,
    }

    impl<K, V> Default for Registry<K, V> {
        fn default() -> Self {
            Self {
                entries: Vec::new(),
                index: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts `value` under `key` unless the key is taken, in which case
        /// the rejected value is handed back and the first entry stays.
        pub fn try_insert(&mut self, key: K, value: V) -> Result<(), V> {
            if self.index.contains_key(&key) {
                return Err(value);
            }

            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
            Ok(())
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.index
                .get(key)
                .and_then(|position| self.entries.get(*position))
                .map(|(_, value)| value)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.index.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.entries.iter().map(|(key, _)| key)
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.entries.iter().map(|(_, value)| value)
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }
}

pub use context::{ConversationId, TraceId};
pub use future::BoxFuture;
pub use registry::Registry;

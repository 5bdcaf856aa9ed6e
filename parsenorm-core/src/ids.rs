//! Dense token id allocation

use std::collections::HashMap;
use std::fmt;

use crate::error::AllocationError;

/// Opaque identity of a raw token, assigned by the adapter.
///
/// Handles must be unique among the tokens an adapter returns for one span;
/// an arena index or a document-level token position both qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenHandle(pub usize);

/// Request-wide token identity: the span a token was parsed in plus its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    /// Index of the span in the request
    pub span: usize,
    /// Adapter-assigned handle
    pub handle: TokenHandle,
}

impl TokenKey {
    /// Create a key
    pub fn new(span: usize, handle: TokenHandle) -> Self {
        Self { span, handle }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "span {} / handle {}", self.span, self.handle.0)
    }
}

/// Assigns ids `0..n` in registration order
#[derive(Debug, Default)]
pub struct TokenIdAllocator {
    mapping: HashMap<TokenKey, usize>,
    order: Vec<TokenKey>,
}

impl TokenIdAllocator {
    /// Create an empty allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token and return its id
    pub fn add(&mut self, key: TokenKey) -> Result<usize, AllocationError> {
        let id = self.next_id();
        self.insert(key, id)?;
        Ok(id)
    }

    /// Register a token under an explicit id, which must be the next one
    pub fn insert(&mut self, key: TokenKey, id: usize) -> Result<(), AllocationError> {
        if self.mapping.contains_key(&key) {
            return Err(AllocationError::AlreadyRegistered(key));
        }
        let expected = self.next_id();
        if id != expected {
            return Err(AllocationError::OutOfOrder {
                expected,
                found: id,
            });
        }
        self.mapping.insert(key, id);
        self.order.push(key);
        Ok(())
    }

    /// Id of a registered token
    pub fn get(&self, key: &TokenKey) -> Option<usize> {
        self.mapping.get(key).copied()
    }

    /// The id the next registration receives
    pub fn next_id(&self) -> usize {
        self.order.len()
    }

    /// Number of registered tokens
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Mark the current position for a later [`rollback`](Self::rollback)
    pub fn checkpoint(&self) -> usize {
        self.order.len()
    }

    /// Forget every registration made after `checkpoint`
    pub fn rollback(&mut self, checkpoint: usize) {
        if checkpoint >= self.order.len() {
            return;
        }
        for key in self.order.drain(checkpoint..) {
            self.mapping.remove(&key);
        }
    }
}

use std::collections::HashMap;

/// Composite correlation key. JSON-RPC ids are only unique per connection,
/// so the server is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub server_id: String,
    pub id: String,
}

impl MessageKey {
    pub fn new(server_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            id: id.into(),
        }
    }
}

/// Half-open request/response table.
///
/// Requests are opened under their key and removed when the matching
/// response closes them. Whatever is still open at end of stream never got
/// a response. The table lives for exactly one parse.
#[derive(Debug)]
pub struct Correlator<T> {
    pending: HashMap<MessageKey, T>,
}

impl<T> Default for Correlator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Correlator<T> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Record an outstanding request. Returns the entry it displaced when the
    /// same id is reused on the same server before a response arrived.
    pub fn open(&mut self, key: MessageKey, pending: T) -> Option<T> {
        self.pending.insert(key, pending)
    }

    /// Match a response, removing the request from the table
    pub fn close(&mut self, key: &MessageKey) -> Option<T> {
        self.pending.remove(key)
    }

    /// Consume the table, yielding every request that was never answered
    pub fn into_unmatched(self) -> impl Iterator<Item = (MessageKey, T)> {
        self.pending.into_iter()
    }
}

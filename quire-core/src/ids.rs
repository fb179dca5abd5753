//! Per-document id allocation

use std::collections::HashMap;

/// Kind-keyed counter handing out `kind1`, `kind2`, ... for each kind.
///
/// Each [`Document`](crate::Document) owns one allocator, so ids are unique
/// per kind within a document and independent across documents.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    counters: HashMap<String, u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `kind`
    pub fn next_id(&mut self, kind: &str) -> String {
        let counter = self.counters.entry(kind.to_string()).or_insert(0);
        *counter += 1;
        format!("{kind}{counter}")
    }

    /// Number of ids handed out so far for `kind`
    pub fn issued(&self, kind: &str) -> u32 {
        self.counters.get(kind).copied().unwrap_or(0)
    }
}

use std::collections::HashMap;

/// A fully formatted paper: both serializations of one paginated manuscript,
/// ready to hand to a preview or download surface
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedPaper {
    pub title: String,
    pub html: String,
    pub pdf_bytes: Vec<u8>,
}

/// Keyed storage of formatted papers, injected into whatever serves them.
/// Implementations decide lifetime and eviction; the engine itself never
/// touches storage.
pub trait ArtifactStore {
    fn put(&mut self, id: String, paper: FormattedPaper);
    fn get(&self, id: &str) -> Option<&FormattedPaper>;
}

/// In-memory store, suitable for a single-process service or tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    papers: HashMap<String, FormattedPaper>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&mut self, id: String, paper: FormattedPaper) {
        self.papers.insert(id, paper);
    }

    fn get(&self, id: &str) -> Option<&FormattedPaper> {
        self.papers.get(id)
    }
}

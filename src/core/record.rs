use super::family::LibraryFamily;

/// One corpus entry as delivered by a record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Source-specific identifier (dataset hash, relative path, line number).
    pub id: String,
    pub content: String,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// A record accepted into exactly one library family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSample {
    pub record: RawRecord,
    pub family: LibraryFamily,
}

impl ClassifiedSample {
    pub fn code(&self) -> &str {
        &self.record.content
    }
}

//! Library classification: cheap trigger check, then the family's filter.
//!
//! Families are evaluated in table order and the first family whose trigger
//! appears in the blob is the only one tried. If its structural filter
//! rejects, the record is rejected even when another family's trigger is
//! also present.

use tracing::debug;

use super::{
    family::{CorpusKind, LibraryFamily},
    filters::{Filter, StructuralFilter},
    record::{ClassifiedSample, RawRecord},
};

/// One row of the classification table.
#[derive(Debug, Clone)]
pub struct FamilyRule {
    pub family: LibraryFamily,
    filter: Filter,
}

impl FamilyRule {
    pub fn new(family: LibraryFamily) -> Self {
        Self {
            family,
            filter: Filter::for_family(family),
        }
    }

    pub fn triggers(&self) -> &'static [&'static str] {
        self.family.triggers()
    }
}

/// Outcome of classifying one blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No family's trigger appears in the blob.
    NoTrigger,
    /// The first triggered family's structural filter rejected the blob.
    Rejected(LibraryFamily),
    Accepted(LibraryFamily),
}

impl Verdict {
    pub fn accepted(self) -> Option<LibraryFamily> {
        match self {
            Verdict::Accepted(family) => Some(family),
            _ => None,
        }
    }
}

/// Ordered first-match-wins classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<FamilyRule>,
}

impl Classifier {
    /// Build a classifier trying `families` in the given order.
    /// Duplicates after the first occurrence are ignored.
    pub fn new(families: &[LibraryFamily]) -> Self {
        let mut rules: Vec<FamilyRule> = Vec::with_capacity(families.len());
        for &family in families {
            if !rules.iter().any(|r| r.family == family) {
                rules.push(FamilyRule::new(family));
            }
        }
        Self { rules }
    }

    /// Every known family in declaration order.
    pub fn all() -> Self {
        Self::new(&LibraryFamily::ALL)
    }

    /// Only the families of `enabled` drawn from the given corpus slice.
    pub fn for_corpus(corpus: CorpusKind, enabled: &[LibraryFamily]) -> Self {
        let families: Vec<LibraryFamily> = enabled
            .iter()
            .copied()
            .filter(|f| f.corpus() == corpus)
            .collect();
        Self::new(&families)
    }

    pub fn families(&self) -> impl Iterator<Item = LibraryFamily> + '_ {
        self.rules.iter().map(|r| r.family)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn evaluate(&self, code: &str) -> Verdict {
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.triggers().iter().any(|t| code.contains(t)))
        else {
            return Verdict::NoTrigger;
        };

        if rule.filter.accepts(code) {
            Verdict::Accepted(rule.family)
        } else {
            Verdict::Rejected(rule.family)
        }
    }

    /// Tag a record with its family, or `None` if it is rejected.
    pub fn classify(&self, record: RawRecord) -> Option<ClassifiedSample> {
        match self.evaluate(&record.content) {
            Verdict::Accepted(family) => Some(ClassifiedSample { record, family }),
            Verdict::Rejected(family) => {
                debug!("{}: {} trigger matched but structural filter rejected", record.id, family);
                None
            }
            Verdict::NoTrigger => None,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::all()
    }
}

//! The sampling pass: records in, stored samples out.
//!
//! Records are consumed one at a time in delivery order. Each one is
//! classified, language-checked against the prose of its corpus and, if
//! accepted, persisted. The pass stops early once the requested number of
//! samples has been accepted.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    core::{
        Classifier, DetectorBackend, LanguageFilter, LanguageTag, LanguageVerdict, LibraryFamily,
        RawRecord, Verdict,
    },
    store::{SampleWriter, WriteOutcome},
};

/// What happened to a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    NoTrigger,
    /// A trigger matched but the structural filter said no.
    Rejected(LibraryFamily),
    WrongLanguage {
        family: LibraryFamily,
        language: LanguageTag,
    },
    Stored(WriteOutcome),
}

impl SampleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SampleOutcome::Stored(_))
    }
}

/// Counters for one sampling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleStats {
    pub scanned: usize,
    pub no_trigger: usize,
    pub rejected: usize,
    pub wrong_language: usize,
    pub written: usize,
    pub already_stored: usize,
    /// Accepted samples per family, in classifier order.
    pub per_family: Vec<(LibraryFamily, usize)>,
    pub elapsed: Duration,
}

impl SampleStats {
    /// Samples that passed every check, whether or not a file was written.
    pub fn accepted(&self) -> usize {
        self.written + self.already_stored
    }

    fn record(&mut self, outcome: &SampleOutcome) {
        self.scanned += 1;
        match outcome {
            SampleOutcome::NoTrigger => self.no_trigger += 1,
            SampleOutcome::Rejected(_) => self.rejected += 1,
            SampleOutcome::WrongLanguage { .. } => self.wrong_language += 1,
            SampleOutcome::Stored(stored) => {
                if stored.is_written() {
                    self.written += 1;
                } else {
                    self.already_stored += 1;
                }
                let family = stored.sample().family;
                match self.per_family.iter_mut().find(|(f, _)| *f == family) {
                    Some((_, count)) => *count += 1,
                    None => self.per_family.push((family, 1)),
                }
            }
        }
    }
}

/// Classifier, language filter and writer wired together.
pub struct Sampler<B> {
    classifier: Classifier,
    language: LanguageFilter<B>,
    writer: SampleWriter,
}

impl<B: DetectorBackend> Sampler<B> {
    pub fn new(classifier: Classifier, language: LanguageFilter<B>, writer: SampleWriter) -> Self {
        Self {
            classifier,
            language,
            writer,
        }
    }

    pub fn writer(&self) -> &SampleWriter {
        &self.writer
    }

    /// Run one record through the pipeline.
    ///
    /// Only a failed write is an error; every rejection is an outcome.
    pub fn process(&mut self, record: &RawRecord) -> Result<SampleOutcome> {
        let family = match self.classifier.evaluate(&record.content) {
            Verdict::NoTrigger => return Ok(SampleOutcome::NoTrigger),
            Verdict::Rejected(family) => {
                debug!("{}: rejected by {} filter", record.id, family);
                return Ok(SampleOutcome::Rejected(family));
            }
            Verdict::Accepted(family) => family,
        };

        if let LanguageVerdict::Detected {
            language,
            accepted: false,
        } = self.language.check(&record.content, family.corpus())
        {
            debug!("{}: {} sample rejected, language {}", record.id, family, language);
            return Ok(SampleOutcome::WrongLanguage { family, language });
        }

        let stored = self.writer.write(family, &record.content)?;
        Ok(SampleOutcome::Stored(stored))
    }

    /// Consume `records` until exhausted or `max` samples were accepted.
    pub fn run<I>(&mut self, records: I, max: Option<usize>) -> Result<SampleStats>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let start = Instant::now();
        let mut stats = SampleStats::default();

        if max != Some(0) {
            for record in records {
                let outcome = self.process(&record)?;
                stats.record(&outcome);
                if let Some(max) = max
                    && stats.accepted() >= max
                {
                    info!("reached {} accepted samples, stopping", max);
                    break;
                }
            }
        }

        stats.per_family.sort_by_key(|(family, _)| {
            self.classifier
                .families()
                .position(|f| f == *family)
                .unwrap_or(usize::MAX)
        });
        stats.elapsed = start.elapsed();
        Ok(stats)
    }
}

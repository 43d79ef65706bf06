//! Sightline Extractor
//!
//! The single formal parser of the pipeline. It turns raw evidence sources
//! into [`EvidenceCandidate`]s; nothing downstream ever reads raw text.
//!
//! # Sources
//!
//! - **Evidence records**: line-oriented, fixed field order
//!   (`[date][tier][axis] "excerpt" (impact: kpi) <locator>`)
//! - **Evidence store**: a JSON document with CONFIRMED / UNCERTAIN / HYPOTHESES buckets
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → EvidenceCandidate → Gatekeeper → EvidenceFact
//! ```
//!
//! # Example Usage
//!
//! ```
//! use sightline_extractor::{EvidenceSource, Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default());
//! let text = r#"[2026-09-30][P][momentum] "Orders rose 18%." (impact: +order_backlog_growth_pct=18 %) <https://www.sec.gov/x.htm#:~:text=Orders>"#;
//! let extraction = extractor.parse(&EvidenceSource::Records(text.to_string())).unwrap();
//! assert_eq!(extraction.candidates.len(), 1);
//! assert!(extraction.skipped.is_empty());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod parser;
mod store;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use parser::{parse_record_line, parse_records};
pub use sightline_domain::{EvidenceCandidate, RawLocator, SkippedInput};
pub use store::parse_evidence_store;

use tracing::{info, warn};

/// Candidates parsed from evidence sources, plus the input that was skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Parsed candidates, in source order
    pub candidates: Vec<EvidenceCandidate>,
    /// Lines or entries that could not be parsed
    pub skipped: Vec<SkippedInput>,
}

/// A raw evidence source handed over by the calling application
#[derive(Debug, Clone)]
pub enum EvidenceSource {
    /// Line-oriented evidence records
    Records(String),
    /// Evidence-store JSON document
    Store(String),
}

/// Parses evidence sources into candidates
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse one source
    pub fn parse(&self, source: &EvidenceSource) -> Result<Extraction, ExtractorError> {
        self.config.validate().map_err(ExtractorError::Config)?;
        let extraction = match source {
            EvidenceSource::Records(text) => parse_records(text, &self.config)?,
            EvidenceSource::Store(json) => parse_evidence_store(json, &self.config)?,
        };
        info!(
            count = extraction.candidates.len(),
            skipped = extraction.skipped.len(),
            "Extracted evidence candidates"
        );
        Ok(extraction)
    }

    /// Parse several sources into one ordered extraction
    ///
    /// Every source must be usable: the first one that is empty or
    /// structurally unparseable fails the whole call, so a decision is never
    /// built from a silently partial evidence set. Skipped locations are
    /// prefixed with the 1-based source number.
    pub fn parse_all(&self, sources: &[EvidenceSource]) -> Result<Extraction, ExtractorError> {
        if sources.is_empty() {
            return Err(ExtractorError::Empty);
        }

        let mut extraction = Extraction::default();
        for (index, source) in sources.iter().enumerate() {
            let parsed = self.parse(source).map_err(|e| {
                warn!("Evidence source {} rejected: {}", index + 1, e);
                e
            })?;
            extraction.candidates.extend(parsed.candidates);
            extraction
                .skipped
                .extend(parsed.skipped.into_iter().map(|skipped| {
                    SkippedInput::new(
                        format!("source {}, {}", index + 1, skipped.location),
                        skipped.reason,
                    )
                }));
        }
        Ok(extraction)
    }
}

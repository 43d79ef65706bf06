//! Anchor checks: text-fragment URLs and backup locators

use crate::ValidationConfig;
use sha2::{Digest, Sha256};
use sightline_domain::{EvidenceCandidate, Locator, ValidationFailure};
use url::Url;

/// Marker that introduces a text-fragment directive inside a URL fragment
pub const TEXT_FRAGMENT_MARKER: &str = ":~:text=";

/// Prefix of derived content hashes
pub const HASH_PREFIX: &str = "sha256:";

/// Normalize an excerpt for hashing: surrounding quotes stripped, whitespace
/// collapsed, lower-cased
pub fn normalize_excerpt(excerpt: &str) -> String {
    let trimmed = excerpt
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’'));
    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `sha256:<hex>` of the normalized excerpt
///
/// ```
/// use sightline_gatekeeper::content_hash;
///
/// assert_eq!(content_hash("Orders rose  18%."), content_hash("\"orders rose 18%.\""));
/// assert!(content_hash("x").starts_with("sha256:"));
/// ```
pub fn content_hash(excerpt: &str) -> String {
    let digest = Sha256::digest(normalize_excerpt(excerpt).as_bytes());
    format!("{}{}", HASH_PREFIX, hex::encode(digest))
}

/// A locator check that failed, with a human-readable detail
pub(crate) type AnchorFailure = (ValidationFailure, String);

/// A resolved anchor plus the host its tier is judged by
pub(crate) struct ResolvedAnchor {
    pub locator: Locator,
    pub host: String,
}

/// Resolve a candidate's raw anchor fields into exactly one accepted locator form
pub(crate) fn resolve_locator(
    candidate: &EvidenceCandidate,
    config: &ValidationConfig,
) -> Result<ResolvedAnchor, AnchorFailure> {
    let raw = &candidate.locator;
    let url_str = match raw.url.as_deref().map(str::trim) {
        Some(u) if !u.is_empty() => u,
        _ => {
            return Err((
                ValidationFailure::MissingAnchor,
                "no source URL supplied".to_string(),
            ))
        }
    };

    let url = Url::parse(url_str).map_err(|e| {
        (
            ValidationFailure::InvalidAnchorFormat,
            format!("'{}' is not a valid URL: {}", url_str, e),
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err((
            ValidationFailure::InvalidAnchorFormat,
            format!("unsupported URL scheme '{}'", url.scheme()),
        ));
    }
    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => {
            return Err((
                ValidationFailure::InvalidAnchorFormat,
                format!("'{}' has no host", url_str),
            ))
        }
    };

    let pdf_like = is_pdf_like(&url, config);
    let fragment = url
        .fragment()
        .and_then(|f| f.find(TEXT_FRAGMENT_MARKER).map(|at| &f[at + TEXT_FRAGMENT_MARKER.len()..]));

    let locator = match fragment {
        Some(text) => text_fragment(url_str, text, pdf_like, candidate)?,
        None => backup(&url, pdf_like, candidate, config)?,
    };

    Ok(ResolvedAnchor { locator, host })
}

fn is_pdf_like(url: &Url, config: &ValidationConfig) -> bool {
    let path = url.path().to_lowercase();
    config
        .pdf_suffixes
        .iter()
        .any(|suffix| path.ends_with(&suffix.to_lowercase()))
}

fn text_fragment(
    url_str: &str,
    text: &str,
    pdf_like: bool,
    candidate: &EvidenceCandidate,
) -> Result<Locator, AnchorFailure> {
    if pdf_like {
        return Err((
            ValidationFailure::UnsupportedSourceFormat,
            "PDF-like sources require a backup locator, not a text fragment".to_string(),
        ));
    }
    if text.trim().is_empty() {
        return Err((
            ValidationFailure::InvalidAnchorFormat,
            "text fragment is empty".to_string(),
        ));
    }
    if candidate.locator.has_backup_fields() {
        return Err((
            ValidationFailure::InvalidAnchorFormat,
            "both a text fragment and backup fields were supplied".to_string(),
        ));
    }

    Ok(Locator::TextFragment {
        url: url_str.to_string(),
        fragment: text.to_string(),
    })
}

fn backup(
    url: &Url,
    pdf_like: bool,
    candidate: &EvidenceCandidate,
    config: &ValidationConfig,
) -> Result<Locator, AnchorFailure> {
    let raw = &candidate.locator;

    match raw.page {
        Some(0) => {
            return Err((
                ValidationFailure::InvalidAnchorFormat,
                "page numbers start at 1".to_string(),
            ))
        }
        None if pdf_like => {
            return Err((
                ValidationFailure::InvalidAnchorFormat,
                "PDF-like source without a page number".to_string(),
            ))
        }
        _ => {}
    }

    let quote = raw
        .quote
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| candidate.excerpt.trim());
    if quote.is_empty() {
        return Err((
            ValidationFailure::MissingAnchor,
            "no text-fragment anchor and nothing to quote".to_string(),
        ));
    }

    let hashed_text = if candidate.excerpt.trim().is_empty() {
        quote
    } else {
        candidate.excerpt.as_str()
    };
    let derived = content_hash(hashed_text);

    if config.verify_content_hash {
        if let Some(supplied) = raw.content_hash.as_deref() {
            let supplied = supplied.trim().to_lowercase();
            let supplied = if supplied.starts_with(HASH_PREFIX) {
                supplied
            } else {
                format!("{}{}", HASH_PREFIX, supplied)
            };
            if supplied != derived {
                return Err((
                    ValidationFailure::InvalidAnchorFormat,
                    "supplied content hash does not match the excerpt".to_string(),
                ));
            }
        }
    }

    let mut source = url.clone();
    source.set_fragment(None);

    Ok(Locator::Backup {
        url: source.to_string(),
        page: raw.page,
        quote: quote.to_string(),
        content_hash: derived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sightline_domain::{AxisId, ProvenanceTier, RawLocator};

    fn candidate(excerpt: &str, locator: RawLocator) -> EvidenceCandidate {
        EvidenceCandidate::new(
            NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
            ProvenanceTier::Primary,
            AxisId::Momentum,
            excerpt,
            "order_backlog_growth_pct",
            locator,
        )
    }

    fn resolve(c: &EvidenceCandidate) -> Result<Locator, ValidationFailure> {
        resolve_locator(c, &ValidationConfig::default())
            .map(|r| r.locator)
            .map_err(|(f, _)| f)
    }

    #[test]
    fn test_text_fragment_accepted() {
        let c = candidate(
            "Orders rose 18%.",
            RawLocator::url("https://www.sec.gov/x.htm#:~:text=Orders%20rose"),
        );
        match resolve(&c).unwrap() {
            Locator::TextFragment { url, fragment } => {
                assert_eq!(url, "https://www.sec.gov/x.htm#:~:text=Orders%20rose");
                assert_eq!(fragment, "Orders%20rose");
            }
            other => panic!("Expected TextFragment, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_url() {
        let c = candidate("Orders rose 18%.", RawLocator::default());
        assert_eq!(resolve(&c), Err(ValidationFailure::MissingAnchor));
    }

    #[test]
    fn test_bad_scheme_and_garbage() {
        let c = candidate("x", RawLocator::url("ftp://files.example.com/a"));
        assert_eq!(resolve(&c), Err(ValidationFailure::InvalidAnchorFormat));
        let c = candidate("x", RawLocator::url("not a url"));
        assert_eq!(resolve(&c), Err(ValidationFailure::InvalidAnchorFormat));
    }

    #[test]
    fn test_pdf_with_fragment_unsupported() {
        let c = candidate(
            "Orders rose 18%.",
            RawLocator::url("https://ir.example.com/q3.PDF#:~:text=Orders"),
        );
        assert_eq!(resolve(&c), Err(ValidationFailure::UnsupportedSourceFormat));
    }

    #[test]
    fn test_empty_fragment_invalid() {
        let c = candidate("x", RawLocator::url("https://www.sec.gov/x.htm#:~:text="));
        assert_eq!(resolve(&c), Err(ValidationFailure::InvalidAnchorFormat));
    }

    #[test]
    fn test_fragment_plus_backup_invalid() {
        let mut locator = RawLocator::url("https://www.sec.gov/x.htm#:~:text=Orders");
        locator.page = Some(2);
        let c = candidate("Orders rose 18%.", locator);
        assert_eq!(resolve(&c), Err(ValidationFailure::InvalidAnchorFormat));
    }

    #[test]
    fn test_pdf_backup_requires_page() {
        let c = candidate("Orders rose 18%.", RawLocator::url("https://ir.example.com/q3.pdf"));
        assert_eq!(resolve(&c), Err(ValidationFailure::InvalidAnchorFormat));

        let mut locator = RawLocator::url("https://ir.example.com/q3.pdf");
        locator.page = Some(12);
        let c = candidate("Orders rose 18%.", locator);
        match resolve(&c).unwrap() {
            Locator::Backup { page, quote, content_hash, .. } => {
                assert_eq!(page, Some(12));
                assert_eq!(quote, "Orders rose 18%.");
                assert_eq!(content_hash, super::content_hash("Orders rose 18%."));
            }
            other => panic!("Expected Backup, got {:?}", other),
        }
    }

    #[test]
    fn test_backup_hash_is_deterministic() {
        let c = candidate("Orders  rose 18%.", RawLocator::url("https://news.example.com/a"));
        let a = resolve(&c).unwrap();
        let b = resolve(&c).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_supplied_hash_must_match() {
        let mut locator = RawLocator::url("https://news.example.com/a");
        locator.content_hash = Some("sha256:deadbeef".to_string());
        let c = candidate("Orders rose 18%.", locator.clone());
        assert_eq!(resolve(&c), Err(ValidationFailure::InvalidAnchorFormat));

        let lenient = resolve_locator(&c, &ValidationConfig::lenient());
        assert!(lenient.is_ok());

        locator.content_hash = Some(content_hash("orders rose 18%.").to_uppercase());
        let c = candidate("Orders rose 18%.", locator);
        assert!(resolve(&c).is_ok());
    }

    #[test]
    fn test_nothing_to_quote() {
        let c = candidate("  ", RawLocator::url("https://news.example.com/a"));
        assert_eq!(resolve(&c), Err(ValidationFailure::MissingAnchor));
    }

    #[test]
    fn test_normalize_excerpt() {
        assert_eq!(normalize_excerpt("  \"Orders  Rose\n18%\" "), "orders rose 18%");
    }
}

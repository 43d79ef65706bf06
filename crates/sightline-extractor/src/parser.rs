//! Parse line-oriented evidence records into candidates
//!
//! Record grammar (one per line, fixed field order):
//!
//! ```text
//! [date][tier-tag][axis-tag] "excerpt" (impact: [+|-]kpiKey[=value [unit]]) <locator> {attrs}
//! ```
//!
//! The locator is either a bare URL or `url | page=N | quote="..." | hash=sha256:...`.
//! The optional attribute block is `;`-separated: `ttl=N`, `credence=N`,
//! `contradiction`, `confirmed|pending|single`, `also=url1,url2`.

use crate::{Extraction, ExtractorConfig, ExtractorError};
use chrono::NaiveDate;
use regex::Regex;
use sightline_domain::{
    AxisId, DualAnchorStatus, EvidenceCandidate, Polarity, ProvenanceTier, RawLocator,
    SkippedInput,
};
use std::sync::OnceLock;
use tracing::{debug, warn};

fn record_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^\[(?P<date>[^\]]+)\]\s*\[(?P<tier>[^\]]+)\]\s*\[(?P<axis>[^\]]+)\]\s*"(?P<excerpt>.*?)"\s*\(impact:\s*(?P<impact>[^)]*)\)\s*<(?P<locator>[^>]*)>\s*(?:\{(?P<attrs>[^}]*)\})?\s*$"#,
        )
        .expect("record pattern is a valid regex")
    })
}

fn impact_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<sign>[+-])?\s*(?P<kpi>[A-Za-z][A-Za-z0-9_.\-]*)(?:\s*=\s*(?P<value>-?[0-9][0-9,]*(?:\.[0-9]+)?)\s*(?P<unit>.*))?$",
        )
        .expect("impact pattern is a valid regex")
    })
}

/// Parse every record in `text`
///
/// Blank lines and `#` comments are ignored. Malformed lines are skipped
/// with a warning and listed in [`Extraction::skipped`] unless
/// `strict_lines` is set; a source that yields no record at all is an error.
pub fn parse_records(text: &str, config: &ExtractorConfig) -> Result<Extraction, ExtractorError> {
    let mut extraction = Extraction::default();
    let mut first_error: Option<(usize, String)> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_record_line(trimmed, config) {
            Ok(candidate) => {
                debug!(line = line_no, kpi = %candidate.kpi_key, "parsed evidence record");
                extraction.candidates.push(candidate);
            }
            Err(reason) => {
                if config.strict_lines {
                    return Err(ExtractorError::Malformed { line: line_no, reason });
                }
                warn!("Skipping malformed evidence record at line {}: {}", line_no, reason);
                extraction
                    .skipped
                    .push(SkippedInput::new(format!("line {}", line_no), reason.clone()));
                first_error.get_or_insert((line_no, reason));
            }
        }
    }

    if extraction.candidates.is_empty() {
        return Err(match first_error {
            Some((line, reason)) => ExtractorError::Malformed { line, reason },
            None => ExtractorError::Empty,
        });
    }

    Ok(extraction)
}

/// Parse a single record line
pub fn parse_record_line(
    line: &str,
    config: &ExtractorConfig,
) -> Result<EvidenceCandidate, String> {
    let caps = record_regex()
        .captures(line)
        .ok_or_else(|| "Line does not match the evidence record format".to_string())?;

    let asof = parse_date(&caps["date"])?;
    let claimed_tier = ProvenanceTier::parse(&caps["tier"])
        .ok_or_else(|| format!("Unknown tier tag '{}'", &caps["tier"]))?;
    let axis_tag = AxisId::parse(&caps["axis"])
        .ok_or_else(|| format!("Unknown axis tag '{}'", &caps["axis"]))?;
    let impact = parse_impact(&caps["impact"])?;
    let locator = parse_locator(&caps["locator"])?;

    let mut candidate = EvidenceCandidate {
        asof,
        claimed_tier,
        axis_tag,
        excerpt: caps["excerpt"].trim().to_string(),
        kpi_key: impact.kpi_key,
        numeric_value: impact.value,
        unit: impact.unit,
        polarity: impact.polarity,
        locator,
        corroborating_urls: Vec::new(),
        ttl_days: Some(config.default_ttl_days),
        credence: Some(config.default_credence),
        contradiction_flag: false,
        anchor_status: DualAnchorStatus::SingleSourced,
    };

    if let Some(attrs) = caps.name("attrs") {
        apply_attributes(&mut candidate, attrs.as_str())?;
    }

    Ok(candidate)
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", s.trim(), e))
}

struct Impact {
    kpi_key: String,
    value: Option<f64>,
    unit: String,
    polarity: Polarity,
}

fn parse_impact(s: &str) -> Result<Impact, String> {
    let caps = impact_regex()
        .captures(s.trim())
        .ok_or_else(|| format!("Invalid impact clause '{}'", s.trim()))?;

    let polarity = match caps.name("sign").map(|m| m.as_str()) {
        Some("+") => Polarity::Positive,
        Some("-") => Polarity::Negative,
        _ => Polarity::Neutral,
    };

    let value = caps
        .name("value")
        .map(|m| {
            let cleaned = m.as_str().replace(',', "");
            cleaned
                .parse::<f64>()
                .map_err(|e| format!("Invalid value '{}': {}", m.as_str(), e))
        })
        .transpose()?;

    Ok(Impact {
        kpi_key: caps["kpi"].to_string(),
        value,
        unit: caps
            .name("unit")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        polarity,
    })
}

fn parse_locator(s: &str) -> Result<RawLocator, String> {
    let mut parts = s.split('|').map(str::trim);
    let mut locator = RawLocator::default();

    if let Some(url) = parts.next().filter(|u| !u.is_empty()) {
        locator.url = Some(url.to_string());
    }

    for part in parts {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("Locator attribute '{}' is not key=value", part))?;
        let value = value.trim();
        match key.trim() {
            "page" => {
                let page = value
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid page '{}': {}", value, e))?;
                locator.page = Some(page);
            }
            "quote" => locator.quote = Some(strip_quotes(value).to_string()),
            "hash" => locator.content_hash = Some(value.to_string()),
            other => return Err(format!("Unknown locator attribute '{}'", other)),
        }
    }

    Ok(locator)
}

fn apply_attributes(candidate: &mut EvidenceCandidate, attrs: &str) -> Result<(), String> {
    for attr in attrs.split(';').map(str::trim).filter(|a| !a.is_empty()) {
        match attr.split_once('=') {
            Some((key, value)) => {
                let value = value.trim();
                match key.trim() {
                    "ttl" => {
                        candidate.ttl_days = Some(
                            value
                                .parse()
                                .map_err(|e| format!("Invalid ttl '{}': {}", value, e))?,
                        );
                    }
                    "credence" => {
                        let credence: u8 = value
                            .parse()
                            .map_err(|e| format!("Invalid credence '{}': {}", value, e))?;
                        if credence > 100 {
                            return Err(format!("Credence {} exceeds 100", credence));
                        }
                        candidate.credence = Some(credence);
                    }
                    "also" => {
                        candidate.corroborating_urls.extend(
                            value
                                .split(',')
                                .map(str::trim)
                                .filter(|u| !u.is_empty())
                                .map(String::from),
                        );
                    }
                    other => return Err(format!("Unknown attribute '{}'", other)),
                }
            }
            None if attr == "contradiction" => candidate.contradiction_flag = true,
            None => {
                candidate.anchor_status = DualAnchorStatus::parse(attr)
                    .ok_or_else(|| format!("Unknown attribute '{}'", attr))?;
            }
        }
    }
    Ok(())
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY_LINE: &str = r#"[2026-09-30][PRIMARY][momentum] "Orders rose 18% year over year." (impact: +order_backlog_growth_pct=18 %) <https://www.sec.gov/x.htm#:~:text=Orders%20rose>"#;

    fn config() -> ExtractorConfig {
        ExtractorConfig::default()
    }

    #[test]
    fn test_parse_primary_line() {
        let candidate = parse_record_line(PRIMARY_LINE, &config()).unwrap();
        assert_eq!(candidate.asof, NaiveDate::from_ymd_opt(2026, 9, 30).unwrap());
        assert_eq!(candidate.claimed_tier, ProvenanceTier::Primary);
        assert_eq!(candidate.axis_tag, AxisId::Momentum);
        assert_eq!(candidate.excerpt, "Orders rose 18% year over year.");
        assert_eq!(candidate.kpi_key, "order_backlog_growth_pct");
        assert_eq!(candidate.numeric_value, Some(18.0));
        assert_eq!(candidate.unit, "%");
        assert_eq!(candidate.polarity, Polarity::Positive);
        assert_eq!(
            candidate.locator.url.as_deref(),
            Some("https://www.sec.gov/x.htm#:~:text=Orders%20rose")
        );
        assert_eq!(candidate.ttl_days, Some(30));
    }

    #[test]
    fn test_parse_backup_locator_and_attributes() {
        let line = r#"[2026-09-01][S][valuation] "Analysts call the stock cheap." (impact: -sentiment) <https://blog.example.com/r.pdf | page=4 | quote="call the stock cheap" | hash=sha256:ab> {ttl=10; credence=72; pending; also=https://a.example.org/x, https://b.example.net/y}"#;
        let candidate = parse_record_line(line, &config()).unwrap();
        assert_eq!(candidate.polarity, Polarity::Negative);
        assert_eq!(candidate.numeric_value, None);
        assert_eq!(candidate.locator.page, Some(4));
        assert_eq!(candidate.locator.quote.as_deref(), Some("call the stock cheap"));
        assert_eq!(candidate.locator.content_hash.as_deref(), Some("sha256:ab"));
        assert_eq!(candidate.ttl_days, Some(10));
        assert_eq!(candidate.credence, Some(72));
        assert_eq!(candidate.anchor_status, DualAnchorStatus::Pending);
        assert_eq!(candidate.corroborating_urls.len(), 2);
    }

    #[test]
    fn test_excerpt_may_contain_quotes() {
        let line = r#"[2026-09-01][S][growth] "CEO said "record year" again." (impact: forward_growth_pct=12) <https://x.example.com/a>"#;
        let candidate = parse_record_line(line, &config()).unwrap();
        assert_eq!(candidate.excerpt, r#"CEO said "record year" again."#);
    }

    #[test]
    fn test_value_with_thousands_separator() {
        let line = r#"[2026-09-01][P][growth] "Revenue was 1,250 million." (impact: revenue=1,250 USDm) <https://www.sec.gov/a.htm>"#;
        let candidate = parse_record_line(line, &config()).unwrap();
        assert_eq!(candidate.numeric_value, Some(1250.0));
        assert_eq!(candidate.unit, "USDm");
    }

    #[test]
    fn test_contradiction_attribute() {
        let line = format!("{} {{contradiction}}", PRIMARY_LINE);
        let candidate = parse_record_line(&line, &config()).unwrap();
        assert!(candidate.contradiction_flag);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let line = PRIMARY_LINE.replace("[PRIMARY]", "[RUMOUR]");
        assert!(parse_record_line(&line, &config()).is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let line = PRIMARY_LINE.replace("2026-09-30", "30/09/2026");
        let err = parse_record_line(&line, &config()).unwrap_err();
        assert!(err.contains("Invalid date"));
    }

    #[test]
    fn test_parse_records_skips_comments_and_bad_lines() {
        let text = format!("# header\n\n{}\nnot a record\n{}\n", PRIMARY_LINE, PRIMARY_LINE);
        let extraction = parse_records(&text, &config()).unwrap();
        assert_eq!(extraction.candidates.len(), 2);
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].location, "line 4");
        assert!(extraction.skipped[0].reason.contains("does not match"));
    }

    #[test]
    fn test_parse_records_strict_fails_on_bad_line() {
        let text = format!("{}\nnot a record\n", PRIMARY_LINE);
        let err = parse_records(&text, &ExtractorConfig::strict()).unwrap_err();
        assert!(matches!(err, ExtractorError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_empty_source_is_fatal() {
        assert!(matches!(
            parse_records("# nothing here\n\n", &config()),
            Err(ExtractorError::Empty)
        ));
    }

    #[test]
    fn test_all_lines_malformed_is_fatal() {
        let err = parse_records("garbage\nmore garbage", &config()).unwrap_err();
        assert!(matches!(err, ExtractorError::Malformed { line: 1, .. }));
    }
}

//! Provenance tier assignment from source domains

use crate::ValidationConfig;
use sightline_domain::ProvenanceTier;
use url::Url;

/// Second-level suffixes under which registrations happen one label deeper
const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.jp", "go.jp", "or.jp", "ne.jp", "ac.jp", "co.uk", "gov.uk", "org.uk", "ac.uk", "com.au",
    "co.kr", "com.cn",
];

/// Registrable domain of a host: the last two labels, or three under a
/// multi-label suffix such as `co.jp`
///
/// ```
/// use sightline_gatekeeper::registrable_domain;
///
/// assert_eq!(registrable_domain("www.sec.gov"), "sec.gov");
/// assert_eq!(registrable_domain("ir.example.co.jp"), "example.co.jp");
/// ```
pub fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() <= 2 {
        return labels.join(".");
    }

    let last_two = labels[labels.len() - 2..].join(".");
    let keep = if MULTI_LABEL_SUFFIXES.contains(&last_two.as_str()) {
        3
    } else {
        2
    };
    labels[labels.len().saturating_sub(keep)..].join(".")
}

/// Whether a host belongs to one of the configured authoritative domains
pub fn is_authoritative(host: &str, config: &ValidationConfig) -> bool {
    let host = host.trim_end_matches('.').to_lowercase();
    config.authoritative_domains.iter().any(|domain| {
        let domain = domain.trim().to_lowercase();
        host == domain || host.ends_with(&format!(".{}", domain))
    })
}

/// Sourcing of a fact: its assigned tier and the distinct domains behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sourcing {
    pub tier: ProvenanceTier,
    pub domains: Vec<String>,
}

/// Assign a tier from the locator host and any corroborating URLs
///
/// Corroborating URLs that do not parse are ignored.
pub(crate) fn assign_tier(
    primary_host: &str,
    corroborating_urls: &[String],
    config: &ValidationConfig,
) -> Sourcing {
    let mut hosts = vec![primary_host.to_string()];
    hosts.extend(
        corroborating_urls
            .iter()
            .filter_map(|u| Url::parse(u.trim()).ok())
            .filter_map(|u| u.host_str().map(str::to_string)),
    );

    let mut domains: Vec<String> = Vec::new();
    let mut independent = 0usize;
    for host in &hosts {
        let domain = registrable_domain(host);
        if domain.is_empty() || domains.contains(&domain) {
            continue;
        }
        if !is_authoritative(host, config) {
            independent += 1;
        }
        domains.push(domain);
    }

    let tier = if is_authoritative(primary_host, config) {
        ProvenanceTier::Primary
    } else if independent >= config.min_corroborating_domains {
        ProvenanceTier::CorroboratedSecondary
    } else {
        ProvenanceTier::Secondary
    };

    Sourcing { tier, domains }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrable_domain() {
        assert_eq!(registrable_domain("www.sec.gov"), "sec.gov");
        assert_eq!(registrable_domain("sec.gov"), "sec.gov");
        assert_eq!(registrable_domain("News.Example.COM."), "example.com");
        assert_eq!(registrable_domain("disclosure.edinet-fsa.go.jp"), "edinet-fsa.go.jp");
        assert_eq!(registrable_domain("find-and-update.company-information.service.gov.uk"), "service.gov.uk");
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn test_authoritative_subdomain() {
        let config = ValidationConfig::default();
        assert!(is_authoritative("www.sec.gov", &config));
        assert!(is_authoritative("disclosure2.edinet-fsa.go.jp", &config));
        assert!(!is_authoritative("notsec.gov", &config));
        assert!(!is_authoritative("news.example.com", &config));
    }

    #[test]
    fn test_assign_primary() {
        let sourcing = assign_tier("www.sec.gov", &[], &ValidationConfig::default());
        assert_eq!(sourcing.tier, ProvenanceTier::Primary);
        assert_eq!(sourcing.domains, vec!["sec.gov".to_string()]);
    }

    #[test]
    fn test_assign_corroborated() {
        let also = vec![
            "https://www.reuters.com/x".to_string(),
            "https://news.example.com/y".to_string(),
        ];
        let sourcing = assign_tier("example.com", &also, &ValidationConfig::default());
        assert_eq!(sourcing.tier, ProvenanceTier::CorroboratedSecondary);
        assert_eq!(sourcing.domains.len(), 2);
    }

    #[test]
    fn test_same_domain_does_not_corroborate() {
        let also = vec!["https://blog.example.com/y".to_string(), "not a url".to_string()];
        let sourcing = assign_tier("news.example.com", &also, &ValidationConfig::default());
        assert_eq!(sourcing.tier, ProvenanceTier::Secondary);
        assert_eq!(sourcing.domains, vec!["example.com".to_string()]);
    }

    #[test]
    fn test_authoritative_corroborator_not_independent() {
        let also = vec!["https://www.sec.gov/a".to_string()];
        let sourcing = assign_tier("news.example.com", &also, &ValidationConfig::default());
        assert_eq!(sourcing.tier, ProvenanceTier::Secondary);
        assert_eq!(sourcing.domains.len(), 2);
    }
}

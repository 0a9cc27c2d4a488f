// components/track_downloader/src/validation.rs

/// Hostnames accepted as download sources.
const SUPPORTED_DOMAINS: &[&str] = &["soundcloud.com", "m.soundcloud.com"];

/// Check whether a string looks like a supported track URL.
///
/// Deliberately a case-insensitive substring test rather than proper host
/// parsing; a query string containing the domain passes too. That
/// false-positive risk is a known limitation of the matching rule.
pub fn is_supported_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let lowered = url.trim().to_lowercase();
    SUPPORTED_DOMAINS
        .iter()
        .any(|domain| lowered.contains(domain))
}

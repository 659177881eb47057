//! Write-side cacheability policy

/// Redirects, client errors and server errors are never stored.
const UNCACHEABLE_STATUS: std::ops::Range<u16> = 300..600;

/// Whether a response with this status code may be written to the cache.
///
/// An unknown status (no response metadata at all) counts as cacheable.
pub fn is_cacheable(status_code: Option<u16>) -> bool {
    match status_code {
        Some(code) => !UNCACHEABLE_STATUS.contains(&code),
        None => true,
    }
}

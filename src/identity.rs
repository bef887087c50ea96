//! Identity and domain derivation for menu entries.
//!
//! An entry's identity is the SHA-256 hex digest of its URL: deterministic
//! across runs, so a re-synced bookmark lands on the same menu item it
//! produced last time. The domain is the URL's host component and is only a
//! grouping key — it is never unique.

use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha256};
use url::Url;

/// Compute the stable identity for a URL: SHA-256, hex-encoded.
pub fn entry_identity(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the host component of a URL.
///
/// Fails on URLs that do not parse or that parse without a host
/// (e.g. `mailto:` or bare paths).
pub fn extract_domain(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("invalid url: {url}"))?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("url has no host: {url}"))
}

use url::Url;

use super::ProviderError;

/// Join a provider base URL (which may carry its own path prefix) with an
/// API path.
pub fn join_endpoint(base_url: &str, path: &str) -> Result<Url, ProviderError> {
    let mut parsed = Url::parse(base_url)
        .map_err(|e| ProviderError::InvalidEndpoint(format!("{base_url}: {e}")))?;

    let normalized_base = parsed.path().trim_end_matches('/');
    let trimmed_path = path.trim_start_matches('/');

    let full_path = if normalized_base.is_empty() {
        format!("/{trimmed_path}")
    } else if trimmed_path.is_empty() {
        normalized_base.to_string()
    } else {
        format!("{normalized_base}/{trimmed_path}")
    };

    parsed.set_path(&full_path);
    parsed.set_query(None);

    Ok(parsed)
}

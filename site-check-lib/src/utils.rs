//! Utility functions for URL processing and validation.
//!
//! This module contains helper functions for URL validation, normalization,
//! and reading URL lists from files.

use crate::error::SiteCheckError;
use url::Url;

/// Maximum number of URLs accepted from a single input file.
pub const MAX_FILE_URLS: usize = 5000;

/// Validate that a string is a checkable http(s) URL.
///
/// # Arguments
///
/// * `input` - The URL to validate
///
/// # Returns
///
/// `Ok(())` if valid, `Err(SiteCheckError)` if invalid.
pub fn validate_url(input: &str) -> Result<(), SiteCheckError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(SiteCheckError::invalid_url(input, "URL cannot be empty"));
    }

    let parsed = Url::parse(input)
        .map_err(|e| SiteCheckError::invalid_url(input, e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SiteCheckError::invalid_url(
                input,
                format!("unsupported scheme '{}'", other),
            ));
        }
    }

    if parsed.host_str().is_none() {
        return Err(SiteCheckError::invalid_url(input, "URL has no host"));
    }

    Ok(())
}

/// Normalize a URL-ish input into a checkable absolute URL.
///
/// Bare hosts get an `https://` scheme prepended (`example.com` becomes
/// `https://example.com/`); inputs that already carry a scheme are parsed
/// and re-serialized as-is.
///
/// # Returns
///
/// The normalized URL string, or an error if the input cannot be made
/// into a valid http(s) URL.
pub fn normalize_url(input: &str) -> Result<String, SiteCheckError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(SiteCheckError::invalid_url(trimmed, "URL cannot be empty"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    validate_url(&candidate)?;

    let parsed = Url::parse(&candidate)
        .map_err(|e| SiteCheckError::invalid_url(trimmed, e.to_string()))?;
    Ok(parsed.to_string())
}

/// Expand raw URL inputs into a checkable list.
///
/// Trims whitespace, skips empty entries and `#` comments, normalizes bare
/// hosts, and silently drops inputs that cannot be made into valid URLs.
/// Duplicates are preserved; each occurrence is probed independently.
pub fn expand_url_inputs(inputs: &[String]) -> Vec<String> {
    let mut results = Vec::new();

    for input in inputs {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match normalize_url(trimmed) {
            Ok(url) => results.push(url),
            Err(e) => {
                tracing::warn!(input = %trimmed, error = %e, "skipping invalid URL input");
            }
        }
    }

    results
}

/// Read a URL list from a file, one URL per line.
///
/// Empty lines and lines starting with `#` are ignored as comments.
/// Entries are returned raw; callers normalize via [`expand_url_inputs`].
///
/// # Errors
///
/// Returns `SiteCheckError::FileError` if the file cannot be read or
/// contains more than [`MAX_FILE_URLS`] entries.
pub fn read_urls_from_file(path: &str) -> Result<Vec<String>, SiteCheckError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SiteCheckError::file_error(path, format!("Failed to read file: {}", e)))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if urls.len() > MAX_FILE_URLS {
        return Err(SiteCheckError::file_error(
            path,
            format!("File contains {} URLs, limit is {}", urls.len(), MAX_FILE_URLS),
        ));
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://a.test").is_ok());
        assert!(validate_url("https://example.com/path?q=1").is_ok());

        assert!(validate_url("").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn test_normalize_url_adds_scheme() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com/");
        assert_eq!(
            normalize_url("http://a.test").unwrap(),
            "http://a.test/"
        );
    }

    #[test]
    fn test_normalize_url_rejects_bad_input() {
        assert!(normalize_url("").is_err());
        assert!(normalize_url("ftp://a.test").is_err());
    }

    #[test]
    fn test_expand_url_inputs_filters_and_normalizes() {
        let inputs = vec![
            "example.com".to_string(),
            "".to_string(),
            "# comment".to_string(),
            "http://a.test".to_string(),
            ":::garbage:::".to_string(),
        ];

        let expanded = expand_url_inputs(&inputs);
        assert_eq!(expanded, vec!["https://example.com/", "http://a.test/"]);
    }

    #[test]
    fn test_read_urls_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://a.test").unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "http://b.test").unwrap();
        file.flush().unwrap();

        let urls = read_urls_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(urls, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_read_urls_from_missing_file() {
        let result = read_urls_from_file("/nonexistent/urls.txt");
        assert!(matches!(result, Err(SiteCheckError::FileError { .. })));
    }
}

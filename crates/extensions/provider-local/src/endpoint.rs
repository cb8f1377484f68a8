//! Endpoint policy for local model servers.

use url::Url;

use tabwise_protocols::error::ProviderError;

const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

/// Accept HTTPS anywhere, plain HTTP only on loopback.
pub fn check_endpoint(endpoint: &str) -> Result<Url, ProviderError> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| ProviderError::InvalidEndpoint(format!("'{endpoint}' is not a valid URL: {e}")))?;

    match url.scheme() {
        "https" => Ok(url),
        "http" => {
            let host = url.host_str().unwrap_or_default();
            if LOOPBACK_HOSTS.contains(&host) {
                Ok(url)
            } else {
                Err(ProviderError::InvalidEndpoint(format!(
                    "plain HTTP is only allowed for localhost, 127.0.0.1 or [::1]; use HTTPS for {host}"
                )))
            }
        }
        scheme => Err(ProviderError::InvalidEndpoint(format!(
            "unsupported scheme '{scheme}', expected http or https"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_allowed_anywhere() {
        assert!(check_endpoint("https://models.example.com/v1").is_ok());
        assert!(check_endpoint("  https://10.0.0.5:8443/v1 ").is_ok());
    }

    #[test]
    fn test_http_loopback_allowed() {
        assert!(check_endpoint("http://localhost:11434/v1").is_ok());
        assert!(check_endpoint("http://127.0.0.1:1234/v1").is_ok());
        assert!(check_endpoint("http://[::1]:8080/v1").is_ok());
    }

    #[test]
    fn test_http_remote_rejected() {
        let err = check_endpoint("http://192.168.1.20:11434/v1").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidEndpoint(_)));
        assert!(err.to_string().contains("HTTPS"));

        // Loopback name as a subdomain does not count.
        assert!(check_endpoint("http://localhost.evil.com/v1").is_err());
    }

    #[test]
    fn test_garbage_and_other_schemes_rejected() {
        assert!(check_endpoint("not a url").is_err());
        assert!(check_endpoint("ftp://localhost/v1").is_err());
    }

    #[test]
    fn test_rejection_is_not_retryable_text() {
        let err = check_endpoint("http://example.com").unwrap_err();
        assert!(err.to_string().starts_with("INVALID_ENDPOINT"));
    }
}

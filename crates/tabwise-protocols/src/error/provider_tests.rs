use super::*;

#[test]
fn test_unauthorized_display_carries_token() {
    let err = ProviderError::Unauthorized("bad key".to_string());
    assert_eq!(err.to_string(), "UNAUTHORIZED: bad key");
}

#[test]
fn test_rate_limit_display_carries_token() {
    let err = ProviderError::RateLimited("slow down".to_string());
    assert!(err.to_string().starts_with("RATE_LIMIT"));
}

#[test]
fn test_http_display_carries_status() {
    let err = ProviderError::Http {
        status: 503,
        message: "Service Unavailable".to_string(),
    };
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[test]
fn test_from_status_401() {
    let err = ProviderError::from_status(401, "Invalid API key");
    assert_eq!(err, ProviderError::Unauthorized("Invalid API key".to_string()));
}

#[test]
fn test_from_status_403() {
    let err = ProviderError::from_status(403, "denied");
    assert!(matches!(err, ProviderError::Forbidden(_)));
}

#[test]
fn test_from_status_429() {
    let err = ProviderError::from_status(429, "Too many requests");
    assert!(matches!(err, ProviderError::RateLimited(_)));
}

#[test]
fn test_from_status_other() {
    let err = ProviderError::from_status(502, "Bad Gateway");
    assert_eq!(
        err,
        ProviderError::Http {
            status: 502,
            message: "Bad Gateway".to_string()
        }
    );
}

#[test]
fn test_transport_tokens() {
    assert!(ProviderError::Timeout("x".into()).to_string().contains("ETIMEDOUT"));
    assert!(ProviderError::ConnectionRefused("x".into()).to_string().contains("ECONNREFUSED"));
    assert!(ProviderError::Network("x".into()).to_string().contains("NETWORK_ERROR"));
}

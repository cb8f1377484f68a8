use super::*;

#[test]
fn test_provider_kind_from_str() {
    assert_eq!("bedrock".parse::<ProviderKind>().unwrap(), ProviderKind::Bedrock);
    assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
    assert_eq!(" local ".parse::<ProviderKind>().unwrap(), ProviderKind::Local);
}

#[test]
fn test_unknown_provider_is_configuration_error() {
    let err = "openai".parse::<ProviderKind>().unwrap_err();
    assert_eq!(err, UnknownProvider("openai".to_string()));
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn test_credentials_kind() {
    let creds = Credentials::Gemini(GeminiCredentials {
        api_key: "k".to_string(),
        model: None,
    });
    assert_eq!(creds.kind(), ProviderKind::Gemini);
}

#[test]
fn test_credentials_tagged_serialization() {
    let creds = Credentials::Local(LocalCredentials {
        endpoint: "http://localhost:11434/v1".to_string(),
        api_key: None,
        model: Some("llama3".to_string()),
    });
    let json = serde_json::to_value(&creds).unwrap();
    assert_eq!(json["provider"], "local");
    assert_eq!(json["endpoint"], "http://localhost:11434/v1");
    assert!(json.get("api_key").is_none());
}

#[test]
fn test_bedrock_region_defaults() {
    let creds: Credentials = serde_json::from_value(serde_json::json!({
        "provider": "bedrock",
        "access_key_id": "AKID",
        "secret_access_key": "secret"
    }))
    .unwrap();
    match creds {
        Credentials::Bedrock(b) => {
            assert_eq!(b.region, "us-east-1");
            assert!(b.session_token.is_none());
        }
        _ => panic!("Expected bedrock credentials"),
    }
}

#[test]
fn test_provider_config_default_unconfigured() {
    let config = ProviderConfig::default();
    assert!(!config.configured);
    assert!(config.credentials.is_none());
}

#[test]
fn test_with_credentials_marks_configured() {
    let config = ProviderConfig::with_credentials(Credentials::Gemini(GeminiCredentials {
        api_key: "k".to_string(),
        model: None,
    }));
    assert!(config.configured);
    assert_eq!(config.provider, ProviderKind::Gemini);
}

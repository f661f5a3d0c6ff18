use super::*;

#[test]
fn default_points_at_deployed_api() {
    assert_eq!(ApiConfig::default().base_url(), DEFAULT_API_BASE_URL);
}

#[test]
fn new_strips_trailing_slashes() {
    let config = ApiConfig::new("https://api.example.test/dev//").unwrap();
    assert_eq!(config.base_url(), "https://api.example.test/dev");
}

#[test]
fn new_accepts_plain_http() {
    assert!(ApiConfig::new("http://127.0.0.1:8080").is_ok());
}

#[test]
fn new_rejects_other_schemes_and_missing_host() {
    assert_eq!(
        ApiConfig::new("ftp://example.test"),
        Err(ConfigError::InvalidBaseUrl("ftp://example.test".to_owned()))
    );
    assert!(ApiConfig::new("https://").is_err());
    assert!(ApiConfig::new("example.test").is_err());
}

#[test]
fn blank_override_uses_default() {
    assert_eq!(ApiConfig::from_override(None).unwrap(), ApiConfig::default());
    assert_eq!(ApiConfig::from_override(Some("  ")).unwrap(), ApiConfig::default());
}

#[test]
fn override_replaces_default() {
    let config = ApiConfig::from_override(Some("http://localhost:3000/")).unwrap();
    assert_eq!(config.base_url(), "http://localhost:3000");
}

#[test]
fn endpoint_joins_with_single_slash() {
    let config = ApiConfig::new("http://localhost:3000/dev").unwrap();
    assert_eq!(config.endpoint("/experiments"), "http://localhost:3000/dev/experiments");
    assert_eq!(config.endpoint("experiments/ongoing"), "http://localhost:3000/dev/experiments/ongoing");
}

//! Integration tests for the whitelist policy type.

use scour_common::{ConfigError, WhitelistConfig};

#[test]
fn test_default_policy_allows_formatting_but_not_script() {
    let policy = WhitelistConfig::default();
    assert!(policy.allows_tag("b"));
    assert!(policy.allows_tag("a"));
    assert!(!policy.allows_tag("script"));
    assert!(!policy.allows_attribute("onclick"));
    assert!(policy.allows_scheme("https"));
    assert!(!policy.allows_scheme("javascript"));
    assert!(policy.is_url_attribute("href"));
}

#[test]
fn test_from_json_overrides_only_given_sets() {
    let policy = WhitelistConfig::from_json(r#"{"tags": ["P", "em"], "url_schemes": []}"#).unwrap();
    assert!(policy.allows_tag("p"));
    assert!(policy.allows_tag("em"));
    assert!(!policy.allows_tag("b"));
    assert!(policy.url_schemes.is_empty());
    // Untouched sets keep the built-in defaults.
    assert_eq!(
        policy.css_properties,
        WhitelistConfig::default_policy().css_properties
    );
}

#[test]
fn test_from_json_rejects_wrong_shape() {
    let err = WhitelistConfig::from_json(r#"{"tags": "p"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("invalid whitelist policy"));
}

#[test]
fn test_builders_lowercase_and_do_not_touch_default() {
    let policy = WhitelistConfig::empty()
        .with_tags(["DIV"])
        .with_attributes(["Title"]);
    assert!(policy.allows_tag("div"));
    assert!(policy.allows_attribute("title"));
    assert!(!policy.allows_tag("b"));
    assert!(WhitelistConfig::default_policy().allows_tag("b"));
}

#[test]
fn test_policy_serializes_back_to_json() {
    let policy = WhitelistConfig::empty().with_url_schemes(["https"]);
    let json = serde_json::to_string(&policy).unwrap();
    assert!(json.contains(r#""url_schemes":["https"]"#));
}

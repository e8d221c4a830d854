//! Unit tests for type identities and resolution tokens.

use graft_di::{ResolutionToken, TypeIdentity};
use std::collections::HashMap;

#[test]
fn test_raw_identity_key_is_its_name() {
    let identity = TypeIdentity::raw("myapp::Database");
    assert_eq!(identity.key(), "myapp::Database");
    assert_eq!(identity.name(), "myapp::Database");
    assert!(!identity.is_generic());
    assert!(identity.arguments().is_empty());
}

#[test]
fn test_generic_identity_key_includes_arguments() {
    let identity = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
    assert_eq!(identity.key(), "List<String>");
    assert_eq!(identity.name(), "List");
    assert!(identity.is_generic());
    assert_eq!(identity.arguments().len(), 1);
}

#[test]
fn test_nested_generic_identity_key() {
    let identity = TypeIdentity::generic(
        "Map",
        vec![
            TypeIdentity::raw("String"),
            TypeIdentity::generic("List", vec![TypeIdentity::raw("i32")]),
        ],
    );
    assert_eq!(identity.key(), "Map<String, List<i32>>");
}

#[test]
fn test_captured_identities_are_key_stable_across_capture_sites() {
    // Keys produced at "registration time" and "inspection time" must agree
    let registered = TypeIdentity::of::<Vec<String>>();
    let inspected = TypeIdentity::of::<Vec<String>>();

    assert_eq!(registered.key(), inspected.key());
    assert_eq!(registered, inspected);
}

#[test]
fn test_equality_follows_keys() {
    let a = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
    let b = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
    let c = TypeIdentity::generic("List", vec![TypeIdentity::raw("i32")]);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, TypeIdentity::raw("List"));
}

#[test]
fn test_identities_work_as_map_keys() {
    let mut map = HashMap::new();
    map.insert(TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]), 1);
    map.insert(TypeIdentity::raw("List"), 2);

    let lookup = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
    assert_eq!(map.get(&lookup), Some(&1));
    assert_eq!(map.get(&TypeIdentity::raw("List")), Some(&2));
}

#[test]
fn test_display_matches_key() {
    let identity = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
    assert_eq!(identity.to_string(), identity.key());
}

#[test]
fn test_unnamed_token_key_is_the_type_key() {
    let identity = TypeIdentity::raw("Logger");
    let token = ResolutionToken::of(identity.clone());

    assert_eq!(token.key(), "Logger");
    assert_eq!(token.identity(), &identity);
    assert_eq!(token.name(), None);
}

#[test]
fn test_named_token_key_is_qualified() {
    let token = ResolutionToken::named(TypeIdentity::raw("Logger"), "console");
    assert_eq!(token.key(), "Logger-console");
    assert_eq!(token.name(), Some("console"));
}

#[test]
fn test_empty_token_name_means_unnamed() {
    let token = ResolutionToken::named(TypeIdentity::raw("Logger"), "");
    assert_eq!(token.key(), "Logger");
    assert_eq!(token.name(), None);
}

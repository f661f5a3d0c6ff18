use super::*;

#[test]
fn should_redirect_unauth_once_resolution_failed() {
    assert!(should_redirect_unauth(&Session::Failed(AuthError::NotSignedIn)));
}

#[test]
fn should_not_redirect_while_resolving() {
    assert!(!should_redirect_unauth(&Session::Unresolved));
    assert!(!should_redirect_unauth(&Session::Resolving));
}

#[test]
fn should_not_redirect_when_identity_exists() {
    let session = Session::Resolved(Identity::new("u1").unwrap());
    assert!(!should_redirect_unauth(&session));
}

#[test]
fn stored_identity_is_revalidated() {
    let stored = Identity { user_id: " u1 ".to_owned(), display_name: Some("Alice".to_owned()) };
    let identity = identity_from_stored(Some(stored)).unwrap();
    assert_eq!(identity.user_id, "u1");
    assert_eq!(identity.label(), "Alice");
}

#[test]
fn missing_or_blank_stored_identity_fails() {
    assert_eq!(identity_from_stored(None), Err(AuthError::NotSignedIn));
    let blank = Identity { user_id: "  ".to_owned(), display_name: None };
    assert_eq!(identity_from_stored(Some(blank)), Err(AuthError::Incomplete));
}

#[test]
fn sign_in_rejects_blank_user_before_touching_storage() {
    assert_eq!(LocalIdentity::sign_in(" ", "Alice"), Err(AuthError::Incomplete));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk_domain::Role;

use super::helpers::{
    create_test_admin, create_test_agent, create_test_manager, create_test_requester,
    setup_test_persistence,
};
use crate::{
    ApiError, AuthError, AuthenticatedActor, AuthorizationService, UpsertDirectoryUserRequest,
    upsert_directory_user,
};

fn agent_request(display_name: &str) -> UpsertDirectoryUserRequest {
    UpsertDirectoryUserRequest {
        display_name: display_name.to_string(),
        email: String::from("nina@example.com"),
        role: Role::SupportStaff,
        is_active: true,
    }
}

#[test]
fn test_reporting_requires_elevated_role() {
    assert!(AuthorizationService::authorize_reporting(&create_test_agent()).is_ok());
    assert!(AuthorizationService::authorize_reporting(&create_test_manager()).is_ok());
    assert!(AuthorizationService::authorize_reporting(&create_test_admin()).is_ok());

    let result = AuthorizationService::authorize_reporting(&create_test_requester());
    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_directory_admin_requires_admin() {
    assert!(AuthorizationService::authorize_directory_admin(&create_test_admin()).is_ok());
    for actor in [
        create_test_requester(),
        create_test_agent(),
        create_test_manager(),
    ] {
        assert!(
            AuthorizationService::authorize_directory_admin(&actor).is_err(),
            "{} should not administer the directory",
            actor.role
        );
    }
}

#[test]
fn test_auth_error_becomes_forbidden() {
    let err: ApiError = AuthorizationService::authorize_reporting(&create_test_requester())
        .unwrap_err()
        .into();
    assert!(matches!(err, ApiError::Forbidden { .. }));
}

#[test]
fn test_audit_actor_carries_identity() {
    let actor = AuthenticatedActor::new("maria", Role::SupportManager);
    let audit = actor.to_audit_actor();
    assert_eq!(audit.id, "maria");
    assert_eq!(audit.role, Role::SupportManager);
}

#[test]
fn test_admin_upserts_directory_user() {
    let mut persistence = setup_test_persistence();

    let user = upsert_directory_user(
        &mut persistence,
        "nina",
        agent_request(" Nina New "),
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(user.display_name, "Nina New");
    assert_eq!(
        persistence.find_directory_user("nina").unwrap(),
        Some(user.clone())
    );

    let replaced = upsert_directory_user(
        &mut persistence,
        "nina",
        UpsertDirectoryUserRequest {
            is_active: false,
            ..agent_request("Nina New")
        },
        &create_test_admin(),
    )
    .unwrap();
    assert!(!replaced.is_active);
    assert!(!persistence.find_directory_user("nina").unwrap().unwrap().is_active);
}

#[test]
fn test_non_admin_cannot_upsert_directory_user() {
    let mut persistence = setup_test_persistence();
    let result = upsert_directory_user(
        &mut persistence,
        "nina",
        agent_request("Nina"),
        &create_test_manager(),
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
    assert_eq!(persistence.find_directory_user("nina").unwrap(), None);
}

#[test]
fn test_blank_display_name_is_rejected() {
    let mut persistence = setup_test_persistence();
    let result = upsert_directory_user(
        &mut persistence,
        "nina",
        agent_request("   "),
        &create_test_admin(),
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

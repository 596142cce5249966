// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    T0, create_test_agent, create_test_bystander, create_test_manager, create_test_requester,
    open_test_ticket, setup_test_persistence,
};
use crate::{
    AddAttachmentRequest, ApiError, AttachmentPolicy, AttachmentPolicyError,
    DEFAULT_MAX_ATTACHMENT_BYTES, add_attachment, delete_attachment, list_attachments,
};

fn screenshot(size_bytes: u64) -> AddAttachmentRequest {
    AddAttachmentRequest {
        filename: String::from("screen.png"),
        size_bytes,
        mime_type: String::from("image/png"),
        storage_key: String::from("blobs/3f9a"),
    }
}

#[test]
fn test_policy_accepts_plain_file() {
    let policy = AttachmentPolicy::default();
    assert_eq!(policy.max_bytes, DEFAULT_MAX_ATTACHMENT_BYTES);
    assert!(
        policy
            .validate("report.pdf", 2048, "application/pdf", "blobs/1")
            .is_ok()
    );
    assert!(
        policy
            .validate("full.bin", DEFAULT_MAX_ATTACHMENT_BYTES, "application/octet-stream", "k")
            .is_ok()
    );
}

#[test]
fn test_policy_rejects_paths_in_filename() {
    let policy = AttachmentPolicy::default();
    for name in ["../etc/passwd", "dir/file.txt", "C:\\temp\\a.txt"] {
        assert_eq!(
            policy.validate(name, 10, "text/plain", "k"),
            Err(AttachmentPolicyError::PathInFilename),
            "{name}"
        );
    }
}

#[test]
fn test_policy_rejects_empty_and_oversized_files() {
    let policy = AttachmentPolicy { max_bytes: 100 };
    assert_eq!(
        policy.validate("a.txt", 0, "text/plain", "k"),
        Err(AttachmentPolicyError::Empty)
    );
    assert_eq!(
        policy.validate("a.txt", 101, "text/plain", "k"),
        Err(AttachmentPolicyError::TooLarge {
            size_bytes: 101,
            max_bytes: 100
        })
    );
}

#[test]
fn test_policy_requires_metadata() {
    let policy = AttachmentPolicy::default();
    let missing = |filename: &str, mime: &str, key: &str| {
        policy
            .validate(filename, 1, mime, key)
            .map_err(|e| e.field())
    };
    assert_eq!(missing(" ", "text/plain", "k"), Err("filename"));
    assert_eq!(missing("a.txt", "", "k"), Err("mime_type"));
    assert_eq!(missing("a.txt", "text/plain", "  "), Err("storage_key"));
}

#[test]
fn test_policy_deserializes_with_default_limit() {
    let policy: AttachmentPolicy = serde_json::from_str("{}").unwrap();
    assert_eq!(policy, AttachmentPolicy::default());
    let policy: AttachmentPolicy = serde_json::from_str(r#"{"max_bytes": 512}"#).unwrap();
    assert_eq!(policy.max_bytes, 512);
}

#[test]
fn test_add_and_list_attachments() {
    let mut persistence = setup_test_persistence();
    let (ticket_id, _) = open_test_ticket(&mut persistence, "Laptop dead", T0);
    let requester = create_test_requester();

    let attachment = add_attachment(
        &mut persistence,
        ticket_id,
        screenshot(4096),
        &requester,
        &AttachmentPolicy::default(),
        T0,
    )
    .unwrap();
    assert_eq!(attachment.uploaded_by, "alice");
    assert_eq!(attachment.size_bytes, 4096);

    let listed = list_attachments(&mut persistence, ticket_id, &create_test_agent()).unwrap();
    assert_eq!(listed.attachments, vec![attachment]);

    let result = list_attachments(&mut persistence, ticket_id, &create_test_bystander());
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_oversized_attachment_is_invalid_input() {
    let mut persistence = setup_test_persistence();
    let (ticket_id, _) = open_test_ticket(&mut persistence, "Laptop dead", T0);

    let result = add_attachment(
        &mut persistence,
        ticket_id,
        screenshot(DEFAULT_MAX_ATTACHMENT_BYTES + 1),
        &create_test_requester(),
        &AttachmentPolicy::default(),
        T0,
    );
    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "size_bytes")
    );
}

#[test]
fn test_delete_attachment_requires_uploader_or_moderator() {
    let mut persistence = setup_test_persistence();
    let (ticket_id, _) = open_test_ticket(&mut persistence, "Laptop dead", T0);
    let attachment = add_attachment(
        &mut persistence,
        ticket_id,
        screenshot(10),
        &create_test_requester(),
        &AttachmentPolicy::default(),
        T0,
    )
    .unwrap();

    let result = delete_attachment(
        &mut persistence,
        attachment.attachment_id,
        &create_test_agent(),
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    delete_attachment(
        &mut persistence,
        attachment.attachment_id,
        &create_test_manager(),
    )
    .unwrap();
    assert!(
        list_attachments(&mut persistence, ticket_id, &create_test_requester())
            .unwrap()
            .attachments
            .is_empty()
    );
}

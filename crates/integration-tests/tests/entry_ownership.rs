//! Integration tests for the entry ownership model.
//!
//! Entries must only ever be visible and mutable to their owner. These tests
//! drive two separate sessions (two cookie-holding clients) and check that
//! neither can see or touch the other's entries.
//!
//! Requires a running server; see auth_flow.rs for setup.

use quillpad_integration_tests::{
    add_entry, base_url, client, entry_ids, location, register_and_login, results_page,
};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_create_and_list_entry() {
    let alice = client();
    register_and_login(&alice, "alice", "pw1").await;

    let resp = add_entry(&alice, "groceries", "milk and eggs").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/results");

    let body = results_page(&alice).await;
    assert!(body.contains("groceries"));
    assert!(body.contains("milk and eggs"));
    assert_eq!(entry_ids(&body).len(), 1);
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_edit_own_entry() {
    let alice = client();
    register_and_login(&alice, "alice", "pw1").await;

    add_entry(&alice, "draft", "first version").await;
    let body = results_page(&alice).await;
    let ids = entry_ids(&body);
    let id = ids.first().expect("entry should be listed");

    let resp = alice
        .post(format!("{}/edit/{id}", base_url()))
        .form(&[("title", "final"), ("description", "second version")])
        .send()
        .await
        .expect("Failed to edit entry");
    assert!(resp.status().is_redirection());

    let body = results_page(&alice).await;
    assert!(body.contains("final"));
    assert!(body.contains("second version"));
    assert!(!body.contains("first version"));
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_entries_are_not_visible_to_other_users() {
    let alice = client();
    register_and_login(&alice, "alice", "pw1").await;
    add_entry(&alice, "private note", "only alice sees this").await;

    let bob = client();
    register_and_login(&bob, "bob", "pw2").await;

    let body = results_page(&bob).await;
    assert!(!body.contains("private note"));
    assert!(entry_ids(&body).is_empty());
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_cross_owner_edit_fails_and_leaves_entry_unchanged() {
    let alice = client();
    register_and_login(&alice, "alice", "pw1").await;
    add_entry(&alice, "original", "untouched").await;

    let body = results_page(&alice).await;
    let ids = entry_ids(&body);
    let id = ids.first().expect("entry should be listed");

    // Bob targets alice's entry id directly
    let bob = client();
    register_and_login(&bob, "bob", "pw2").await;

    let resp = bob
        .post(format!("{}/edit/{id}", base_url()))
        .form(&[("title", "hijacked"), ("description", "gotcha")])
        .send()
        .await
        .expect("Failed to send cross-owner edit");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Re-fetched as alice, the entry is unchanged
    let body = results_page(&alice).await;
    assert!(body.contains("original"));
    assert!(body.contains("untouched"));
    assert!(!body.contains("hijacked"));
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_cross_owner_delete_fails_and_leaves_entry_intact() {
    let alice = client();
    register_and_login(&alice, "alice", "pw1").await;
    add_entry(&alice, "keep me", "still here").await;

    let body = results_page(&alice).await;
    let ids = entry_ids(&body);
    let id = ids.first().expect("entry should be listed");

    let bob = client();
    register_and_login(&bob, "bob", "pw2").await;

    // Delete carries the same ownership filter as edit
    let resp = bob
        .post(format!("{}/delete/{id}", base_url()))
        .send()
        .await
        .expect("Failed to send cross-owner delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = results_page(&alice).await;
    assert!(body.contains("keep me"));
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_delete_own_entry() {
    let alice = client();
    register_and_login(&alice, "alice", "pw1").await;
    add_entry(&alice, "temporary", "delete me").await;

    let body = results_page(&alice).await;
    let ids = entry_ids(&body);
    let id = ids.first().expect("entry should be listed");

    let resp = alice
        .post(format!("{}/delete/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete entry");
    assert!(resp.status().is_redirection());

    let body = results_page(&alice).await;
    assert!(!body.contains("temporary"));
    assert!(body.contains("No entries yet"));

    // Deleting it again is a 404, not a silent success
    let resp = alice
        .post(format!("{}/delete/{id}", base_url()))
        .send()
        .await
        .expect("Failed to re-delete entry");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

use crate::e2e::helpers;

use helpers::fixtures::{encode_payload, pcm_ramp, request};
use helpers::{gemini_mocks, TestContext};
use pretty_assertions::assert_eq;
use voice_studio::domain::session::SessionError;
use voice_studio::domain::speech::Gender;

#[tokio::test]
async fn it_should_restore_history_after_a_restart() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(16))).await;

    ctx.session.speak(&request("first", Gender::Male)).await.unwrap();
    ctx.session.speak(&request("second", Gender::Female)).await.unwrap();

    let restarted = ctx.restart().await.unwrap();
    let restored = restarted.history().await;

    assert_eq!(restored, ctx.session.history().await);
    let excerpts: Vec<&str> = restored.iter().map(|e| e.text_excerpt.as_str()).collect();
    assert_eq!(excerpts, vec!["second", "first"]);
}

#[tokio::test]
async fn it_should_keep_only_the_twenty_newest_sessions() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(4))).await;

    for i in 1..=25 {
        ctx.session
            .speak(&request(&format!("take {}", i), Gender::Male))
            .await
            .unwrap();
    }

    let history = ctx.session.history().await;
    assert_eq!(history.len(), 20);
    assert_eq!(history[0].text_excerpt, "take 25");
    assert_eq!(history[19].text_excerpt, "take 6");

    let persisted = ctx.restart().await.unwrap().history().await;
    assert_eq!(persisted.len(), 20);
    assert_eq!(persisted, history);
}

#[tokio::test]
async fn it_should_store_history_as_camel_case_json() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(4))).await;

    ctx.session.speak(&request("stored", Gender::Female)).await.unwrap();

    let raw = tokio::fs::read_to_string(ctx.history_file()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["textExcerpt"], "stored");
    assert_eq!(entry["gender"], "female");
    assert!(entry.get("rawPayload").is_some());
    assert!(entry.get("createdAt").is_some());
}

#[tokio::test]
async fn it_should_replay_without_calling_the_provider() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(32))).await;

    let first = ctx.session.speak(&request("one", Gender::Male)).await.unwrap();
    ctx.session.speak(&request("two", Gender::Male)).await.unwrap();
    let calls_before = ctx.provider_requests().await.len();

    let uri = ctx.session.replay(&first.entry_id).await.unwrap();

    assert_eq!(ctx.provider_requests().await.len(), calls_before);
    assert_eq!(ctx.session.current_uri().await, Some(uri.clone()));
    assert_ne!(uri, first.uri, "replay mints a fresh handle");

    // replay leaves the order alone
    let excerpts: Vec<String> = ctx
        .session
        .history()
        .await
        .into_iter()
        .map(|e| e.text_excerpt)
        .collect();
    assert_eq!(excerpts, vec!["two", "one"]);
}

#[tokio::test]
async fn it_should_replay_entries_restored_from_disk() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(32))).await;
    let spoken = ctx.session.speak(&request("persisted", Gender::Female)).await.unwrap();

    let restarted = ctx.restart().await.unwrap();
    restarted.replay(&spoken.entry_id).await.unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let path = restarted.save_current(out_dir.path()).await.unwrap();
    let bytes = tokio::fs::read(path).await.unwrap();
    assert_eq!(bytes.len(), spoken.size);
}

#[tokio::test]
async fn it_should_report_unknown_entries_on_replay() {
    let ctx = TestContext::new().await.unwrap();

    let err = ctx.session.replay("does-not-exist").await.unwrap_err();

    assert!(matches!(err, SessionError::NotFound(id) if id == "does-not-exist"));
}

#[tokio::test]
async fn it_should_remove_a_single_entry_and_persist_it() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(4))).await;
    let keep = ctx.session.speak(&request("keep", Gender::Male)).await.unwrap();
    let dropped = ctx.session.speak(&request("drop", Gender::Male)).await.unwrap();

    assert!(ctx.session.remove(&dropped.entry_id).await);
    assert!(!ctx.session.remove(&dropped.entry_id).await);

    let restored = ctx.restart().await.unwrap().history().await;
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].id, keep.entry_id);
}

#[tokio::test]
async fn it_should_clear_history_and_its_storage() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(4))).await;
    ctx.session.speak(&request("gone soon", Gender::Male)).await.unwrap();
    assert!(ctx.history_file().exists());

    ctx.session.clear().await;

    assert!(ctx.session.history().await.is_empty());
    assert!(!ctx.history_file().exists());
    assert!(ctx.restart().await.unwrap().history().await.is_empty());
}

#[tokio::test]
async fn it_should_start_empty_when_stored_history_is_corrupt() {
    let ctx = TestContext::new().await.unwrap();
    tokio::fs::write(ctx.history_file(), b"{ this is not json").await.unwrap();

    let restarted = ctx.restart().await.unwrap();

    assert!(restarted.history().await.is_empty());
}

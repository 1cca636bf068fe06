// Integration tests for session storage backends
//
// Both backends sit behind the same trait and must enforce the same
// contract: writes against unknown sessions fail, list reads for unknown
// sessions come back empty, and listings are ordered oldest first.

use anyhow::Result;
use interview_copilot::model::{AiResponse, Session, SpeakerRole, TranscriptEntry};
use interview_copilot::store::{JsonStore, MemoryStore, SessionStore, StoreError};
use tempfile::TempDir;

#[tokio::test]
async fn test_insert_and_get_session() -> Result<()> {
    let store = MemoryStore::new();

    let session = store.insert_session(Session::new()).await?;
    let fetched = store.get_session(&session.id).await?;

    assert_eq!(fetched.id, session.id);
    assert!(fetched.is_active);

    Ok(())
}

#[tokio::test]
async fn test_get_unknown_session_fails() {
    let store = MemoryStore::new();

    let result = store.get_session("no-such-session").await;

    match result {
        Err(StoreError::SessionNotFound(id)) => assert_eq!(id, "no-such-session"),
        other => panic!("Expected SessionNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_sessions_ordered_by_creation() -> Result<()> {
    let store = MemoryStore::new();

    // Insert with explicit creation times, newest first
    let second = Session::new();
    let mut first = Session::new();
    first.created_at = second.created_at - chrono::Duration::seconds(60);

    store.insert_session(second.clone()).await?;
    store.insert_session(first.clone()).await?;

    let sessions = store.list_sessions().await?;
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, first.id, "Oldest session should come first");
    assert_eq!(sessions[1].id, second.id);

    Ok(())
}

#[tokio::test]
async fn test_transcript_requires_session() {
    let store = MemoryStore::new();

    let entry = TranscriptEntry::new("missing", SpeakerRole::Interviewer, "Hello");
    let result = store.add_transcript(entry).await;

    assert!(matches!(result, Err(StoreError::SessionNotFound(_))));
}

#[tokio::test]
async fn test_response_requires_session() {
    let store = MemoryStore::new();

    let response = AiResponse::new("missing", "Why us?", "Because.");
    let result = store.add_response(response).await;

    assert!(matches!(result, Err(StoreError::SessionNotFound(_))));
}

#[tokio::test]
async fn test_transcripts_listed_oldest_first() -> Result<()> {
    let store = MemoryStore::new();
    let session = store.insert_session(Session::new()).await?;

    // Insert out of order; the listing must sort by timestamp
    let late = TranscriptEntry::new(&session.id, SpeakerRole::Candidate, "second line");
    let mut early = TranscriptEntry::new(&session.id, SpeakerRole::Interviewer, "first line");
    early.timestamp = late.timestamp - chrono::Duration::seconds(30);

    store.add_transcript(late.clone()).await?;
    store.add_transcript(early.clone()).await?;

    let listed = store.transcripts_for(&session.id).await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].text, "first line");
    assert_eq!(listed[1].text, "second line");

    Ok(())
}

#[tokio::test]
async fn test_transcripts_for_unknown_session_returns_empty() -> Result<()> {
    let store = MemoryStore::new();

    let listed = store.transcripts_for("no-such-session").await?;
    assert!(listed.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_responses_for_unknown_session_returns_empty() -> Result<()> {
    let store = MemoryStore::new();

    let listed = store.responses_for("no-such-session").await?;
    assert!(listed.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_transcripts_are_scoped_to_their_session() -> Result<()> {
    let store = MemoryStore::new();
    let a = store.insert_session(Session::new()).await?;
    let b = store.insert_session(Session::new()).await?;

    store
        .add_transcript(TranscriptEntry::new(&a.id, SpeakerRole::Interviewer, "for a"))
        .await?;
    store
        .add_transcript(TranscriptEntry::new(&b.id, SpeakerRole::Interviewer, "for b"))
        .await?;

    let for_a = store.transcripts_for(&a.id).await?;
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].text, "for a");

    let for_b = store.transcripts_for(&b.id).await?;
    assert_eq!(for_b.len(), 1);
    assert_eq!(for_b[0].text, "for b");

    Ok(())
}

#[tokio::test]
async fn test_json_store_enforces_the_same_contract() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = JsonStore::open(temp_dir.path())?;

    // Unknown-session write fails
    let orphan = TranscriptEntry::new("missing", SpeakerRole::Interviewer, "orphan");
    assert!(matches!(
        store.add_transcript(orphan).await,
        Err(StoreError::SessionNotFound(_))
    ));

    // Unknown-session read is empty
    assert!(store.transcripts_for("missing").await?.is_empty());

    // Known-session write succeeds
    let session = store.insert_session(Session::new()).await?;
    store
        .add_transcript(TranscriptEntry::new(&session.id, SpeakerRole::Candidate, "hello"))
        .await?;
    assert_eq!(store.transcripts_for(&session.id).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_json_store_persists_across_reopen() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let session_id = {
        let store = JsonStore::open(temp_dir.path())?;
        let session = store.insert_session(Session::new()).await?;

        store
            .add_transcript(
                TranscriptEntry::new(&session.id, SpeakerRole::Interviewer, "persisted line")
                    .with_confidence(0.9),
            )
            .await?;
        store
            .add_response(AiResponse::new(&session.id, "Why Rust?", "Memory safety."))
            .await?;

        session.id
    };

    // A fresh store over the same directory sees everything
    let reopened = JsonStore::open(temp_dir.path())?;

    let session = reopened.get_session(&session_id).await?;
    assert_eq!(session.id, session_id);

    let transcripts = reopened.transcripts_for(&session_id).await?;
    assert_eq!(transcripts.len(), 1);
    assert_eq!(transcripts[0].text, "persisted line");
    assert_eq!(transcripts[0].confidence, Some(0.9));

    let responses = reopened.responses_for(&session_id).await?;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].question, "Why Rust?");
    assert_eq!(responses[0].response, "Memory safety.");

    Ok(())
}

#[tokio::test]
async fn test_json_store_writes_one_file_per_collection() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = JsonStore::open(temp_dir.path())?;

    let session = store.insert_session(Session::new()).await?;
    store
        .add_transcript(TranscriptEntry::new(&session.id, SpeakerRole::Interviewer, "on disk"))
        .await?;
    store
        .add_response(AiResponse::new(&session.id, "Q", "A"))
        .await?;

    for file in ["sessions.json", "transcripts.json", "responses.json"] {
        let path = temp_dir.path().join(file);
        assert!(path.exists(), "{} should exist", file);

        // Snapshots must be valid JSON arrays
        let json = std::fs::read_to_string(&path)?;
        let parsed: serde_json::Value = serde_json::from_str(&json)?;
        assert!(parsed.is_array(), "{} should hold a JSON array", file);
    }

    Ok(())
}

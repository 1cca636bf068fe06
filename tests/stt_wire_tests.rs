use base64::Engine;
use interview_copilot::stt::messages::{TranscribeRequest, TranscribeResponse};

#[test]
fn test_transcribe_request_serialization() {
    let req = TranscribeRequest {
        pcm: base64::engine::general_purpose::STANDARD.encode([0u8; 100]),
        sample_rate: 16000,
        channels: 1,
        timestamp: "2026-08-23T14:30:00Z".to_string(),
    };

    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"sample_rate\":16000"));
    assert!(json.contains("\"channels\":1"));
    assert!(json.contains("2026-08-23T14:30:00Z"));

    let deserialized: TranscribeRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.sample_rate, 16000);
    assert_eq!(deserialized.channels, 1);
    assert_eq!(deserialized.pcm, req.pcm);
}

#[test]
fn test_transcribe_response_deserialization() {
    let json = r#"{
        "text": "Hello world",
        "confidence": 0.95
    }"#;

    let resp: TranscribeResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.text, "Hello world");
    assert_eq!(resp.confidence, Some(0.95));
}

#[test]
fn test_transcribe_response_no_confidence() {
    let json = r#"{
        "text": "No confidence score"
    }"#;

    let resp: TranscribeResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.text, "No confidence score");
    assert_eq!(resp.confidence, None);
}

#[test]
fn test_transcribe_response_empty_text() {
    let json = r#"{"text": ""}"#;

    let resp: TranscribeResponse = serde_json::from_str(json).unwrap();
    assert!(resp.text.is_empty());
}

#[test]
fn test_pcm_encoding_roundtrip() {
    let original_samples: Vec<i16> = vec![100, -200, 300, -400];

    // Convert to bytes
    let pcm_bytes: Vec<u8> = original_samples.iter()
        .flat_map(|&s| s.to_le_bytes())
        .collect();

    // Encode to base64
    let encoded = base64::engine::general_purpose::STANDARD.encode(&pcm_bytes);

    // Create request
    let req = TranscribeRequest {
        pcm: encoded,
        sample_rate: 16000,
        channels: 1,
        timestamp: "2026-08-23T14:30:00Z".to_string(),
    };

    // Serialize and deserialize
    let json = serde_json::to_string(&req).unwrap();
    let deserialized: TranscribeRequest = serde_json::from_str(&json).unwrap();

    // Decode base64
    let decoded_bytes = base64::engine::general_purpose::STANDARD
        .decode(&deserialized.pcm)
        .unwrap();

    // Convert back to i16 samples
    let decoded_samples: Vec<i16> = decoded_bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    assert_eq!(decoded_samples, original_samples);
}

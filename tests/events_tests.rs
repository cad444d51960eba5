// ABOUTME: Tests for Slack event envelope decoding and the actionable-event filter.
// ABOUTME: Bot-authored and text-less events must be dropped before parsing.

use chirpbridge::events::{actionable_event, EventEnvelope, MessageEvent};

// =============================================================================
// actionable_event tests
// =============================================================================

#[test]
fn test_plain_user_message_is_actionable() {
    let event = MessageEvent {
        bot_id: None,
        channel: Some("C024BE91L".to_string()),
        text: Some("new-content rust".to_string()),
    };
    assert_eq!(
        actionable_event(&event),
        Some(("C024BE91L".to_string(), "new-content rust".to_string()))
    );
}

#[test]
fn test_bot_authored_message_is_dropped() {
    let event = MessageEvent {
        bot_id: Some("B0123456".to_string()),
        channel: Some("C024BE91L".to_string()),
        text: Some("now".to_string()),
    };
    assert_eq!(actionable_event(&event), None);
}

#[test]
fn test_event_without_text_is_dropped() {
    let event = MessageEvent {
        bot_id: None,
        channel: Some("C024BE91L".to_string()),
        text: None,
    };
    assert_eq!(actionable_event(&event), None);
}

#[test]
fn test_event_without_channel_is_dropped() {
    let event = MessageEvent {
        bot_id: None,
        channel: None,
        text: Some("now".to_string()),
    };
    assert_eq!(actionable_event(&event), None);
}

#[test]
fn test_text_is_passed_through_verbatim() {
    let body = "tweet line 1\nline 2";
    let event = MessageEvent {
        bot_id: None,
        channel: Some("C1".to_string()),
        text: Some(body.to_string()),
    };
    let (_, text) = actionable_event(&event).unwrap();
    assert_eq!(text, body);
}

// =============================================================================
// EventEnvelope decoding tests
// =============================================================================

#[test]
fn test_decode_url_verification_envelope() {
    let body = r#"{"type": "url_verification", "challenge": "3eZbrw1aBm2rZgRNFdxV"}"#;
    let envelope: EventEnvelope = serde_json::from_str(body).unwrap();
    assert_eq!(envelope.kind, "url_verification");
    assert_eq!(envelope.challenge.as_deref(), Some("3eZbrw1aBm2rZgRNFdxV"));
    assert!(envelope.event.is_none());
}

#[test]
fn test_decode_event_callback_envelope() {
    let body = r#"{
        "type": "event_callback",
        "event": {
            "type": "message",
            "channel": "C024BE91L",
            "user": "U2147483697",
            "text": "now",
            "ts": "1355517523.000005"
        }
    }"#;
    let envelope: EventEnvelope = serde_json::from_str(body).unwrap();
    assert_eq!(envelope.kind, "event_callback");
    let event = envelope.event.unwrap();
    assert_eq!(event.channel.as_deref(), Some("C024BE91L"));
    assert_eq!(event.text.as_deref(), Some("now"));
    assert!(event.bot_id.is_none());
}

#[test]
fn test_decode_bot_message_envelope() {
    let body = r#"{
        "type": "event_callback",
        "event": {
            "type": "message",
            "channel": "C024BE91L",
            "bot_id": "B0123456",
            "text": "The time is 10:00:00"
        }
    }"#;
    let envelope: EventEnvelope = serde_json::from_str(body).unwrap();
    let event = envelope.event.unwrap();
    assert!(event.bot_id.is_some());
    assert_eq!(actionable_event(&event), None);
}

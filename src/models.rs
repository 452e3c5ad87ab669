use serde::{Deserialize, Serialize};

/// The only request type the skill answers.
pub const TYPE_SIMPLE_UTTERANCE: &str = "SimpleUtterance";

/// Incoming webhook call from the voice assistant
#[derive(Debug, Default, Deserialize)]
pub struct Request {
    /// IANA timezone of the user's device
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub request: SimpleUtterance,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub version: String,
}

/// What the user said
#[derive(Debug, Default, Deserialize)]
pub struct SimpleUtterance {
    #[serde(default)]
    pub command: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Session {
    /// First turn of a new dialog
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
}

/// Reply sent back to the voice assistant
#[derive(Debug, Serialize)]
pub struct Response {
    pub response: ResponsePayload,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ResponsePayload {
    /// Text the assistant speaks
    pub text: String,
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response: ResponsePayload { text: text.into() },
            version: "1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_missing_fields() {
        let req: Request = serde_json::from_str("{}").unwrap();
        assert_eq!(req.timezone, "");
        assert_eq!(req.request.kind, "");
        assert!(!req.session.new);
    }

    #[test]
    fn test_request_full() {
        let req: Request = serde_json::from_str(
            r#"{
                "timezone": "Europe/Moscow",
                "request": {"command": "привет", "type": "SimpleUtterance"},
                "session": {"new": true, "session_id": "s1", "user_id": "u1"},
                "version": "1.0"
            }"#,
        )
        .unwrap();
        assert_eq!(req.timezone, "Europe/Moscow");
        assert_eq!(req.request.kind, TYPE_SIMPLE_UTTERANCE);
        assert_eq!(req.request.command, "привет");
        assert!(req.session.new);
        assert_eq!(req.session.user_id, "u1");
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(Response::text("hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"response": {"text": "hi"}, "version": "1.0"})
        );
    }
}

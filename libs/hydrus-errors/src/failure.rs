//! Status-carrying failures (pure data model, no HTTP framework dependencies)

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type of every hydrus response, error bodies included.
pub const APPLICATION_LD_JSON: &str = "application/ld+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// A failed operation expressed the way an HTTP client will see it.
///
/// Storage backends, identity stores and the dispatch core all report their
/// failures as a `Failure`. The dispatch core forwards failures produced by
/// collaborators without touching either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Failure {
    /// HTTP status of the failure. Serializes as u16.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    /// Human-readable explanation, sent to the caller as is.
    pub message: String,
}

impl Failure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for Failure {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn failure_serializes_status_as_u16() {
        let f = Failure::not_found("Instance of type Drone with ID 3 not found");
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains("\"status\":404"));
        assert!(json.contains("\"message\":\"Instance of type Drone with ID 3 not found\""));
    }

    #[test]
    fn failure_deserializes_status_from_u16() {
        let json = r#"{"status":400,"message":"Class Foo not found"}"#;
        let f: Failure = serde_json::from_str(json).unwrap();
        assert_eq!(f.status, StatusCode::BAD_REQUEST);
        assert_eq!(f.message, "Class Foo not found");
    }

    #[test]
    fn failure_rejects_invalid_status() {
        let json = r#"{"status":1000,"message":"nope"}"#;
        assert!(serde_json::from_str::<Failure>(json).is_err());
    }

    #[test]
    fn display_includes_code_and_message() {
        let f = Failure::method_not_allowed("GET is not supported");
        assert_eq!(f.to_string(), "405: GET is not supported");
    }
}

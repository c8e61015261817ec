use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AgentError;

/// Wire form of an agent result: `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
///
/// Consumers branch on `success`; the error text is diagnostic only.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }
}

impl<T> From<Result<T, AgentError>> for Outcome<T> {
    fn from(result: Result<T, AgentError>) -> Self {
        match result {
            Ok(data) => Outcome::Success(data),
            Err(err) => Outcome::Failure(err.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Outcome::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawOutcome<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Outcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawOutcome::<T>::deserialize(deserializer)?;
        match (raw.success, raw.data, raw.error) {
            (true, Some(data), None) => Ok(Outcome::Success(data)),
            (false, None, Some(error)) => Ok(Outcome::Failure(error)),
            _ => Err(D::Error::custom(
                "outcome must carry `data` when successful or `error` when failed, not both",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stage;
    use serde_json::json;

    #[test]
    fn success_serializes_with_data_only() {
        let outcome: Outcome<String> = Ok("Edge Computing".to_string()).into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true, "data": "Edge Computing"})
        );
    }

    #[test]
    fn failure_serializes_error_message() {
        let outcome: Outcome<String> = Err(AgentError::Timeout {
            stage: Stage::Topic,
            seconds: 30,
        })
        .into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": false, "error": "Request timed out after 30 seconds"})
        );
        assert_eq!(outcome.error(), Some("Request timed out after 30 seconds"));
    }

    #[test]
    fn rejects_ambiguous_payloads() {
        let parsed: Outcome<u32> = serde_json::from_str(r#"{"success":true,"data":3}"#).unwrap();
        assert_eq!(parsed, Outcome::Success(3));

        let err = serde_json::from_str::<Outcome<u32>>(r#"{"success":true,"error":"x"}"#);
        assert!(err.is_err());
    }
}

use std::fmt;

/// Errors at the JSON boundary. Engine transitions themselves never fail.
#[derive(Debug)]
pub enum EngineError {
    InvalidRequest(String),
    UnknownFormat(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            EngineError::UnknownFormat(code) => write!(f, "Unknown match format: {}", code),
            EngineError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            EngineError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            EngineError::DeserializationError(err.to_string())
        } else {
            EngineError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_map_to_deserialization() {
        let err: EngineError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, EngineError::DeserializationError(_)));
        assert!(err.to_string().starts_with("Deserialization error:"));
    }

    #[test]
    fn test_display() {
        let err = EngineError::UnknownFormat("TEST".to_string());
        assert_eq!(err.to_string(), "Unknown match format: TEST");
    }
}

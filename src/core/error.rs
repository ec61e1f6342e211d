use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,
    ValidationFormatError,
    ValidationIndexOutOfBounds,

    FileNotFound,
    FileAlreadyExists,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationFormatError => "validation.format_error",
            ErrorCode::ValidationIndexOutOfBounds => "validation.index_out_of_bounds",

            ErrorCode::FileNotFound => "file.not_found",
            ErrorCode::FileAlreadyExists => "file.already_exists",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatErrorDetails {
    pub input: String,
    pub expected: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexOutOfBoundsDetails {
    pub requested: usize,
    pub length: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
            value,
        });

        Self::new(ErrorCode::ValidationInvalidArgument, problem, details)
    }

    pub fn validation_format(input: impl Into<String>, expected: impl Into<String>) -> Self {
        let input = input.into();
        let expected = expected.into();
        let message = format!("'{}' is not a valid {}", input, expected);
        let details = to_details(FormatErrorDetails { input, expected });

        Self::new(ErrorCode::ValidationFormatError, message, details)
    }

    pub fn validation_index_out_of_bounds(requested: usize, length: usize) -> Self {
        let details = to_details(IndexOutOfBoundsDetails { requested, length });

        Self::new(
            ErrorCode::ValidationIndexOutOfBounds,
            format!(
                "Requested {} characters but the text has only {}",
                requested, length
            ),
            details,
        )
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("File not found: {}", path);
        Self::new(ErrorCode::FileNotFound, message, to_details(PathDetails { path }))
    }

    pub fn file_already_exists(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("File already exists: {}", path);
        Self::new(
            ErrorCode::FileAlreadyExists,
            message,
            to_details(PathDetails { path }),
        )
        .with_hint("Pass overwrite = true to replace the existing file")
    }

    pub fn config_invalid_json(path: impl Into<String>, error: impl Into<String>) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: error.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid settings file",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_carries_field_in_details() {
        let err = Error::validation_invalid_argument("path", "Path cannot be empty", None);
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "path");
        assert!(err.details.get("value").is_none());
    }

    #[test]
    fn format_error_message_names_input() {
        let err = Error::validation_format("maybe", "boolean");
        assert_eq!(err.to_string(), "'maybe' is not a valid boolean");
        assert_eq!(err.details["expected"], "boolean");
    }

    #[test]
    fn already_exists_has_overwrite_hint() {
        let err = Error::file_already_exists("/tmp/a.txt");
        assert_eq!(err.hints.len(), 1);
        assert!(err.hints[0].message.contains("overwrite"));
    }
}

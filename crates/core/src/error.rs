use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {}", _0)]
    Authentication(String),

    #[error("Error talking to the API: {}", _0)]
    Transport(#[from] reqwest::Error),

    #[error("The API responded with status {}: {}", .status, .body)]
    Api { status: u16, body: String },

    #[error("Unexpected API response: {}", .0)]
    InvalidResponse(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("The config file is missing the `{}` field.", .0)]
    MissingConfigField(&'static str),

    #[error("Invalid `{}` in the config file: {}", .field, .reason)]
    InvalidConfigField { field: &'static str, reason: String },

    #[error("Could not read a password: {}", .0)]
    Password(String),

    #[error("Could not edit the text in $EDITOR: {}", .0)]
    Editor(String),

    #[error("No {} matches `{}`", .kind, .text)]
    EntityNotFound { kind: &'static str, text: String },

    #[error("{} {}s match `{}`, expected exactly one", .count, .kind, .text)]
    AmbiguousEntity {
        kind: &'static str,
        text: String,
        count: usize,
    },

    #[error("Invalid value `{}`: expected minutes (90), hours (1.5) or hours and minutes (1:30)", .0)]
    InvalidValue(String),

    #[error("Invalid date `{}`: expected a date like `Mon, 2024-01-01`", .0)]
    InvalidDate(String),

    #[error("Invalid week `{}`: expected a week like `2024-01-01 to 2024-01-07`", .0)]
    InvalidWeek(String),

    #[error("`{}` is not one of the available choices", .0)]
    UnknownChoice(String),

    #[error("Calendar command exited with a non-success code.")]
    CalendarExit,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Whether the error comes from text the user typed and the prompt should
    /// simply be shown again.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidValue(_)
                | Error::InvalidDate(_)
                | Error::InvalidWeek(_)
                | Error::UnknownChoice(_)
        )
    }
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Network unreachable, timeout, or a non-success HTTP status.
    Transport(String),
    /// The backend answered with a payload we could not interpret.
    MalformedResponse(String),
    /// The category page does not exist.
    CategoryNotFound(String),
    /// The category exists (or could not be probed) but holds no qualifying images.
    NoImages(String),
    /// The file page does not exist.
    FileNotFound(String),
    InvalidInput(InputError),
    /// The operation was aborted through its cancellation token.
    Cancelled,
    Config(String),
    Io(String),
}

/// Mistakes in what the user typed.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The category field was empty or whitespace only.
    EmptyCategory,

    /// The jump target is not a positive integer.
    InvalidJumpTarget(String),

    /// The jump target is past the end of the loaded list.
    JumpOutOfRange { requested: usize, len: usize },

    /// Navigation was requested before any category was loaded.
    EmptyGallery,
}

impl InputError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            InputError::EmptyCategory => "error-input-empty-category",
            InputError::InvalidJumpTarget(_) => "error-input-invalid-jump",
            InputError::JumpOutOfRange { .. } => "error-input-jump-out-of-range",
            InputError::EmptyGallery => "error-input-empty-gallery",
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyCategory => write!(f, "Please enter a category name"),
            InputError::InvalidJumpTarget(raw) => {
                write!(f, "Not a valid image number: {raw}")
            }
            InputError::JumpOutOfRange { requested, len } => {
                write!(f, "Image number {requested} is out of range (1-{len})")
            }
            InputError::EmptyGallery => write!(f, "No category loaded"),
        }
    }
}

impl Error {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Transport(_) => "error-transport",
            Error::MalformedResponse(_) => "error-malformed-response",
            Error::CategoryNotFound(_) => "error-category-not-found",
            Error::NoImages(_) => "error-no-images",
            Error::FileNotFound(_) => "error-file-not-found",
            Error::InvalidInput(input) => input.i18n_key(),
            Error::Cancelled => "error-cancelled",
            Error::Config(_) => "error-config",
            Error::Io(_) => "error-io",
        }
    }

    /// Whether this error means "nothing there" rather than "could not reach it".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CategoryNotFound(_) | Error::NoImages(_) | Error::FileNotFound(_)
        )
    }

    /// Raw detail carried by the error, passed to translations as `$detail`.
    pub fn detail(&self) -> String {
        match self {
            Error::Transport(msg)
            | Error::MalformedResponse(msg)
            | Error::CategoryNotFound(msg)
            | Error::NoImages(msg)
            | Error::FileNotFound(msg)
            | Error::Config(msg)
            | Error::Io(msg) => msg.clone(),
            Error::InvalidInput(input) => input.to_string(),
            Error::Cancelled => String::new(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "Network error: {}", e),
            Error::MalformedResponse(e) => write!(f, "Unexpected response: {}", e),
            Error::CategoryNotFound(name) => write!(f, "Category '{}' does not exist", name),
            Error::NoImages(name) => write!(f, "No images found in category: {}", name),
            Error::FileNotFound(title) => write!(f, "Could not retrieve info for image: {}", title),
            Error::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            Error::Cancelled => write!(f, "Operation cancelled"),
            Error::Config(e) => write!(f, "Invalid settings: {}", e),
            Error::Io(e) => write!(f, "I/O failure: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Error::InvalidInput(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

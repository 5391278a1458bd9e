use std::fmt;

/// The main error type for the imagefilter crate
#[derive(Debug)]
pub enum FilterError {
    /// An operator parameter violated its constraint
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A raw pixel buffer does not match the declared width and height
    Dimensions {
        width: u32,
        height: u32,
        len: usize,
    },

    /// Malformed or incomplete filter configuration
    Config(String),

    /// Error occurred while reading or decoding an image
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        FilterError::Config(msg.into())
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter `{}`: {}", name, reason)
            }
            FilterError::Dimensions { width, height, len } => write!(
                f,
                "Buffer of {} pixels does not match {}x{} texture",
                len, width, height
            ),
            FilterError::Config(msg) => write!(f, "Config error: {}", msg),
            FilterError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
            FilterError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            FilterError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::ImageDecode(e) | FilterError::ImageEncode(e) => Some(e),
            FilterError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for FilterError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match &err {
            image::ImageError::Encoding(_) => FilterError::ImageEncode(err),
            _ => FilterError::ImageDecode(err),
        }
    }
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::Io(err)
    }
}

impl From<json::Error> for FilterError {
    fn from(err: json::Error) -> Self {
        FilterError::Config(err.to_string())
    }
}

// Convenience type alias for Results using FilterError
pub type Result<T = ()> = std::result::Result<T, FilterError>;

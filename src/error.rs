use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Unable to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unable to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Please select only one option between --image and --imagetompl")]
    ConflictingOptions,

    #[error("Invalid color {0:?}: expected #rrggbb")]
    ParseColor(String),

    #[error("Duplicate catalog name: {0}")]
    DuplicateName(String),

    #[error("PNG encode error: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let error = PaletteError::InvalidParameter("k must be at least 1".to_string());
        assert_eq!(error.to_string(), "Invalid parameter: k must be at least 1");
    }

    #[test]
    fn test_conflicting_options_message() {
        let error = PaletteError::ConflictingOptions;
        assert_eq!(
            error.to_string(),
            "Please select only one option between --image and --imagetompl"
        );
    }

    #[test]
    fn test_parse_color_message() {
        let error = PaletteError::ParseColor("#12".to_string());
        assert_eq!(error.to_string(), "Invalid color \"#12\": expected #rrggbb");
    }

    #[test]
    fn test_image_load_has_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = PaletteError::ImageLoad {
            path: PathBuf::from("nope.png"),
            source: image::ImageError::IoError(io),
        };
        assert!(error.to_string().starts_with("Unable to load image nope.png"));
        assert!(error.source().is_some());
    }
}

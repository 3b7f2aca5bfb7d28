use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The page geometry cannot hold any content: non-positive dimensions,
    /// a margin of at least half the page width or height, or an image
    /// height fraction outside (0, 1]
    #[error("invalid page geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// The text measurer could not resolve the requested font and size
    /// combination. The run is aborted rather than silently substituting a
    /// fallback font, which would shift every wrapped line boundary
    #[error("cannot measure text in {font} at {size}pt")]
    MeasurementFailure { font: String, size: f32 },

    /// A figure carried neither declared pixel dimensions nor bytes the
    /// dimensions could be probed from, so no scale factor can be computed
    #[error("no usable pixel dimensions for figure \"{caption}\"")]
    ImageDimensionUnavailable { caption: String },

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a font face
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),
}

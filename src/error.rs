use std::collections::TryReserveError;

pub type NtscResult<T> = Result<T, NtscError>;

#[derive(thiserror::Error, Debug)]
pub enum NtscError {
    #[error("malformed header: {0}")]
    Header(String),

    #[error("image has incorrect width of {actual} instead of {expected}")]
    Width { actual: usize, expected: usize },

    #[error("image has incorrect height of {actual} instead of {expected}")]
    Height { actual: usize, expected: usize },

    #[error("incorrect data size of {actual} instead of {expected}")]
    PayloadSize { actual: usize, expected: usize },

    #[error("scanline row has {actual} pixels instead of {expected}")]
    RowLength { actual: usize, expected: usize },

    #[error("frame has {actual} samples instead of {expected}")]
    FrameLength { actual: usize, expected: usize },

    #[error("invalid duration of {0}us")]
    Duration(f64),

    #[error("timing error: {0}")]
    Timing(String),

    #[error("failed to allocate sample buffer: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite {
        written: usize,
        expected: usize,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl NtscError {
    pub fn header(msg: impl Into<String>) -> Self {
        Self::Header(msg.into())
    }

    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    /// The process exit status for this error class. Each boundary failure gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Header(_) => 2,
            Self::Width { .. } | Self::Height { .. } => 3,
            Self::PayloadSize { .. } => 4,
            Self::Allocation(_) => 5,
            Self::ShortWrite { .. } => 6,
            Self::Io(_) => 7,
            Self::Image(_) => 8,
            Self::RowLength { .. }
            | Self::FrameLength { .. }
            | Self::Duration(_)
            | Self::Timing(_) => 9,
        }
    }
}

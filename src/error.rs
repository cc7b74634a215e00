use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("duplicate series id `{id}` in data set")]
    DuplicateSeriesId { id: String },

    #[error("scene rejected batch: {0}")]
    Scene(String),
}

use thiserror::Error;

pub type SliderResult<T> = Result<T, SliderError>;

#[derive(Debug, Error)]
pub enum SliderError {
    #[error("invalid track width: {width}")]
    InvalidTrackWidth { width: f64 },

    #[error("range slider is already mounted")]
    AlreadyMounted,

    #[error("invalid data: {0}")]
    InvalidData(String),
}

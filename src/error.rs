use image::ImageError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Color count must be at least 1 (got {0})")]
    InvalidColorCount(usize),
    #[error("Invalid pixel data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
    #[error("Invalid extraction options: {0}")]
    InvalidOptions(String),
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("Error while decoding image: {0}")]
    Decode(#[from] ImageError),
}

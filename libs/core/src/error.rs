use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid block number: {0}")]
    InvalidBlockNumber(String),
}

pub type Result<T> = std::result::Result<T, Error>;

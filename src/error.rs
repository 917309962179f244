use std::io;

use thiserror::Error;

use crate::config::{MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};

#[derive(Error, Debug)]
pub enum Error {
    #[error("array size {0} is out of range, expected {min}..={max}", min = MIN_ARRAY_SIZE, max = MAX_ARRAY_SIZE)]
    InvalidArraySize(usize),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("audio error: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, Error>;

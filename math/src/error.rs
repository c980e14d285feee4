use std::{
    error::Error,
    fmt::{Display, Formatter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    InvalidLength { expected: usize, found: usize },
    NotAffine,
}

impl Display for MathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::InvalidLength { expected, found } => {
                write!(f, "Invalid length: expected {}, found {}", expected, found)
            }
            MathError::NotAffine => write!(f, "Bottom row of matrix is not [0, 0, 0, 1]"),
        }
    }
}

impl Error for MathError {}

pub type MathResult<T> = Result<T, MathError>;

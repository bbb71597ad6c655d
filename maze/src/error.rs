use std::{error::Error, fmt::Display};

use crate::grid::Point;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// A position outside of `[0, width) x [0, height)`
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
    /// A grid code that could not be decoded. Nothing was modified.
    InvalidCode(CodeError),
    /// Solving was requested without a start cell
    NoStart,
    /// The grid is locked while a solve is in progress
    Solving,
}

/// The reason a grid code was rejected
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeError {
    Base64(base64::DecodeError),
    Length { expected: usize, got: usize },
    Tag { index: usize, tag: u8 },
}

impl Display for MazeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MazeError::OutOfBounds {
                point,
                width,
                height,
            } => write!(f, "cell {} is outside of the {}x{} grid", point, width, height),
            MazeError::InvalidCode(e) => write!(f, "invalid grid code: {}", e),
            MazeError::NoStart => write!(f, "no start cell has been placed"),
            MazeError::Solving => write!(f, "the grid cannot be changed while solving"),
        }
    }
}

impl Display for CodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeError::Base64(e) => write!(f, "{}", e),
            CodeError::Length { expected, got } => {
                write!(f, "expected {} cells but got {}", expected, got)
            }
            CodeError::Tag { index, tag } => write!(f, "unknown cell tag {} at {}", tag, index),
        }
    }
}

impl Error for MazeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MazeError::InvalidCode(CodeError::Base64(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<CodeError> for MazeError {
    fn from(e: CodeError) -> Self {
        MazeError::InvalidCode(e)
    }
}

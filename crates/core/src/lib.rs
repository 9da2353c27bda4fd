//! Core shared types and errors (math-agnostic leaf).

use thiserror::Error;

pub mod angle;
pub mod float;

pub use angle::AngleNotation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("point of view and target coincide, view direction is undefined")]
    DegenerateViewDirection,
    #[error("up direction is the null vector")]
    NullUpVector,
    #[error("up direction is parallel to the view direction")]
    CollinearUpVector,
    #[error("near and far clip planes are equal")]
    EqualClipPlanes,
    #[error("vertical field of view is zero")]
    ZeroFieldOfView,
    #[error("aspect ratio is zero")]
    ZeroAspectRatio,
    #[error("unknown angle notation: {0}")]
    InvalidAngleNotation(String),
}

pub type MathResult<T> = Result<T, MathError>;

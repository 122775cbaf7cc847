use thiserror::Error;

/// Errors raised while validating a [`RingConfig`](crate::geometry::RingConfig).
///
/// All of these are setup-time failures. Runtime inputs such as progress
/// values and durations are normalized instead of rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("inactive track width ({inactive}) must be at least the track width ({track})")]
    TrackWiderThanInactive { track: f32, inactive: f32 },
    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("radius ({radius}) must be at least the inactive track width ({inactive})")]
    RadiusTooSmall { radius: f32, inactive: f32 },
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
}

/// Failure to parse a CSS-like color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("malformed hex color '{0}'")]
    Hex(String),
    #[error("malformed functional color '{0}'")]
    Functional(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

/// Failure to deliver a command to a running engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("the progress ring this handle points to has been dropped")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

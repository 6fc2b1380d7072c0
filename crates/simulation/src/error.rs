// ---------------------------------------------------------------------------
// ElevatorError: typed failures for the height engine and its parameters
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised by the height engine.
///
/// The pure derivations (altitude, temperature, blend, visibility) never fail;
/// only the crossing tracker and parameter loading produce these.
#[derive(Debug)]
pub enum ElevatorError {
    /// The crossing tracker was fed a negative or non-finite altitude.
    InvalidAltitude(f64),
    /// A parameter set failed validation.
    InvalidParams(String),
    /// I/O error while reading a parameter file.
    Io(std::io::Error),
    /// A parameter file was not valid JSON for `ElevatorParams`.
    Parse(String),
}

impl fmt::Display for ElevatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorError::InvalidAltitude(value) => {
                write!(f, "Invalid altitude: {value} (must be finite and >= 0)")
            }
            ElevatorError::InvalidParams(msg) => write!(f, "Invalid parameters: {msg}"),
            ElevatorError::Io(e) => write!(f, "I/O error: {e}"),
            ElevatorError::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ElevatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ElevatorError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ElevatorError {
    fn from(e: std::io::Error) -> Self {
        ElevatorError::Io(e)
    }
}

impl From<serde_json::Error> for ElevatorError {
    fn from(e: serde_json::Error) -> Self {
        ElevatorError::Parse(e.to_string())
    }
}

//! Failures of a `particle-field` invocation and the exit code each maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | rendered or listed successfully |
//! | 2    | rejected by clap before `run` starts |
//! | 10   | the simulation could not be set up (viewport, pixmap size) |
//! | 11   | a seed file could not be read or the PNG could not be written |
//! | 12   | a flag or seed value was malformed (pointer, theme, params) |
//! | 13   | the JSON report could not be produced |

use particle_field_core::FieldError;
use std::fmt;

pub enum CliError {
    /// Viewport or pixmap setup failed.
    Field(FieldError),
    /// Reading a seed file or writing the snapshot failed.
    Io(String),
    /// A user-supplied value did not parse or was out of range.
    Input(String),
    /// `--json` output could not be serialized.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl From<FieldError> for CliError {
    /// Routes core errors by who is at fault: bad values the user typed
    /// become `Input`, file trouble becomes `Io`, the rest stays `Field`.
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            e @ (FieldError::ParamTypeMismatch { .. }
            | FieldError::InvalidParam { .. }
            | FieldError::InvalidColor(_)
            | FieldError::UnknownTheme(_)) => CliError::Input(e.to_string()),
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

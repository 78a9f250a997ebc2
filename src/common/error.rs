use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RenderError {
    InvalidGridSize(usize),
    NonSquareGrid { len: usize, width: usize },
    EmptyGrid,
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::InvalidGridSize(w) => write!(f, "Grid width {w} is outside the QR size envelope"),
            Self::NonSquareGrid { len, width } => {
                write!(f, "Grid buffer of length {len} doesn't match width {width}")
            }
            Self::EmptyGrid => f.write_str("Empty grid"),
        }
    }
}

impl std::error::Error for RenderError {}

pub type RenderResult<T> = Result<T, RenderError>;

// Warning
//------------------------------------------------------------------------------

// Non-fatal configuration fallbacks. Rendering always completes; these are
// carried in the output instead of being raised.
#[derive(Debug, PartialEq, Clone)]
pub enum RenderWarning {
    UnknownStyle { requested: String },
    UnknownConnectivity { requested: String },
    UnknownOptimization { requested: String },
    ParameterClamped { name: &'static str, requested: f32 },
}

impl Display for RenderWarning {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::UnknownStyle { requested } => {
                write!(f, "Unknown style {requested:?}, falling back to square")
            }
            Self::UnknownConnectivity { requested } => {
                write!(f, "Unknown connectivity {requested:?}, falling back to four-way")
            }
            Self::UnknownOptimization { requested } => {
                write!(f, "Unknown optimization level {requested:?}, falling back to medium")
            }
            Self::ParameterClamped { name, requested } => {
                write!(f, "Parameter {name} = {requested} clamped to [0, 1]")
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RenderError::InvalidGridSize(20).to_string(),
            "Grid width 20 is outside the QR size envelope"
        );
        assert_eq!(
            RenderError::NonSquareGrid { len: 10, width: 21 }.to_string(),
            "Grid buffer of length 10 doesn't match width 21"
        );
    }

    #[test]
    fn test_warning_display() {
        let w = RenderWarning::UnknownStyle { requested: "blobby".into() };
        assert_eq!(w.to_string(), "Unknown style \"blobby\", falling back to square");
    }
}

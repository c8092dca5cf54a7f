use crate::records::TOTAL_SIZE;

#[derive(Debug)]
pub enum Error {
    FromInt(std::num::TryFromIntError),
    Io(std::io::Error),
    InvalidArgument(String),
    PartialWord { index: usize, len: usize },
    RangeOverflow { index: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FromInt(err) => err.fmt(f),
            Self::Io(err) => err.fmt(f),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::PartialWord { index, len } => write!(
                f,
                "Partial word at index {index}: {len} trailing byte(s), image length must be a multiple of 4"
            ),
            Self::RangeOverflow { index } => write!(
                f,
                "Word index {index} is beyond memory depth {TOTAL_SIZE}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FromInt(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(value: std::num::TryFromIntError) -> Self {
        Self::FromInt(value)
    }
}

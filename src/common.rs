use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by any phase of a submission.
///
/// Every variant displays as its message alone; `line` is carried for logs
/// and for hosts that want to point at the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{message}")]
    Lex { message: String, line: usize },

    #[error("{message}")]
    Parse { message: String, line: usize },

    #[error("{message}")]
    Runtime { message: String, line: usize },
}

impl Error {
    pub fn runtime(message: impl Into<String>, line: usize) -> Self {
        Error::Runtime {
            message: message.into(),
            line,
        }
    }

    pub fn undefined_variable(name: &str, line: usize) -> Self {
        Self::runtime(format!("Undefined variable '{}'", name), line)
    }

    pub fn line(&self) -> usize {
        match self {
            Error::Lex { line, .. } | Error::Parse { line, .. } | Error::Runtime { line, .. } => {
                *line
            }
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            Error::Lex { .. } => "lex",
            Error::Parse { .. } => "parse",
            Error::Runtime { .. } => "runtime",
        }
    }
}

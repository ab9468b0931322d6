use crate::parsec::ParsecError;
use crate::request::RequestError;

/// Exit code for bad input, unreadable files, or failed writes.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for a singular boundary system.
pub const EXIT_SINGULAR: u8 = 3;
/// Exit code for internal numerical failures.
pub const EXIT_NUMERICAL: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ParsecError> for AppError {
    fn from(err: ParsecError) -> Self {
        let exit_code = match err {
            ParsecError::InvalidParameter { .. } => EXIT_INPUT,
            ParsecError::SingularMatrix { .. } => EXIT_SINGULAR,
            ParsecError::DimensionMismatch { .. } | ParsecError::NumericalFailure(_) => EXIT_NUMERICAL,
        };
        Self::new(exit_code, err.to_string())
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Solve(inner) => inner.into(),
            other => Self::new(EXIT_INPUT, other.to_string()),
        }
    }
}

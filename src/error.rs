use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Invalid format. Use: <number> <operator> <number> (try 'help')")]
    MalformedExpression,
    #[error("Division by zero is not allowed")]
    DivisionByZero,
}

impl Error {
    /// Evaluation failures are reported to the user and the session goes on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedExpression | Error::DivisionByZero)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use dssp_core::workflows::WorkflowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("{0}")]
    Argument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Prints the error and its causes to stderr, one `>> ` indent per
/// nesting level.
pub fn print_error_chain(error: &CliError) {
    eprintln!("{error}");
    let mut indent = String::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        indent.push_str(">> ");
        eprintln!("{indent}{cause}");
        source = cause.source();
    }
}

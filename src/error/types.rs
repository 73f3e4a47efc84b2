use thiserror::Error;

/// Unified result type for the hexstat crate.
pub type Result<T> = std::result::Result<T, DashError>;

/// Errors surfaced by the dashboard runtime.
///
/// Drawing itself cannot fail; only terminal I/O and event polling can.
#[derive(Debug, Error)]
pub enum DashError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

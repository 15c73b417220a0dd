//! Identity Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    /// A setter was invoked on a frozen principal. This signals caller
    /// misuse (mutating a value obtained specifically to prevent mutation)
    /// and should propagate rather than be handled.
    #[error("Principal is frozen: mutation not permitted")]
    FrozenMutation,
}

pub type Result<T> = std::result::Result<T, IdentityError>;

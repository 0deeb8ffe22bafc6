use thiserror::Error;

use crate::repositories;

#[derive(Debug, Error)]
pub enum Error {
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("This is not allowed")]
    Forbidden,
    #[error("The access code has already been used")]
    AccessCodeUsed,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

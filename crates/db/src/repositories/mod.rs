mod issue_repo;
mod parent_repo;
mod todo_repo;

pub use issue_repo::IssueRepo;
pub use parent_repo::ParentRepo;
pub use todo_repo::TodoRepo;

use scrumboard_core::error::CoreError;

use crate::store::StoreError;

/// Failure of a repository operation: either a domain outcome (not found,
/// conflict) or the store itself failing.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

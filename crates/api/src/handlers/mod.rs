pub mod backlog;
pub mod issue;
pub mod sprint;
pub mod todo;

// Module declarations
mod merge;
pub mod types;

// Public API re-exports
pub use merge::{merge, parse_pr_number};

// Re-export commonly used types for convenience
pub use types::{AbortPoint, BranchDeletion, MergeOutcome, MergeRequest};

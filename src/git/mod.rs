mod branch;
mod merge;
mod remote;
mod repo;
mod status;
mod types;

pub use branch::*;
pub use merge::*;
pub use remote::*;
pub use repo::*;
pub use status::*;
pub use types::*;

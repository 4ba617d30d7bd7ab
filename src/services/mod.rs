pub use auth::*;
pub use generate::*;
pub use jobs::*;
pub use storage::*;

mod auth;
mod generate;
mod jobs;
mod storage;

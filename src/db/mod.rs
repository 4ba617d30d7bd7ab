pub use ads::*;
pub use blogs::*;
pub use build_events::*;
pub use campaigns::*;
pub use content_images::*;
pub use db::*;
pub use generation::*;
pub use leads::*;
pub use products::*;
pub use sops::*;
pub use stats::*;
pub use users::*;

mod ads;
mod blogs;
mod build_events;
mod campaigns;
mod content_images;
mod db;
mod generation;
mod leads;
mod products;
mod sops;
mod stats;
mod users;

pub use ad::*;
pub use blog::*;
pub use build_event::*;
pub use campaign::*;
pub use content_image::*;
pub use generation::*;
pub use lead::*;
pub use product::*;
pub use sop::*;
pub use user::*;

mod ad;
mod blog;
mod build_event;
mod campaign;
mod content_image;
mod generation;
mod lead;
mod product;
mod sop;
mod user;

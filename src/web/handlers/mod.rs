pub mod ads;
pub mod auth;
pub mod blogs;
pub mod campaigns;
pub mod dashboard;
pub mod events;
pub mod images;
pub mod leads;
pub mod products;
pub mod public;
pub mod sops;
pub mod studio;
pub mod uploads;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    auth::configure(cfg);
    dashboard::configure(cfg);
    blogs::configure(cfg);
    images::configure(cfg);
    ads::configure(cfg);
    leads::configure(cfg);
    products::configure(cfg);
    campaigns::configure(cfg);
    events::configure(cfg);
    sops::configure(cfg);
    studio::configure(cfg);
    uploads::configure(cfg);
}

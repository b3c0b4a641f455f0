//! Candidate sites and their development lifecycle

mod generation;
pub mod lifecycle;
mod site;

pub use generation::generate_sites;
pub use lifecycle::{complete_construction, investigate, secure, start_development};
pub use site::{Site, SiteGeology, SiteStatus, MAX_INVESTIGATION_LEVEL};

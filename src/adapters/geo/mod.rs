//! Location collaborator adapters: geocoding and technical summary.

mod nominatim;
mod summary_client;

pub use nominatim::NominatimGeocoder;
pub use summary_client::SummaryClient;

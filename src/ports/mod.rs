//! Ports: the narrow interfaces through which the application layer talks
//! to external collaborators and storage. Adapters implement these.

mod geocoding;
mod scoring_strategy;
mod session_store;
mod technical_summary;
mod text_generator;

pub use geocoding::{GeoError, GeoPoint, Geocoder};
pub use scoring_strategy::{ScoringError, ScoringStrategy};
pub use session_store::{SessionStore, SessionStoreError};
pub use technical_summary::{
    ClimateSummary, SolarSummary, TechnicalSummary, TechnicalSummaryProvider, WindSummary,
};
pub use text_generator::{CompletionError, TextGenerator};

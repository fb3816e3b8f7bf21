//! The structured house/consumption/location profile collected from the user.

mod extraction;
mod user_profile;

pub use extraction::{
    parse_extraction, ExtractedProfile, ExtractionError, ExtractionOutcome,
};
pub use user_profile::{
    Building, BuildingType, Consumption, Electrical, GridPhase, HeatingFuel, InsulationLevel,
    Location, RequiredField, Roof, UserProfile,
};

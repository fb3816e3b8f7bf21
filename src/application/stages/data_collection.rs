//! Data collection stage: turns chat messages into a structured profile.
//!
//! Each non-empty turn goes to the text-extraction collaborator together
//! with the current profile; whatever comes back is normalized and merged.
//! The stage completes once every required field is filled, at which point
//! it resolves the address and fetches the technical summary exactly once.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::profile::{parse_extraction, ExtractedProfile, ExtractionOutcome};
use crate::domain::session::Session;
use crate::ports::{Geocoder, TechnicalSummary, TechnicalSummaryProvider, TextGenerator};

use super::StageResponse;

/// Greeting returned for an empty first turn; always the entry question,
/// independent of what the profile already contains.
pub const GREETING: &str = "Hello! I am your energy advisor. I will help you find the right \
     way to cut your energy costs. 🌱\n\nLet's start with the basics. In which town or city \
     is your property located?";

/// Reply to an off-topic message.
const CLARIFICATION: &str = "I can only help with your property and its energy use. Could you \
     tell me a bit more about your home, for example where it is located?";

/// Reply once the profile is complete.
const DATA_COMPLETE: &str = "Great, I have everything I need! 📊\nI am now analysing the \
     climate conditions of your location and the technical options...";

const EXTRACTION_SYSTEM: &str =
    "You are a strict JSON extraction assistant. Respond ONLY with valid JSON.";

/// Coordinates used when geocoding fails, so one flaky lookup never stalls
/// the whole conversation.
const FALLBACK_COORDINATES: (f64, f64) = (48.7164, 21.2611);

/// Handler for the data collection stage.
pub struct DataCollectionStage {
    generator: Arc<dyn TextGenerator>,
    geocoder: Arc<dyn Geocoder>,
    summary: Arc<dyn TechnicalSummaryProvider>,
}

impl DataCollectionStage {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        geocoder: Arc<dyn Geocoder>,
        summary: Arc<dyn TechnicalSummaryProvider>,
    ) -> Self {
        Self {
            generator,
            geocoder,
            summary,
        }
    }

    /// Runs one data collection turn.
    pub async fn handle(&self, session: &mut Session, message: &str) -> StageResponse {
        if message.trim().is_empty() {
            return StageResponse::incomplete(GREETING, 10);
        }

        match self.extract(message, session).await {
            ExtractionOutcome::Irrelevant => {
                return StageResponse::incomplete(
                    CLARIFICATION,
                    session.profile.collection_progress(),
                );
            }
            ExtractionOutcome::Fields(extracted) => {
                session.profile.merge(&extracted);
            }
        }

        let missing = session.profile.missing_required_fields();
        if let Some(first) = missing.first() {
            debug!(missing = missing.len(), "profile still incomplete");
            return StageResponse::incomplete(
                first.question(),
                session.profile.collection_progress(),
            );
        }

        self.fetch_technical(session).await;

        StageResponse::complete(DATA_COMPLETE, 25)
    }

    /// Sends the message plus known profile to the extraction collaborator.
    ///
    /// Any failure (network, API, or unparseable output) degrades to an
    /// empty extraction; the stage just asks its next question.
    async fn extract(&self, message: &str, session: &Session) -> ExtractionOutcome {
        let prompt = extraction_prompt(message, session);

        let raw = match self
            .generator
            .respond(EXTRACTION_SYSTEM, &prompt, None)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "extraction collaborator failed, treating as empty");
                return ExtractionOutcome::Fields(ExtractedProfile::default());
            }
        };

        match parse_extraction(&raw) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "extraction output unparseable, treating as empty");
                ExtractionOutcome::Fields(ExtractedProfile::default())
            }
        }
    }

    /// Resolves the address and fetches the technical summary, exactly once
    /// per session. Every failure degrades to the documented fallbacks.
    async fn fetch_technical(&self, session: &mut Session) {
        if session.technical.is_some() {
            return;
        }

        let address = session.profile.location.address.clone().unwrap_or_default();

        let (lat, lon) = match self.geocoder.geocode(&address).await {
            Ok(Some(point)) => (point.lat, point.lon),
            Ok(None) => {
                warn!(address, "address not found, using fallback coordinates");
                FALLBACK_COORDINATES
            }
            Err(e) => {
                warn!(error = %e, "geocoding failed, using fallback coordinates");
                FALLBACK_COORDINATES
            }
        };

        let summary = match self.summary.summary(lat, lon).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "technical summary failed, using fallback data");
                TechnicalSummary::default()
            }
        };

        session.attach_technical(summary.into_technical_data());
    }
}

/// The extraction prompt: the message, the known profile, and the canonical
/// key list the model must use.
fn extraction_prompt(message: &str, session: &Session) -> String {
    format!(
        "Extract property information from this message: '{}'\n\n\
         Currently known data: {}\n\n\
         Look for:\n\
         - address (town/city)\n\
         - building_type (family_house, apartment, company)\n\
         - heated_area_m2 (heated floor area in m²)\n\
         - insulation_level (poor, average, good, excellent)\n\
         - electricity_kwh_year (yearly electricity consumption in kWh)\n\
         - heating_fuel (gas, electricity, wood)\n\
         - roof_area_m2 (usable roof area in m²)\n\
         - phase (1f or 3f)\n\n\
         Respond with a single valid JSON object only (no extra text, no \
         code fences). Use exactly the keys above and omit anything the \
         message does not mention. If the message is unrelated to the \
         property or its energy use, respond with {{\"irrelevant\": true}}.",
        message,
        serde_json::to_string(&session.profile).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::ports::{CompletionError, GeoError, GeoPoint};
    use async_trait::async_trait;

    struct StubGeocoder {
        point: Option<GeoPoint>,
        fail: bool,
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<GeoPoint>, GeoError> {
            if self.fail {
                Err(GeoError::network("stub down"))
            } else {
                Ok(self.point.clone())
            }
        }
    }

    struct StubSummary {
        fail: bool,
    }

    #[async_trait]
    impl TechnicalSummaryProvider for StubSummary {
        async fn summary(&self, _lat: f64, _lon: f64) -> Result<TechnicalSummary, GeoError> {
            if self.fail {
                Err(GeoError::network("stub down"))
            } else {
                Ok(TechnicalSummary {
                    solar: Some(crate::ports::SolarSummary {
                        yearly_kwh_per_kwp: 1150.0,
                        optimal_angle: 34.0,
                    }),
                    wind: Some(crate::ports::WindSummary { mean_speed: 5.2 }),
                    climate: Some(crate::ports::ClimateSummary { average_temp: 10.4 }),
                })
            }
        }
    }

    fn stage(generator: MockTextGenerator) -> DataCollectionStage {
        DataCollectionStage::new(
            Arc::new(generator),
            Arc::new(StubGeocoder {
                point: Some(GeoPoint {
                    display_address: "Košice, Slovakia".to_string(),
                    lat: 48.7164,
                    lon: 21.2611,
                }),
                fail: false,
            }),
            Arc::new(StubSummary { fail: false }),
        )
    }

    fn complete_extraction() -> &'static str {
        r#"{"address": "Kosice", "building_type": "family_house", "heated_area_m2": 120,
            "insulation_level": "good", "electricity_kwh_year": 4500, "heating_fuel": "gas",
            "roof_area_m2": 60, "phase": "3f"}"#
    }

    #[tokio::test]
    async fn empty_message_returns_the_greeting() {
        let stage = stage(MockTextGenerator::new());
        let mut session = Session::new();

        let response = stage.handle(&mut session, "").await;

        assert_eq!(response.message, GREETING);
        assert!(!response.is_complete);
        assert_eq!(response.progress, 10);
    }

    #[tokio::test]
    async fn greeting_ignores_existing_profile_content() {
        let stage = stage(MockTextGenerator::new());
        let mut session = Session::new();
        session.profile.location.address = Some("Kosice".to_string());

        let response = stage.handle(&mut session, "   \n ").await;

        assert_eq!(response.message, GREETING);
        assert_eq!(response.progress, 10);
    }

    #[tokio::test]
    async fn partial_extraction_asks_for_the_first_missing_field() {
        let generator = MockTextGenerator::new()
            .with_response(r#"{"address": "Kosice", "building_type": "family_house"}"#);
        let stage = stage(generator);
        let mut session = Session::new();

        let response = stage.handle(&mut session, "I live in Kosice, family house").await;

        assert!(!response.is_complete);
        // Next missing field after address and building type is heated area.
        assert!(response.message.contains("heated floor area"));
        assert_eq!(session.profile.location.address.as_deref(), Some("Kosice"));
        assert_eq!(response.progress, session.profile.collection_progress());
    }

    #[tokio::test]
    async fn collaborator_failure_degrades_to_empty_extraction() {
        let generator =
            MockTextGenerator::new().with_error(CompletionError::network("api down"));
        let stage = stage(generator);
        let mut session = Session::new();
        session.profile.location.address = Some("Kosice".to_string());

        let response = stage.handle(&mut session, "my house is big").await;

        assert!(!response.is_complete);
        // Existing profile untouched, next question asked.
        assert_eq!(session.profile.location.address.as_deref(), Some("Kosice"));
        assert!(response.message.contains("family house"));
    }

    #[tokio::test]
    async fn unparseable_output_degrades_to_empty_extraction() {
        let generator = MockTextGenerator::new().with_response("I don't feel like JSON today");
        let stage = stage(generator);
        let mut session = Session::new();

        let response = stage.handle(&mut session, "hello there").await;

        assert!(!response.is_complete);
        assert_eq!(session.profile, Default::default());
    }

    #[tokio::test]
    async fn irrelevant_message_asks_for_clarification_without_consuming_fields() {
        let generator = MockTextGenerator::new().with_response(r#"{"irrelevant": true}"#);
        let stage = stage(generator);
        let mut session = Session::new();
        session.profile.location.address = Some("Kosice".to_string());
        let progress_before = session.profile.collection_progress();

        let response = stage.handle(&mut session, "what's the weather in Tokyo?").await;

        assert!(!response.is_complete);
        assert_eq!(response.message, CLARIFICATION);
        assert_eq!(response.progress, progress_before);
        assert_eq!(session.profile.location.address.as_deref(), Some("Kosice"));
    }

    #[tokio::test]
    async fn complete_profile_fetches_technical_data_and_completes() {
        let generator = MockTextGenerator::new().with_response(complete_extraction());
        let stage = stage(generator);
        let mut session = Session::new();

        let response = stage.handle(&mut session, "all my data at once").await;

        assert!(response.is_complete);
        assert_eq!(response.message, DATA_COMPLETE);
        assert_eq!(response.progress, 25);
        let technical = session.technical.as_ref().unwrap();
        assert_eq!(technical.solar.yearly_kwh_per_kwp, 1150.0);
    }

    #[tokio::test]
    async fn geocode_and_summary_failures_fall_back_instead_of_stalling() {
        let generator = MockTextGenerator::new().with_response(complete_extraction());
        let stage = DataCollectionStage::new(
            Arc::new(generator),
            Arc::new(StubGeocoder {
                point: None,
                fail: true,
            }),
            Arc::new(StubSummary { fail: true }),
        );
        let mut session = Session::new();

        let response = stage.handle(&mut session, "all my data at once").await;

        assert!(response.is_complete);
        assert_eq!(
            session.technical,
            Some(crate::domain::technical::TechnicalData::fallback())
        );
    }

    #[tokio::test]
    async fn extraction_prompt_carries_message_and_profile() {
        let generator = MockTextGenerator::new().with_response(r#"{"address": "Poprad"}"#);
        let calls_handle = generator.clone();
        let stage = stage(generator);
        let mut session = Session::new();
        session.profile.building.heated_area_m2 = Some(90.0);

        stage.handle(&mut session, "I am in Poprad").await;

        let calls = calls_handle.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("I am in Poprad"));
        assert!(calls[0].contains("90"));
        assert!(calls[0].contains("irrelevant"));
    }
}

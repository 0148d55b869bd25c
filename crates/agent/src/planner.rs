//! Root trip-planner orchestration.
//!
//! Delegates sub-tasks to the specialists, collects their markdown replies
//! into named sections, and drives exports through the tool registry. The
//! planner owns no formatting logic: section texts pass through to the
//! compiler untouched.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use waypoint_core::TripCosts;

use crate::llm::LlmClient;
use crate::specialists::{
    SpecialistAgent, FLIGHT_RECOMMENDER, FOOD_RECOMMENDER, HOTEL_RECOMMENDER,
    ITINERARY_RECOMMENDER,
};
use crate::tools::{ToolRegistry, DELETE_FILE_TOOL, EXPORT_DOC_TOOL, EXPORT_SHEET_TOOL};

/// What the traveler asked for, in the planner's own vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub travel_dates: Option<String>,
    pub interests: Option<String>,
    pub cuisine_preferences: Option<String>,
}

/// Section texts gathered from the specialists, ready for document export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripPlanOutline {
    pub flights: String,
    pub hotels: String,
    pub itinerary: String,
    pub food: Option<String>,
}

pub struct TripPlanner {
    flights: SpecialistAgent,
    hotels: SpecialistAgent,
    itinerary: SpecialistAgent,
    food: SpecialistAgent,
    tools: ToolRegistry,
}

impl TripPlanner {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self {
            flights: SpecialistAgent::new(FLIGHT_RECOMMENDER, Arc::clone(&llm)),
            hotels: SpecialistAgent::new(HOTEL_RECOMMENDER, Arc::clone(&llm)),
            itinerary: SpecialistAgent::new(ITINERARY_RECOMMENDER, Arc::clone(&llm)),
            food: SpecialistAgent::new(FOOD_RECOMMENDER, llm),
            tools,
        }
    }

    /// Gather the descriptive plan: flights, hotels, itinerary, and food
    /// recommendations when cuisine preferences were given.
    pub async fn gather_outline(&self, request: &TripRequest) -> Result<TripPlanOutline> {
        let route = format!("from {} to {}", request.origin, request.destination);
        let dates = request.travel_dates.as_deref().unwrap_or("flexible dates");

        let flights = self.flights.run(&format!("Find flights {route} for {dates}.")).await?;
        let hotels = self
            .hotels
            .run(&format!("Find hotels in {} for {dates}.", request.destination))
            .await?;
        let itinerary = self
            .itinerary
            .run(&format!(
                "Create an itinerary for {} over {dates}, interests: {}.",
                request.destination,
                request.interests.as_deref().unwrap_or("general sightseeing"),
            ))
            .await?;

        let food = match request.cuisine_preferences.as_deref() {
            Some(preferences) => Some(
                self.food
                    .run(&format!(
                        "Recommend dining in {} matching: {preferences}. Itinerary:\n{itinerary}",
                        request.destination,
                    ))
                    .await?,
            ),
            None => None,
        };

        info!(destination = %request.destination, "trip outline gathered");
        Ok(TripPlanOutline { flights, hotels, itinerary, food })
    }

    /// Export the descriptive plan to the document service. Returns the
    /// tool's structured outcome verbatim.
    pub async fn export_plan_document(
        &self,
        outline: &TripPlanOutline,
        document_title: Option<&str>,
    ) -> Result<Value> {
        self.tools
            .execute(
                EXPORT_DOC_TOOL,
                json!({
                    "flight_data": outline.flights,
                    "hotel_data": outline.hotels,
                    "itinerary_data": outline.itinerary,
                    "food_data": outline.food,
                    "document_title": document_title,
                }),
            )
            .await
    }

    /// Export a financial plan to the spreadsheet service. The summary and
    /// row arithmetic happen behind the tool, not in a model call.
    pub async fn export_finance_plan(
        &self,
        request: &TripRequest,
        costs: TripCosts,
        spreadsheet_id: Option<&str>,
        append: bool,
    ) -> Result<Value> {
        info!(destination = %request.destination, "exporting financial plan");
        self.tools
            .execute(
                EXPORT_SHEET_TOOL,
                json!({
                    "costs": costs,
                    "source": request.origin,
                    "destination": request.destination,
                    "spreadsheet_id": spreadsheet_id,
                    "append_data": append,
                }),
            )
            .await
    }

    /// Permanently delete a previously exported file by its identifier.
    pub async fn delete_exported_file(&self, file_id: &str) -> Result<Value> {
        self.tools.execute(DELETE_FILE_TOOL, json!({ "file_id": file_id })).await
    }
}

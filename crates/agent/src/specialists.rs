//! Specialist agent definitions.
//!
//! Each specialist is a named instruction set run against the shared LLM
//! seam. Every instruction mandates the same constrained markdown dialect so
//! the replies feed straight into the document compiler: `**bold**`,
//! `*italic*` or `_italic_`, and lines starting with `"* "` for bullets.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::llm::LlmClient;

/// Formatting rules shared by every specialist instruction.
const MARKDOWN_RULES: &str = "\
When generating text output, use markdown for formatting:\n\
- Wrap text in **double asterisks** for bold.\n\
- Wrap text in *single asterisks* or _underscores_ for italics.\n\
- Start lines with `* ` for bullet points.\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialistSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
}

pub const FLIGHT_RECOMMENDER: SpecialistSpec = SpecialistSpec {
    name: "flight_recommender",
    description: "Looks up flight options from one location to another",
    instruction: "You are a specialized flight recommendation assistant. Find and \
present flight options for the requested origin, destination, and dates. Compile the \
details with clear labels, for example: `**Airline:** MyAir\n* Route: LAX to JFK\n\
* Price: **$250**`. Do not invent flight information.",
};

pub const HOTEL_RECOMMENDER: SpecialistSpec = SpecialistSpec {
    name: "hotel_recommender",
    description: "Looks up hotels in a particular location",
    instruction: "You are a specialized hotel recommendation assistant. Find and \
present hotel options for the requested location, dates, and preferences. Compile the \
details with clear labels, for example: `**Hotel Name:** Grand Hotel\n* Rating: \
_5 stars_\n* Amenities:\n* Pool\n* Gym`. Do not invent hotel information.",
};

pub const ITINERARY_RECOMMENDER: SpecialistSpec = SpecialistSpec {
    name: "itinerary_recommender",
    description: "Creates a travel itinerary from location, duration, and interests",
    instruction: "You are a specialized travel itinerary creation service. Your sole \
output is the itinerary itself as markdown-formatted text, structured day by day, for \
example: `**Day 1:**\n* _Morning:_ Visit the **Eiffel Tower**\n* _Afternoon:_ \
Explore the *Louvre Museum*`. Do not ask whether an itinerary is wanted; produce it.",
};

pub const FOOD_RECOMMENDER: SpecialistSpec = SpecialistSpec {
    name: "food_recommender",
    description: "Recommends restaurants and cafes near itinerary stops",
    instruction: "You are a specialized food recommendation assistant for travelers. \
Suggest dining options matching the cuisine preferences and the itinerary locations, \
for example: `**Restaurant Name:** Le Petit Bistro\n* Cuisine: French\n* Notes: \
_Great for lunch near the Louvre._`. Focus solely on food recommendations.",
};

/// A specialist bound to a concrete LLM client.
#[derive(Clone)]
pub struct SpecialistAgent {
    spec: SpecialistSpec,
    llm: Arc<dyn LlmClient>,
}

impl SpecialistAgent {
    pub fn new(spec: SpecialistSpec, llm: Arc<dyn LlmClient>) -> Self {
        Self { spec, llm }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Run the specialist against a prompt, returning its markdown reply.
    pub async fn run(&self, prompt: &str) -> Result<String> {
        info!(specialist = self.spec.name, "delegating sub-task");
        let instruction = format!("{}\n{MARKDOWN_RULES}", self.spec.instruction);
        self.llm.complete(&instruction, prompt).await
    }
}

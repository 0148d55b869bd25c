//! Trip finance arithmetic and the spreadsheet row model.
//!
//! The numbers are simple sums; the value here is keeping the sheet layout
//! and the narrative summary deterministic so an export can be retried and
//! compared byte for byte.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::DomainError;

/// Tab every financial plan lands in.
pub const FINANCE_TAB: &str = "Finance Planner";

/// Column layout of the finance tab, in write order.
pub const FINANCE_HEADERS: [&str; 10] = [
    "Source",
    "Destination",
    "Flights",
    "Hotels",
    "Itinerary",
    "Food",
    "Total Estimated Cost",
    "Budget",
    "Remaining/Surplus",
    "Financial Summary",
];

/// Zero-based column of the free-text summary, the one cell that needs
/// wrapping applied.
pub const SUMMARY_COLUMN: usize = FINANCE_HEADERS.len() - 1;

/// Estimated costs per category plus the overall budget, in the trip
/// currency. Categories a traveler gave no estimate for are zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripCosts {
    pub flights: f64,
    pub hotels: f64,
    pub itinerary: f64,
    pub food: f64,
    pub budget: f64,
}

impl TripCosts {
    pub fn new(
        flights: f64,
        hotels: f64,
        itinerary: f64,
        food: f64,
        budget: f64,
    ) -> Result<Self, DomainError> {
        let costs = Self { flights, hotels, itinerary, food, budget };
        if [flights, hotels, itinerary, food, budget].iter().any(|value| !value.is_finite()) {
            return Err(DomainError::InvariantViolation(
                "cost and budget values must be finite".to_owned(),
            ));
        }
        Ok(costs)
    }

    pub fn total_estimated(&self) -> f64 {
        self.flights + self.hotels + self.itinerary + self.food
    }

    pub fn remaining(&self) -> f64 {
        self.budget - self.total_estimated()
    }
}

/// A complete financial plan for one trip, ready to summarize and export.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancePlan {
    pub source: String,
    pub destination: String,
    pub costs: TripCosts,
}

impl FinancePlan {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        costs: TripCosts,
    ) -> Self {
        Self { source: source.into(), destination: destination.into(), costs }
    }

    /// Render the narrative spending summary, with the verdict emphasized in
    /// the same markdown dialect the document compiler understands.
    pub fn summary_text(&self) -> String {
        let costs = &self.costs;
        let total = costs.total_estimated();
        let mut summary = format!(
            "For your trip from {} to {}, you are planning to spend ${} on flights, \
             ${} on hotels, ${} on itinerary activities, and ${} on food. \
             Your total estimated cost is ${}.",
            self.source,
            self.destination,
            money(costs.flights),
            money(costs.hotels),
            money(costs.itinerary),
            money(costs.food),
            money(total),
        );

        let difference = costs.remaining();
        if costs.budget > 0.0 && total > 0.0 {
            if difference >= 0.0 {
                let saving_pct = difference / costs.budget * 100.0;
                summary.push_str(&format!(
                    " With a budget of ${}, you are **under budget by ${}, which is a {:.1}% saving**.",
                    money(costs.budget),
                    money(difference),
                    saving_pct,
                ));
            } else {
                let over_pct = difference.abs() / costs.budget * 100.0;
                summary.push_str(&format!(
                    " With a budget of ${}, you are **over budget by ${}, which is {:.1}% over your budget**.",
                    money(costs.budget),
                    money(difference.abs()),
                    over_pct,
                ));
            }
        } else if total > 0.0 {
            summary.push_str(&format!(
                " Your budget is ${}, and your total estimated cost for this trip is ${}.",
                money(costs.budget),
                money(total),
            ));
        } else if costs.budget <= 0.0 {
            summary.push_str(" No costs or budget specified for analysis.");
        }

        summary
    }

    /// One spreadsheet row in [`FINANCE_HEADERS`] order.
    pub fn sheet_row(&self, summary: &str) -> Vec<Value> {
        let costs = &self.costs;
        vec![
            json!(self.source),
            json!(self.destination),
            json!(costs.flights),
            json!(costs.hotels),
            json!(costs.itinerary),
            json!(costs.food),
            json!(costs.total_estimated()),
            json!(costs.budget),
            json!(costs.remaining()),
            json!(summary),
        ]
    }

    /// Header row plus the data row, for the overwrite path.
    pub fn sheet_rows_with_headers(&self, summary: &str) -> Vec<Vec<Value>> {
        vec![FINANCE_HEADERS.iter().map(|header| json!(header)).collect(), self.sheet_row(summary)]
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

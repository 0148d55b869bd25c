//! Agent runtime - specialist delegation and trip-plan orchestration
//!
//! This crate is the delegating layer of the waypoint system:
//! - Invokes specialist language-model agents (flights, hotels, itinerary,
//!   food) as opaque text producers
//! - Collects their markdown-flavored replies into named document sections
//! - Drives exports through a generic tool registry
//!
//! # Architecture
//!
//! The planner follows a fixed loop:
//! 1. **Specialist delegation** (`specialists`) - One instruction-carrying
//!    agent per sub-task, all speaking the same constrained markdown dialect
//! 2. **Outline collection** (`planner`) - Gather section texts for the
//!    document export
//! 3. **Tool execution** (`tools`) - Invoke export/delete adapters by name
//!
//! # Key Types
//!
//! - `TripPlanner` - Main orchestrator (see `planner` module)
//! - `LlmClient` - Pluggable trait for whatever model backs the specialists
//! - `Tool` / `ToolRegistry` - Export adapters registered by name
//!
//! # Boundary Principle
//!
//! The LLM is strictly a text producer. Everything it emits is treated as
//! markdown-flavored prose; index arithmetic, styling, and spreadsheet math
//! are deterministic and live in `waypoint-core`.

pub mod llm;
pub mod planner;
pub mod specialists;
pub mod tools;

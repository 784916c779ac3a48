//! `whoop-digest`: fetches WHOOP cycles, recoveries, sleeps and workouts for
//! UTC calendar days and reduces them to daily, weekly and 30-day summaries.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): each directory
//! module is a gateway that re-exports only what its siblings need.
//! - `calendar` – UTC day and ISO-week arithmetic, output keys
//! - `whoop` – transport, retrying client, pagination, day assembly
//! - `stats` – daily summary, weekly stats, HRV trend, persona
//! - `routes` – axum HTTP surface
//! - `config` – environment configuration

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod stats;
pub mod whoop;

#[cfg(test)]
mod test_support;

pub use config::Config;

// Re-exported at the root so routes/*.rs only depend on their parent, not
// on where each type happens to live.
pub use error::FetchError;
pub use models::DayData;
pub use whoop::WhoopClient;

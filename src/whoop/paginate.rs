//! Cursor pagination over the WHOOP collection endpoints.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::WhoopClient;
use crate::error::{FetchError, Result};
use crate::models::{Cycle, Page, Recovery, Sleep, Workout};

// ---

/// The four paginated collections the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    // ---
    Cycle,
    Recovery,
    Sleep,
    Workout,
}

impl Resource {
    // ---
    pub fn path(self) -> &'static str {
        match self {
            Resource::Cycle => "/cycle",
            Resource::Recovery => "/recovery",
            Resource::Sleep => "/activity/sleep",
            Resource::Workout => "/activity/workout",
        }
    }
}

/// `2026-02-22T00:00:00.000Z`
fn instant_param(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl WhoopClient {
    // ---
    /// Every record of `resource` whose range intersects `[start, end)`.
    ///
    /// Pages are requested one after another, each carrying the cursor of the
    /// previous one, until a page comes back without a cursor. A 404 stops
    /// the walk and returns what was gathered so far.
    pub async fn fetch_all<T>(
        &self,
        resource: Resource,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        // ---
        let path = resource.path();
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0u32;

        loop {
            page_count += 1;

            let mut query = vec![("start", instant_param(start)), ("end", instant_param(end))];
            if let Some(ref token) = cursor {
                query.push(("nextToken", token.clone()));
            }

            let Some(body) = self.get(path, &query).await? else {
                debug!(
                    "{} page {} not found, stopping with {} records",
                    path,
                    page_count,
                    records.len()
                );
                return Ok(records);
            };

            let page: Page<T> = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                path: path.to_string(),
                source,
            })?;

            debug!(
                "{} page {} returned {} records",
                path,
                page_count,
                page.records.len()
            );

            cursor = page.cursor().map(String::from);
            records.extend(page.records);

            if cursor.is_none() {
                break;
            }
        }

        debug!(
            "Fetched {} records from {} in {} pages",
            records.len(),
            path,
            page_count
        );
        Ok(records)
    }

    pub async fn cycles(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Cycle>> {
        self.fetch_all(Resource::Cycle, start, end).await
    }

    pub async fn recoveries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Recovery>> {
        self.fetch_all(Resource::Recovery, start, end).await
    }

    pub async fn sleeps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Sleep>> {
        self.fetch_all(Resource::Sleep, start, end).await
    }

    pub async fn workouts(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Workout>> {
        self.fetch_all(Resource::Workout, start, end).await
    }
}

//! Retrieval of WHOOP records: transport, retrying client, pagination, and
//! per-day assembly.

mod client;
mod day;
mod paginate;
mod transport;

pub use client::{RetryPolicy, WhoopClient};
pub use day::{
    get_day_data, get_persona_days, get_recent_days, get_week_days, MAX_RECENT_DAYS, PERSONA_DAYS,
};
pub use paginate::Resource;
pub use transport::{AccessToken, RawResponse, ReqwestTransport, Transport};

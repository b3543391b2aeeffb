//! Event data acquisition: typed requests against the conjunction and
//! space-weather providers, cache-first fetching with per-endpoint TTLs and
//! the periodic monitor that turns upstream data into registry threats.

mod cache;
mod client;
mod conjunction;
mod elements;
mod monitor;
mod source;
mod space_weather;

#[cfg(test)]
mod tests;

pub use cache::FeedCache;
pub use client::{FeedClient, FeedRequest};
pub use conjunction::{CdmRecord, ConjunctionDataRequest, into_events};
pub use elements::{ElementSetRequest, GpRecord};
pub use monitor::ThreatMonitor;
pub use source::{EventSource, RealSource, SimulatedSource, select_source};
pub use space_weather::{
    CANONICAL_RADIO_FREQUENCY_MHZ, FlareLevel, FlareProbabilities, FlareProbabilityEntry,
    FlareProbabilityRequest, KpIndexEntry, KpIndexRequest, RadioFluxDetail, SolarRadioEntry,
    SolarRadioFluxRequest, SpaceWeatherSnapshot, kp_history,
};

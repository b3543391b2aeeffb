use super::client::FeedRequest;
use crate::threat::ConjunctionEvent;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// Conjunction events farther out than this are ignored.
const MAX_LEAD_TIME_S: f64 = 86_400.0;
/// Events at or below this collision probability are ignored.
const MIN_PROBABILITY: f64 = 0.01;

/// One conjunction data message as delivered by the upstream provider.
/// Numeric fields arrive as decimal strings and are parsed leniently.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CdmRecord {
    /// Time of closest approach.
    #[serde(rename = "TCA")]
    pub tca: String,
    /// Miss distance in km.
    #[serde(rename = "MISS_DISTANCE")]
    pub miss_distance: String,
    #[serde(rename = "PROBABILITY", default)]
    pub probability: Option<String>,
    #[serde(rename = "SAT_2_NAME", default)]
    pub sat_2_name: Option<String>,
    #[serde(rename = "OBJECT_NAME", default)]
    pub object_name: Option<String>,
    #[serde(rename = "OBJECT_ID", default)]
    pub object_id: Option<String>,
    #[serde(rename = "CREATION_DATE", default)]
    pub creation_date: Option<String>,
}

impl CdmRecord {
    /// Seconds from `now` until the closest approach, or `None` when the
    /// TCA does not parse.
    fn time_to_event(&self, now: DateTime<Utc>) -> Option<f64> {
        let tca = parse_provider_time(&self.tca)?;
        Some(((tca - now).num_milliseconds() as f64 / 1000.0).max(0.0))
    }

    fn other_object(&self) -> Option<String> {
        self.sat_2_name
            .clone()
            .or_else(|| self.object_name.clone())
            .or_else(|| self.object_id.clone())
    }
}

/// Normalizes upstream records into the classifier's input contract.
///
/// Only events with a closest approach within 24 hours and a probability
/// above 1% pass; records with an unparseable timestamp are dropped. Miss
/// distances are converted from km to meters.
pub fn into_events(
    records: &[CdmRecord],
    object_id: u64,
    now: DateTime<Utc>,
) -> Vec<ConjunctionEvent> {
    records
        .iter()
        .filter_map(|record| {
            let time_to_event = record.time_to_event(now)?;
            let miss_distance_m = record.miss_distance.trim().parse::<f64>().ok()? * 1000.0;
            let probability = record
                .probability
                .as_deref()
                .and_then(|p| p.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            if time_to_event >= MAX_LEAD_TIME_S || probability <= MIN_PROBABILITY {
                return None;
            }
            Some(ConjunctionEvent {
                object_id,
                other_object: record.other_object(),
                time_to_event,
                miss_distance_m,
                probability,
                simulated: false,
            })
        })
        .collect()
}

/// Parses the provider's timestamp layouts: RFC 3339 or a bare
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, always interpreted as UTC.
pub(super) fn parse_provider_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Fetch of conjunction data messages for one catalogued object over a
/// forward-looking window.
#[derive(Debug)]
pub struct ConjunctionDataRequest {
    pub catalog_id: String,
    /// Days to look ahead.
    pub days: i64,
    pub ttl: TimeDelta,
}

impl FeedRequest for ConjunctionDataRequest {
    type Response = Vec<CdmRecord>;

    fn endpoint(&self) -> String {
        format!(
            "/basicspacedata/query/class/cdm_public/SAT_1_ID/{}/TCA/%3Enow/orderby/TCA%20asc/format/json",
            self.catalog_id
        )
    }

    fn cache_key(&self) -> String { format!("cdm_{}_{}", self.catalog_id, self.days) }

    fn cache_ttl(&self) -> TimeDelta { self.ttl }
}

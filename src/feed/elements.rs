use super::client::FeedRequest;
use crate::error::ParseError;
use crate::tracking::{ParsedObject, TleRecord, parse_record};
use chrono::TimeDelta;

/// One general-perturbations record as delivered by the tracking provider,
/// carrying the current two-line element set for a catalogued object.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GpRecord {
    #[serde(rename = "OBJECT_NAME", default)]
    pub object_name: Option<String>,
    #[serde(rename = "TLE_LINE1")]
    pub tle_line1: String,
    #[serde(rename = "TLE_LINE2")]
    pub tle_line2: String,
}

impl GpRecord {
    /// Parses the embedded two-line record into an ingestible object.
    pub fn into_parsed(self) -> Result<ParsedObject, ParseError> {
        parse_record(&TleRecord {
            name: self.object_name,
            line1: self.tle_line1,
            line2: self.tle_line2,
        })
    }
}

/// Fetch of the current element set for one catalogued object. Cached far
/// longer than event data; elements drift on the scale of hours.
#[derive(Debug)]
pub struct ElementSetRequest {
    pub catalog_id: String,
    pub ttl: TimeDelta,
}

impl FeedRequest for ElementSetRequest {
    type Response = Vec<GpRecord>;

    fn endpoint(&self) -> String {
        format!(
            "/basicspacedata/query/class/gp/NORAD_CAT_ID/{}/orderby/EPOCH%20desc/limit/1/format/json",
            self.catalog_id
        )
    }

    fn cache_key(&self) -> String { format!("tle_{}", self.catalog_id) }

    fn cache_ttl(&self) -> TimeDelta { self.ttl }
}

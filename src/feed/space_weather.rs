use super::client::FeedRequest;
use super::conjunction::parse_provider_time;
use crate::threat::{Severity, weather_severity};
use chrono::{DateTime, TimeDelta, Utc};
use strum_macros::Display;

/// The radio-flux observation frequency used as the canonical solar
/// activity proxy channel, in MHz.
pub const CANONICAL_RADIO_FREQUENCY_MHZ: f64 = 2695.0;

/// Radio flux assumed when the canonical channel is missing, in sfu.
const DEFAULT_RADIO_FLUX: f64 = 120.0;
/// Kp index assumed when the series is empty.
const DEFAULT_KP_INDEX: f64 = 2.0;

/// One sample of the planetary Kp index series; the latest entry is current.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct KpIndexEntry {
    pub time_tag: String,
    pub k_index: f64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RadioFluxDetail {
    pub frequency: f64,
    pub flux: f64,
    #[serde(default)]
    pub observed_quality: Option<String>,
}

/// One observatory report of solar radio flux across frequencies.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SolarRadioEntry {
    pub time_tag: String,
    #[serde(default)]
    pub common_name: Option<String>,
    pub details: Vec<RadioFluxDetail>,
}

/// Daily flare probability forecast per X-ray class, in percent.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FlareProbabilityEntry {
    pub date: String,
    pub c_class_1_day: f64,
    pub m_class_1_day: f64,
    pub x_class_1_day: f64,
    #[serde(default)]
    pub polar_cap_absorption: Option<String>,
}

/// Solar flare activity level, derived from the Kp index.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum FlareLevel {
    Quiet,
    Active,
    Storm,
}

/// 24-hour flare probabilities per X-ray class, in percent.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlareProbabilities {
    pub c_class: f64,
    pub m_class: f64,
    pub x_class: f64,
}

/// A consistent view of current space-weather conditions.
///
/// Replaced wholesale on each refresh, never partially mutated. Fields not
/// observed directly (wind speed, particle flux) are estimated from the Kp
/// index with empirical formulas.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SpaceWeatherSnapshot {
    kp_index: f64,
    flare_level: FlareLevel,
    /// km/s
    solar_wind_speed: f64,
    proton_flux: f64,
    electron_flux: f64,
    /// sfu at the canonical proxy frequency
    solar_radio_flux: f64,
    flare_probabilities: FlareProbabilities,
    observed_at: DateTime<Utc>,
}

impl SpaceWeatherSnapshot {
    /// Builds a snapshot from the three upstream series.
    ///
    /// The latest Kp entry is taken as current; the radio flux is read from
    /// the canonical 2695 MHz channel; the newest forecast supplies the
    /// flare probabilities. Missing pieces fall back to quiet-sun defaults.
    pub fn derive(
        kp_series: &[KpIndexEntry],
        radio_series: &[SolarRadioEntry],
        probability_series: &[FlareProbabilityEntry],
    ) -> Self {
        let latest_kp = kp_series.last();
        let kp_index = latest_kp.map_or(DEFAULT_KP_INDEX, |entry| entry.k_index).clamp(0.0, 9.0);
        let observed_at = latest_kp
            .and_then(|entry| parse_provider_time(&entry.time_tag))
            .unwrap_or_else(Utc::now);
        let solar_radio_flux = radio_series
            .first()
            .and_then(|entry| {
                entry
                    .details
                    .iter()
                    .find(|detail| detail.frequency == CANONICAL_RADIO_FREQUENCY_MHZ)
            })
            .map_or(DEFAULT_RADIO_FLUX, |detail| detail.flux);
        let flare_probabilities = probability_series.first().map_or(
            FlareProbabilities { c_class: 50.0, m_class: 10.0, x_class: 1.0 },
            |entry| FlareProbabilities {
                c_class: entry.c_class_1_day,
                m_class: entry.m_class_1_day,
                x_class: entry.x_class_1_day,
            },
        );
        Self::from_kp(kp_index, solar_radio_flux, flare_probabilities, observed_at)
    }

    /// Derives the Kp-based estimates shared by real and simulated
    /// snapshots.
    pub(crate) fn from_kp(
        kp_index: f64,
        solar_radio_flux: f64,
        flare_probabilities: FlareProbabilities,
        observed_at: DateTime<Utc>,
    ) -> Self {
        let flare_level = if kp_index >= 6.0 {
            FlareLevel::Storm
        } else if kp_index >= 4.0 {
            FlareLevel::Active
        } else {
            FlareLevel::Quiet
        };
        Self {
            kp_index,
            flare_level,
            // Empirical mapping: quiet sun ~400 km/s, severe storms ~800 km/s.
            solar_wind_speed: 350.0 + kp_index * 50.0,
            proton_flux: 10.0 * 1.5_f64.powf(kp_index - 2.0),
            electron_flux: 1000.0 * 1.3_f64.powf(kp_index - 2.0),
            solar_radio_flux,
            flare_probabilities,
            observed_at,
        }
    }

    pub fn kp_index(&self) -> f64 { self.kp_index }
    pub fn flare_level(&self) -> FlareLevel { self.flare_level }
    pub fn solar_wind_speed(&self) -> f64 { self.solar_wind_speed }
    pub fn proton_flux(&self) -> f64 { self.proton_flux }
    pub fn electron_flux(&self) -> f64 { self.electron_flux }
    pub fn solar_radio_flux(&self) -> f64 { self.solar_radio_flux }
    pub fn flare_probabilities(&self) -> FlareProbabilities { self.flare_probabilities }
    pub fn observed_at(&self) -> DateTime<Utc> { self.observed_at }

    /// Whether current conditions endanger orbiting hardware: Kp at 6 or
    /// above, or a storm-level flare.
    pub fn is_dangerous(&self) -> bool {
        self.kp_index >= 6.0 || self.flare_level == FlareLevel::Storm
    }

    /// Severity of the current conditions on the threat scale.
    pub fn threat_level(&self) -> Severity { weather_severity(self.kp_index) }
}

/// Extracts the trailing `hours` of a Kp series for charting, newest last.
pub fn kp_history(
    series: &[KpIndexEntry],
    hours: i64,
    now: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, f64)> {
    let cutoff = now - TimeDelta::hours(hours);
    series
        .iter()
        .filter_map(|entry| {
            let time = parse_provider_time(&entry.time_tag)?;
            (time >= cutoff).then_some((time, entry.k_index))
        })
        .collect()
}

/// Fetch of the 1-minute planetary Kp index series.
#[derive(Debug)]
pub struct KpIndexRequest {
    pub ttl: TimeDelta,
}

impl FeedRequest for KpIndexRequest {
    type Response = Vec<KpIndexEntry>;

    fn endpoint(&self) -> String { String::from("/json/boulder_k_index_1m.json") }

    fn cache_ttl(&self) -> TimeDelta { self.ttl }
}

/// Fetch of the solar radio flux observations.
#[derive(Debug)]
pub struct SolarRadioFluxRequest {
    pub ttl: TimeDelta,
}

impl FeedRequest for SolarRadioFluxRequest {
    type Response = Vec<SolarRadioEntry>;

    fn endpoint(&self) -> String { String::from("/json/solar-radio-flux.json") }

    fn cache_ttl(&self) -> TimeDelta { self.ttl }
}

/// Fetch of the daily flare probability forecast.
#[derive(Debug)]
pub struct FlareProbabilityRequest {
    pub ttl: TimeDelta,
}

impl FeedRequest for FlareProbabilityRequest {
    type Response = Vec<FlareProbabilityEntry>;

    fn endpoint(&self) -> String { String::from("/json/solar_probabilities.json") }

    fn cache_ttl(&self) -> TimeDelta { self.ttl }
}

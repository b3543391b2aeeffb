use chrono::TimeDelta;
use std::env;
use std::time::Duration;
use strum_macros::Display;

/// Governs whether synthetic threats may be generated when no authoritative
/// event data is available.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ThreatMode {
    /// Only authoritative data, no synthetic threats.
    Strict,
    /// Rare synthetic threats, keeps the triage pipeline exercised.
    Demo,
    /// Frequent synthetic threats for development and testing.
    Development,
}

impl ThreatMode {
    /// Per-check acceptance probability of the synthetic generator.
    pub fn synthetic_acceptance(self) -> f64 {
        match self {
            ThreatMode::Strict => 0.0,
            ThreatMode::Demo => 0.005,
            ThreatMode::Development => 0.08,
        }
    }
}

/// Runtime options recognized by the engine.
///
/// The defaults carry the operational constants the system was tuned with;
/// consumers override individual fields as needed.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, all event data is generated locally and no feed is contacted.
    pub simulation_mode: bool,
    pub threat_mode: ThreatMode,
    /// Interval between space-weather refreshes.
    pub weather_poll_interval: TimeDelta,
    /// Interval between conjunction checks.
    pub threat_poll_interval: TimeDelta,
    pub conjunction_cache_ttl: TimeDelta,
    pub elements_cache_ttl: TimeDelta,
    pub weather_cache_ttl: TimeDelta,
    /// Hard cap on simultaneously active threats; at the cap new low and
    /// medium severity threats are dropped.
    pub threat_cap: usize,
    pub request_timeout: Duration,
    /// Base URL of the conjunction data provider.
    pub conjunction_base_url: String,
    /// Base URL of the space-weather data provider.
    pub weather_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation_mode: false,
            threat_mode: ThreatMode::Demo,
            weather_poll_interval: TimeDelta::seconds(20),
            threat_poll_interval: TimeDelta::seconds(30),
            conjunction_cache_ttl: TimeDelta::minutes(5),
            elements_cache_ttl: TimeDelta::hours(1),
            weather_cache_ttl: TimeDelta::minutes(1),
            threat_cap: 10,
            request_timeout: Duration::from_secs(10),
            conjunction_base_url: String::from("https://www.space-track.org"),
            weather_base_url: String::from("https://services.swpc.noaa.gov"),
        }
    }
}

impl Config {
    /// Builds a config from defaults, with provider URLs and simulation mode
    /// overridable through the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("ORBITGUARD_CONJUNCTION_URL") {
            config.conjunction_base_url = url;
        }
        if let Ok(url) = env::var("ORBITGUARD_WEATHER_URL") {
            config.weather_base_url = url;
        }
        if env::var("ORBITGUARD_SIMULATION").is_ok() {
            config.simulation_mode = true;
        }
        config
    }
}

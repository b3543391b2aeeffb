use super::cache::FeedCache;
use super::client::FeedClient;
use super::conjunction::{ConjunctionDataRequest, into_events};
use super::elements::ElementSetRequest;
use super::space_weather::{
    FlareProbabilities, FlareProbabilityRequest, KpIndexRequest, SolarRadioFluxRequest,
    SpaceWeatherSnapshot,
};
use crate::config::Config;
use crate::error::FeedError;
use crate::threat::{ConjunctionEvent, SyntheticGenerator};
use crate::tracking::ParsedObject;
use crate::{feed_log, warn};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Days the conjunction provider is asked to look ahead. Events are later
/// narrowed to the 24-hour actionable window by the adapter.
const CDM_LOOKAHEAD_DAYS: i64 = 7;

/// Where event data comes from. Selected once from configuration instead of
/// branching on mode flags inside the detection logic.
#[async_trait]
pub trait EventSource: Send {
    /// Close-approach events currently known for one object. Never fails:
    /// an unavailable feed degrades to synthetic generation or to silence,
    /// depending on the configured threat mode.
    async fn conjunction_events(
        &mut self,
        object_id: u64,
        catalog_id: Option<&str>,
    ) -> Vec<ConjunctionEvent>;

    /// Current space-weather conditions, or `None` when unavailable.
    async fn weather_snapshot(&mut self) -> Option<SpaceWeatherSnapshot>;

    /// The freshest element set known for a catalogued object, or `None`
    /// when the tracking feed has nothing newer to offer.
    async fn element_set(&mut self, catalog_id: &str) -> Option<ParsedObject>;
}

/// Authoritative upstream data with cache-first fetching, degrading to the
/// synthetic generator per the configured threat mode.
pub struct RealSource {
    conjunctions: FeedClient,
    weather: FeedClient,
    cache: FeedCache,
    fallback: SyntheticGenerator<StdRng>,
    conjunction_ttl: chrono::TimeDelta,
    elements_ttl: chrono::TimeDelta,
    weather_ttl: chrono::TimeDelta,
}

impl RealSource {
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        Ok(Self {
            conjunctions: FeedClient::new(&config.conjunction_base_url, config.request_timeout)?,
            weather: FeedClient::new(&config.weather_base_url, config.request_timeout)?,
            cache: FeedCache::new(),
            fallback: SyntheticGenerator::new(config.threat_mode.synthetic_acceptance()),
            conjunction_ttl: config.conjunction_cache_ttl,
            elements_ttl: config.elements_cache_ttl,
            weather_ttl: config.weather_cache_ttl,
        })
    }

    fn degraded(&mut self, object_id: u64) -> Vec<ConjunctionEvent> {
        self.fallback.check(object_id).into_iter().collect()
    }
}

#[async_trait]
impl EventSource for RealSource {
    async fn conjunction_events(
        &mut self,
        object_id: u64,
        catalog_id: Option<&str>,
    ) -> Vec<ConjunctionEvent> {
        let Some(catalog_id) = catalog_id else {
            // Manually entered objects have no catalog identity to query by.
            return self.degraded(object_id);
        };
        let request = ConjunctionDataRequest {
            catalog_id: String::from(catalog_id),
            days: CDM_LOOKAHEAD_DAYS,
            ttl: self.conjunction_ttl,
        };
        match self.conjunctions.fetch(&request, &mut self.cache).await {
            Ok(records) => {
                feed_log!("{} conjunction record(s) for catalog id {catalog_id}", records.len());
                into_events(&records, object_id, Utc::now())
            }
            Err(e) => {
                warn!("conjunction feed unavailable ({e}), degrading to synthetic generation");
                self.degraded(object_id)
            }
        }
    }

    async fn weather_snapshot(&mut self) -> Option<SpaceWeatherSnapshot> {
        let kp_request = KpIndexRequest { ttl: self.weather_ttl };
        let kp_series = match self.weather.fetch(&kp_request, &mut self.cache).await {
            Ok(series) => series,
            Err(e) => {
                warn!("space-weather feed unavailable ({e}), skipping refresh");
                return None;
            }
        };
        // The auxiliary series only refine the snapshot; their absence is
        // covered by quiet-sun defaults.
        let radio_request = SolarRadioFluxRequest { ttl: self.weather_ttl };
        let radio_series =
            self.weather.fetch(&radio_request, &mut self.cache).await.unwrap_or_default();
        let probability_request = FlareProbabilityRequest { ttl: self.weather_ttl };
        let probability_series =
            self.weather.fetch(&probability_request, &mut self.cache).await.unwrap_or_default();
        Some(SpaceWeatherSnapshot::derive(&kp_series, &radio_series, &probability_series))
    }

    async fn element_set(&mut self, catalog_id: &str) -> Option<ParsedObject> {
        let request = ElementSetRequest {
            catalog_id: String::from(catalog_id),
            ttl: self.elements_ttl,
        };
        match self.conjunctions.fetch(&request, &mut self.cache).await {
            Ok(records) => records.into_iter().find_map(|record| record.into_parsed().ok()),
            Err(e) => {
                warn!("element feed unavailable ({e}), keeping current elements");
                None
            }
        }
    }
}

/// Fully local source for simulation mode: synthetic conjunctions and a
/// random-walk Kp index, no network at all.
pub struct SimulatedSource {
    generator: SyntheticGenerator<StdRng>,
    rng: StdRng,
    kp_index: f64,
}

impl SimulatedSource {
    pub fn new(acceptance: f64) -> Self {
        Self {
            generator: SyntheticGenerator::new(acceptance),
            rng: StdRng::from_os_rng(),
            kp_index: 2.0,
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(acceptance: f64, seed: u64) -> Self {
        Self {
            generator: SyntheticGenerator::seeded(acceptance, seed),
            rng: StdRng::seed_from_u64(seed),
            kp_index: 2.0,
        }
    }
}

#[async_trait]
impl EventSource for SimulatedSource {
    async fn conjunction_events(
        &mut self,
        object_id: u64,
        _catalog_id: Option<&str>,
    ) -> Vec<ConjunctionEvent> {
        self.generator.check(object_id).into_iter().collect()
    }

    async fn weather_snapshot(&mut self) -> Option<SpaceWeatherSnapshot> {
        self.kp_index = (self.kp_index + self.rng.random_range(-1.0..1.0)).clamp(0.0, 9.0);
        Some(SpaceWeatherSnapshot::from_kp(
            self.kp_index,
            120.0,
            FlareProbabilities { c_class: 50.0, m_class: 10.0, x_class: 1.0 },
            Utc::now(),
        ))
    }

    async fn element_set(&mut self, _catalog_id: &str) -> Option<ParsedObject> {
        // Simulation mode has no tracking feed; elements stay as entered.
        None
    }
}

/// Selects the event source mandated by the configuration.
pub fn select_source(config: &Config) -> Result<Box<dyn EventSource>, FeedError> {
    if config.simulation_mode {
        Ok(Box::new(SimulatedSource::new(config.threat_mode.synthetic_acceptance())))
    } else {
        Ok(Box::new(RealSource::new(config)?))
    }
}

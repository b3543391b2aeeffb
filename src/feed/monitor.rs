use super::source::EventSource;
use super::space_weather::SpaceWeatherSnapshot;
use crate::config::Config;
use crate::registry::{IdGenerator, Registry, ThreatDecision};
use crate::threat::{classify_conjunction, classify_weather};
use crate::{feed_log, info};
use chrono::{TimeDelta, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Sleep granularity of the polling loop.
const POLL_RESOLUTION_MS: u64 = 500;

/// Periodic detection driver.
///
/// Polls the configured event source on two independent cadences (space
/// weather and conjunctions), classifies what comes back and offers the
/// results to the registry. One monitor per registry; ticks never overlap,
/// a tick that is still running when the next one falls due makes the loop
/// skip that round instead of queueing it.
pub struct ThreatMonitor {
    registry: Arc<RwLock<Registry>>,
    source: Mutex<Box<dyn EventSource>>,
    weather: RwLock<Option<SpaceWeatherSnapshot>>,
    action_ids: Mutex<IdGenerator>,
    fetch_in_progress: AtomicBool,
    weather_in_progress: AtomicBool,
    weather_poll_interval: TimeDelta,
    threat_poll_interval: TimeDelta,
}

impl ThreatMonitor {
    pub fn new(registry: Arc<RwLock<Registry>>, source: Box<dyn EventSource>, config: &Config) -> Self {
        Self {
            registry,
            source: Mutex::new(source),
            weather: RwLock::new(None),
            action_ids: Mutex::new(IdGenerator::new()),
            fetch_in_progress: AtomicBool::new(false),
            weather_in_progress: AtomicBool::new(false),
            weather_poll_interval: config.weather_poll_interval,
            threat_poll_interval: config.threat_poll_interval,
        }
    }

    /// Runs the polling loop until the surrounding task is dropped.
    pub async fn run(self: Arc<Self>) {
        info!(
            "threat monitor started (weather every {}s, conjunctions every {}s)",
            self.weather_poll_interval.num_seconds(),
            self.threat_poll_interval.num_seconds()
        );
        let mut weather_due = Utc::now();
        let mut threats_due = Utc::now();
        loop {
            let now = Utc::now();
            if now >= weather_due {
                weather_due = now + self.weather_poll_interval;
                self.refresh_weather().await;
            }
            if now >= threats_due {
                threats_due = now + self.threat_poll_interval;
                self.check_threats().await;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(POLL_RESOLUTION_MS)).await;
        }
    }

    /// One full detection round, weather first so fresh conditions feed the
    /// same tick's classification. Exposed for driving the monitor manually.
    pub async fn tick(&self) {
        self.refresh_weather().await;
        self.check_threats().await;
    }

    /// Pulls a fresh space-weather snapshot and raises a weather threat when
    /// conditions are dangerous. Guarded like [`Self::check_threats`]: a
    /// refresh still in flight makes a concurrent call return immediately.
    pub async fn refresh_weather(&self) {
        if self
            .weather_in_progress
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            feed_log!("previous weather refresh still running, skipping this one");
            return;
        }
        if let Some(snapshot) = self.source.lock().await.weather_snapshot().await {
            feed_log!(
                "space weather refreshed: Kp={:.1}, flare level {}",
                snapshot.kp_index(),
                snapshot.flare_level()
            );
            if snapshot.is_dangerous() {
                self.raise_weather_threat(&snapshot).await;
            }
            *self.weather.write().await = Some(snapshot);
        }
        self.weather_in_progress.store(false, Ordering::Release);
    }

    /// Queries conjunction events for every tracked object and offers the
    /// classified threats to the registry. Skipped entirely when the
    /// previous round has not finished.
    pub async fn check_threats(&self) {
        if self
            .fetch_in_progress
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            feed_log!("previous detection round still running, skipping this one");
            return;
        }
        let targets: Vec<(u64, Option<String>)> = {
            let registry = self.registry.read().await;
            registry
                .objects()
                .iter()
                .map(|object| (object.id(), object.catalog_id().map(String::from)))
                .collect()
        };
        for (object_id, catalog_id) in targets {
            if let Some(catalog_id) = catalog_id.as_deref() {
                self.refresh_elements(object_id, catalog_id).await;
            }
            let events = self
                .source
                .lock()
                .await
                .conjunction_events(object_id, catalog_id.as_deref())
                .await;
            for event in events {
                let threat = {
                    let mut ids = self.action_ids.lock().await;
                    classify_conjunction(&event, &mut ids)
                };
                self.registry.write().await.add_threat(threat);
            }
        }
        self.fetch_in_progress.store(false, Ordering::Release);
    }

    /// The most recent space-weather snapshot, if any refresh succeeded yet.
    pub async fn current_weather(&self) -> Option<SpaceWeatherSnapshot> {
        self.weather.read().await.clone()
    }

    /// Replaces an object's elements with the freshest set the tracking feed
    /// offers. The feed's cache keeps the network quiet between element
    /// expiries; a removed object is simply skipped.
    async fn refresh_elements(&self, object_id: u64, catalog_id: &str) {
        let Some(parsed) = self.source.lock().await.element_set(catalog_id).await else {
            return;
        };
        let mut registry = self.registry.write().await;
        if registry.update_elements(object_id, parsed.elements).is_ok() {
            feed_log!("refreshed elements for object {object_id} from catalog id {catalog_id}");
        }
    }

    /// Weather conditions affect the whole constellation but a threat is
    /// always owned by one object. The threat lands on the lowest-id object
    /// that has no active weather threat yet; the per-object weather dedup
    /// in the registry keeps repeated storms from piling up.
    async fn raise_weather_threat(&self, snapshot: &SpaceWeatherSnapshot) {
        let target = {
            let registry = self.registry.read().await;
            registry
                .objects()
                .iter()
                .map(|object| object.id())
                .find(|&id| {
                    !registry
                        .threats_for(id)
                        .iter()
                        .any(|threat| threat.kind().is_weather())
                })
        };
        let Some(object_id) = target else {
            return;
        };
        let threat = {
            let mut ids = self.action_ids.lock().await;
            classify_weather(snapshot, object_id, &mut ids)
        };
        if let Some(threat) = threat {
            let decision = self.registry.write().await.add_threat(threat);
            if let ThreatDecision::Accepted(id) = decision {
                feed_log!("weather threat {id} raised against object {object_id}");
            }
        }
    }
}

//! Location coordinate cache with bounded-concurrency preload
//!
//! Maps shipment identifiers to pickup/delivery coordinates and route
//! polylines. Entries live in memory, seeded once from the durable store at
//! open, and are written back best-effort: a store failure degrades the
//! session to memory-only, it never reaches the caller.
//!
//! # Persistence contract
//!
//! Single-entry writes trigger a fire-and-forget flush of that namespace;
//! readers must never depend on persistence having completed. Call
//! [`LocationCache::flush`] on shutdown paths that need the store current.
//!
//! # Preload
//!
//! [`LocationCache::preload`] resolves missing addresses through the
//! geocoder with at most `max_concurrent_requests` calls outstanding at any
//! moment. At most one preload runs at a time; a second call while one is in
//! flight is dropped, not queued.

use crate::error::{WaymarkError, WaymarkResult};
use crate::geocode::{CountryInfo, Geocoder};
use crate::model::{CachedCoordinate, Coordinate, Route, Shipment};
use crate::store::KeyValueStore;
use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Default bound on concurrent outbound geocoding calls
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;

const PICKUP_KEY: &str = "pickup-coordinates";
const DELIVERY_KEY: &str = "delivery-coordinates";
const ROUTES_KEY: &str = "routes";

/// Entry counts per namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub pickups: usize,
    pub deliveries: usize,
    pub routes: usize,
}

/// Which leg of a shipment an address belongs to
#[derive(Debug, Clone, Copy)]
enum Leg {
    Pickup,
    Delivery,
}

/// Clears the preload in-flight flag on drop, so a preload future that is
/// cancelled at an await point (e.g. under `tokio::time::timeout`) cannot
/// leave the guard held forever.
struct PreloadGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for PreloadGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Durable coordinate cache for shipment records.
///
/// Cheap to clone; clones share the same state. Must be used from within a
/// Tokio runtime (single-entry writes spawn their persistence).
#[derive(Clone)]
pub struct LocationCache {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn KeyValueStore>,
    geocoder: Arc<dyn Geocoder>,
    pickups: Mutex<HashMap<String, CachedCoordinate>>,
    deliveries: Mutex<HashMap<String, CachedCoordinate>>,
    routes: Mutex<HashMap<String, Route>>,
    permits: Arc<Semaphore>,
    preload_in_flight: AtomicBool,
}

impl LocationCache {
    /// Open a cache over its collaborators, seeding memory from the store.
    ///
    /// Store read failures and malformed records are skipped: the cache
    /// starts empty (or partially seeded) and stays usable.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        geocoder: Arc<dyn Geocoder>,
        max_concurrent_requests: usize,
    ) -> Self {
        let coordinate_valid = |c: &CachedCoordinate| c.coordinate.is_valid();
        let pickups = load_namespace(store.as_ref(), PICKUP_KEY, coordinate_valid).await;
        let deliveries = load_namespace(store.as_ref(), DELIVERY_KEY, coordinate_valid).await;
        let routes = load_namespace(store.as_ref(), ROUTES_KEY, |r: &Route| {
            r.points.iter().all(Coordinate::is_valid)
        })
        .await;

        debug!(
            "Cache opened: {} pickups, {} deliveries, {} routes",
            pickups.len(),
            deliveries.len(),
            routes.len()
        );

        Self {
            inner: Arc::new(Inner {
                store,
                geocoder,
                pickups: Mutex::new(pickups),
                deliveries: Mutex::new(deliveries),
                routes: Mutex::new(routes),
                permits: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
                preload_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Cached pickup coordinate for a shipment, if any. Never touches the
    /// network.
    pub fn pickup_coordinate(&self, id: &str) -> Option<Coordinate> {
        lock(&self.inner.pickups).get(id).map(|c| c.coordinate)
    }

    /// Cached delivery coordinate for a shipment, if any
    pub fn delivery_coordinate(&self, id: &str) -> Option<Coordinate> {
        lock(&self.inner.deliveries).get(id).map(|c| c.coordinate)
    }

    /// Cached route for a shipment, if any
    pub fn route(&self, id: &str) -> Option<Route> {
        lock(&self.inner.routes).get(id).cloned()
    }

    /// Upsert a pickup coordinate; persistence is fire-and-forget
    pub fn cache_pickup_coordinate(&self, id: &str, coordinate: Coordinate) {
        lock(&self.inner.pickups).insert(id.to_string(), CachedCoordinate::now(coordinate));
        self.spawn_persist(PICKUP_KEY);
    }

    /// Upsert a delivery coordinate; persistence is fire-and-forget
    pub fn cache_delivery_coordinate(&self, id: &str, coordinate: Coordinate) {
        lock(&self.inner.deliveries).insert(id.to_string(), CachedCoordinate::now(coordinate));
        self.spawn_persist(DELIVERY_KEY);
    }

    /// Upsert a route; persistence is fire-and-forget
    pub fn cache_route(&self, id: &str, route: Route) {
        lock(&self.inner.routes).insert(id.to_string(), route);
        self.spawn_persist(ROUTES_KEY);
    }

    /// Bulk-resolve missing coordinates for a batch of shipments.
    ///
    /// Returns `false` without doing anything when another preload is
    /// already in flight (the call is dropped, not queued). Otherwise runs
    /// the whole batch to completion: partitions the shipments into legs
    /// that still need a geocode, fans the lookups out under the concurrency
    /// bound, and only after every lookup finished merges the results into
    /// the cache and persists both coordinate namespaces.
    ///
    /// A lookup that fails leaves that leg absent; it does not block the
    /// rest of the batch and is not retried within this pass.
    pub async fn preload(&self, shipments: &[Shipment]) -> bool {
        if self
            .inner
            .preload_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Preload already in flight, dropping request");
            return false;
        }
        let _guard = PreloadGuard {
            flag: &self.inner.preload_in_flight,
        };

        self.run_preload(shipments).await;
        true
    }

    /// Fire-and-forget variant of [`preload`](Self::preload): spawns the
    /// batch and returns immediately. Completion is observed through cache
    /// population.
    pub fn preload_detached(&self, shipments: Vec<Shipment>) {
        let cache = self.clone();
        tokio::spawn(async move {
            cache.preload(&shipments).await;
        });
    }

    async fn run_preload(&self, shipments: &[Shipment]) {
        let jobs = self.partition_jobs(shipments);
        if jobs.is_empty() {
            debug!("Preload: nothing to resolve");
            return;
        }
        debug!("Preload: resolving {} addresses", jobs.len());

        let mut tasks = Vec::with_capacity(jobs.len());
        for (leg, id, address) in jobs {
            let inner = self.inner.clone();
            tasks.push(tokio::spawn(async move {
                // Permit bounds outbound concurrency; released when the call
                // completes, success or failure.
                let _permit = inner.permits.clone().acquire_owned().await.ok()?;
                let coordinate = inner.geocoder.resolve(&address).await?;
                Some((leg, id, coordinate))
            }));
        }

        // Join point: results stay in scratch maps until every outstanding
        // lookup in the batch has finished.
        let mut pickup_scratch: HashMap<String, CachedCoordinate> = HashMap::new();
        let mut delivery_scratch: HashMap<String, CachedCoordinate> = HashMap::new();
        for task in join_all(tasks).await {
            let Ok(Some((leg, id, coordinate))) = task else {
                continue;
            };
            let entry = CachedCoordinate::now(coordinate);
            match leg {
                Leg::Pickup => pickup_scratch.insert(id, entry),
                Leg::Delivery => delivery_scratch.insert(id, entry),
            };
        }

        let resolved = pickup_scratch.len() + delivery_scratch.len();
        lock(&self.inner.pickups).extend(pickup_scratch);
        lock(&self.inner.deliveries).extend(delivery_scratch);
        debug!("Preload: merged {} resolved coordinates", resolved);

        self.persist_or_warn(PICKUP_KEY).await;
        self.persist_or_warn(DELIVERY_KEY).await;
    }

    fn partition_jobs(&self, shipments: &[Shipment]) -> Vec<(Leg, String, String)> {
        let mut jobs = Vec::new();
        for shipment in shipments {
            let pickup_address = shipment.pickup_address.trim();
            if !pickup_address.is_empty() && self.pickup_coordinate(&shipment.id).is_none() {
                jobs.push((Leg::Pickup, shipment.id.clone(), pickup_address.to_string()));
            }

            let delivery_address = shipment.delivery_address.trim();
            if !delivery_address.is_empty() && self.delivery_coordinate(&shipment.id).is_none() {
                jobs.push((
                    Leg::Delivery,
                    shipment.id.clone(),
                    delivery_address.to_string(),
                ));
            }
        }
        jobs
    }

    /// Drop all in-memory entries; the durable store is untouched
    pub fn clear_memory(&self) {
        lock(&self.inner.pickups).clear();
        lock(&self.inner.deliveries).clear();
        lock(&self.inner.routes).clear();
        debug!("Memory cache cleared");
    }

    /// Drop all in-memory entries and remove the durable records.
    ///
    /// Store failures are logged and swallowed: at worst stale records
    /// survive on disk until the next successful clear or persist.
    pub async fn clear_all(&self) {
        self.clear_memory();
        for key in [PICKUP_KEY, DELIVERY_KEY, ROUTES_KEY] {
            if let Err(e) = self.inner.store.remove(key).await {
                warn!("Failed to remove durable record {}: {}", key, e);
            }
        }
    }

    /// Persist all namespaces and wait for the writes to land.
    ///
    /// The one persistence path that reports failure; intended for shutdown.
    pub async fn flush(&self) -> WaymarkResult<()> {
        self.inner.persist(PICKUP_KEY).await?;
        self.inner.persist(DELIVERY_KEY).await?;
        self.inner.persist(ROUTES_KEY).await?;
        Ok(())
    }

    /// Entry counts per namespace
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pickups: lock(&self.inner.pickups).len(),
            deliveries: lock(&self.inner.deliveries).len(),
            routes: lock(&self.inner.routes).len(),
        }
    }

    /// Reverse country lookup through the geocoding collaborator
    pub async fn resolve_country(&self, coordinate: Coordinate) -> Option<CountryInfo> {
        self.inner.geocoder.resolve_country(coordinate).await
    }

    fn spawn_persist(&self, key: &'static str) {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            if let Err(e) = inner.persist(key).await {
                warn!("Persist of {} failed, continuing memory-only: {}", key, e);
            }
        });
    }

    async fn persist_or_warn(&self, key: &'static str) {
        if let Err(e) = self.inner.persist(key).await {
            warn!("Persist of {} failed, continuing memory-only: {}", key, e);
        }
    }
}

impl Inner {
    async fn persist(&self, key: &str) -> WaymarkResult<()> {
        let blob = match key {
            PICKUP_KEY => serde_json::to_vec(&*lock(&self.pickups))?,
            DELIVERY_KEY => serde_json::to_vec(&*lock(&self.deliveries))?,
            ROUTES_KEY => serde_json::to_vec(&*lock(&self.routes))?,
            other => {
                return Err(WaymarkError::Internal(format!(
                    "unknown cache namespace: {}",
                    other
                )))
            }
        };
        self.store.put(key, &blob).await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Load one namespace blob, parsing records individually so a malformed
/// record is skipped without dropping the rest of the namespace. Records the
/// `keep` predicate rejects (e.g. out-of-range coordinates) count as
/// malformed.
async fn load_namespace<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    keep: impl Fn(&T) -> bool,
) -> HashMap<String, T> {
    let blob = match store.get(key).await {
        Ok(Some(blob)) => blob,
        Ok(None) => return HashMap::new(),
        Err(e) => {
            warn!("Failed to read {}, starting memory-only: {}", key, e);
            return HashMap::new();
        }
    };

    let raw: HashMap<String, serde_json::Value> = match serde_json::from_slice(&blob) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Discarding unreadable namespace {}: {}", key, e);
            return HashMap::new();
        }
    };

    let mut entries = HashMap::with_capacity(raw.len());
    for (id, value) in raw {
        match serde_json::from_value::<T>(value) {
            Ok(entry) if keep(&entry) => {
                entries.insert(id, entry);
            }
            Ok(_) => debug!("Skipping out-of-range record {} in {}", id, key),
            Err(e) => debug!("Skipping malformed record {} in {}: {}", id, key, e),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Geocoder double that derives a coordinate from the address length and
    /// tracks peak in-flight concurrency.
    struct StubGeocoder {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        fail_addresses: HashSet<String>,
        delay: Duration,
    }

    impl StubGeocoder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                fail_addresses: HashSet::new(),
                delay: Duration::from_millis(10),
            }
        }

        fn failing_for(addresses: &[&str]) -> Self {
            let mut stub = Self::new();
            stub.fail_addresses = addresses.iter().map(|s| s.to_string()).collect();
            stub
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn resolve(&self, address: &str) -> Option<Coordinate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);

            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_addresses.contains(address) {
                return None;
            }
            Some(Coordinate {
                latitude: address.len() as f64,
                longitude: 1.0,
            })
        }

        async fn resolve_country(&self, _coordinate: Coordinate) -> Option<CountryInfo> {
            None
        }
    }

    fn shipment(id: &str, pickup: &str, delivery: &str) -> Shipment {
        Shipment {
            id: id.to_string(),
            pickup_address: pickup.to_string(),
            delivery_address: delivery.to_string(),
        }
    }

    async fn open_cache(
        store: Arc<dyn KeyValueStore>,
        geocoder: Arc<dyn Geocoder>,
    ) -> LocationCache {
        LocationCache::open(store, geocoder, DEFAULT_MAX_CONCURRENT_REQUESTS).await
    }

    #[tokio::test]
    async fn lookup_absent_before_cache() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        assert!(cache.pickup_coordinate("load-1").is_none());
        assert!(cache.delivery_coordinate("load-1").is_none());
        assert!(cache.route("load-1").is_none());

        // Lookups never reach the geocoder
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn cache_then_lookup_is_immediate() {
        let cache = open_cache(Arc::new(MemoryStore::new()), Arc::new(StubGeocoder::new())).await;
        let coord = Coordinate {
            latitude: 52.52,
            longitude: 13.405,
        };

        // No flush: the read must not depend on persistence completing
        cache.cache_pickup_coordinate("load-1", coord);
        assert_eq!(cache.pickup_coordinate("load-1"), Some(coord));

        cache.cache_delivery_coordinate("load-1", coord);
        assert_eq!(cache.delivery_coordinate("load-1"), Some(coord));
    }

    #[tokio::test]
    async fn route_order_preserved() {
        let cache = open_cache(Arc::new(MemoryStore::new()), Arc::new(StubGeocoder::new())).await;
        let points = vec![
            Coordinate {
                latitude: 1.0,
                longitude: 2.0,
            },
            Coordinate {
                latitude: 3.0,
                longitude: 4.0,
            },
            Coordinate {
                latitude: 2.0,
                longitude: 3.0,
            },
        ];

        cache.cache_route("load-1", Route::new(points.clone()));
        assert_eq!(cache.route("load-1").unwrap().points, points);
    }

    #[tokio::test]
    async fn persist_then_reload_roundtrip() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cache = open_cache(store.clone(), Arc::new(StubGeocoder::new())).await;

        for i in 0..5 {
            cache.cache_pickup_coordinate(
                &format!("load-{}", i),
                Coordinate {
                    latitude: 40.0 + i as f64 * 0.1,
                    longitude: -73.9,
                },
            );
        }
        cache.cache_route(
            "load-0",
            Route::new(vec![Coordinate {
                latitude: 40.0,
                longitude: -73.9,
            }]),
        );
        cache.flush().await.unwrap();

        // Fresh instance over the same store simulates a process restart
        let reopened = open_cache(store, Arc::new(StubGeocoder::new())).await;
        for i in 0..5 {
            let coord = reopened.pickup_coordinate(&format!("load-{}", i)).unwrap();
            assert!((coord.latitude - (40.0 + i as f64 * 0.1)).abs() < 1e-9);
            assert!((coord.longitude - -73.9).abs() < 1e-9);
        }
        assert_eq!(reopened.route("load-0").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn preload_populates_both_legs() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        let shipments = vec![
            shipment("a", "Berlin", "Hamburg"),
            shipment("b", "Munich", "Cologne"),
        ];
        assert!(cache.preload(&shipments).await);

        assert_eq!(geocoder.calls(), 4);
        for s in &shipments {
            assert!(cache.pickup_coordinate(&s.id).is_some());
            assert!(cache.delivery_coordinate(&s.id).is_some());
        }
    }

    #[tokio::test]
    async fn preload_bounds_concurrency() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache =
            LocationCache::open(Arc::new(MemoryStore::new()), geocoder.clone(), 3).await;

        let shipments: Vec<Shipment> = (0..12)
            .map(|i| shipment(&format!("load-{}", i), &format!("Street {}", i), ""))
            .collect();
        cache.preload(&shipments).await;

        assert_eq!(geocoder.calls(), 12);
        assert!(
            geocoder.peak() <= 3,
            "peak in-flight was {}",
            geocoder.peak()
        );
    }

    #[tokio::test]
    async fn concurrent_preload_is_dropped() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        let shipments = vec![shipment("a", "Berlin", ""), shipment("b", "Hamburg", "")];
        let first = {
            let cache = cache.clone();
            let shipments = shipments.clone();
            tokio::spawn(async move { cache.preload(&shipments).await })
        };
        tokio::time::sleep(Duration::from_millis(2)).await;

        // Second call while the first is in flight is a no-op
        assert!(!cache.preload(&shipments).await);
        assert!(first.await.unwrap());
        assert_eq!(geocoder.calls(), 2);

        // Once the first finished, preload is accepted again (everything is
        // cached by now, so no further geocoder traffic)
        assert!(cache.preload(&shipments).await);
        assert_eq!(geocoder.calls(), 2);
    }

    #[tokio::test]
    async fn cancelled_preload_releases_guard() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        let shipments = vec![shipment("a", "Berlin", ""), shipment("b", "Hamburg", "")];

        // Cancel the preload mid-flight by dropping its future at the first
        // await point
        let cancelled =
            tokio::time::timeout(Duration::from_millis(1), cache.preload(&shipments)).await;
        assert!(cancelled.is_err());

        // Let the already-spawned lookups drain
        tokio::time::sleep(Duration::from_millis(200)).await;

        // A later preload must still be accepted
        assert!(cache.preload(&shipments).await);
        assert!(cache.pickup_coordinate("a").is_some());
        assert!(cache.pickup_coordinate("b").is_some());
    }

    #[tokio::test]
    async fn preload_failure_does_not_block_batch() {
        let geocoder = Arc::new(StubGeocoder::failing_for(&["Nowhere"]));
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        let shipments = vec![
            shipment("a", "Berlin", "Nowhere"),
            shipment("b", "Nowhere", "Hamburg"),
            shipment("c", "Munich", ""),
        ];
        cache.preload(&shipments).await;

        assert!(cache.pickup_coordinate("a").is_some());
        assert!(cache.delivery_coordinate("a").is_none());
        assert!(cache.pickup_coordinate("b").is_none());
        assert!(cache.delivery_coordinate("b").is_some());
        assert!(cache.pickup_coordinate("c").is_some());
    }

    #[tokio::test]
    async fn preload_skips_cached_and_empty_addresses() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        cache.cache_pickup_coordinate(
            "a",
            Coordinate {
                latitude: 1.0,
                longitude: 1.0,
            },
        );

        let shipments = vec![
            shipment("a", "Berlin", ""),   // pickup cached, delivery empty
            shipment("b", "  ", "Hamburg"), // whitespace pickup
        ];
        cache.preload(&shipments).await;

        // Only b's delivery needed resolving
        assert_eq!(geocoder.calls(), 1);
        assert!(cache.delivery_coordinate("b").is_some());
    }

    #[tokio::test]
    async fn preload_detached_populates_eventually() {
        let geocoder = Arc::new(StubGeocoder::new());
        let cache = open_cache(Arc::new(MemoryStore::new()), geocoder.clone()).await;

        cache.preload_detached(vec![shipment("a", "Berlin", "")]);

        // Completion is observed via cache population only
        for _ in 0..200 {
            if cache.pickup_coordinate("a").is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(cache.pickup_coordinate("a").is_some());
    }

    #[tokio::test]
    async fn preload_persists_at_batch_end() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cache = open_cache(store.clone(), Arc::new(StubGeocoder::new())).await;

        cache.preload(&[shipment("a", "Berlin", "Hamburg")]).await;

        let reopened = open_cache(store, Arc::new(StubGeocoder::new())).await;
        assert!(reopened.pickup_coordinate("a").is_some());
        assert!(reopened.delivery_coordinate("a").is_some());
    }

    #[tokio::test]
    async fn clear_memory_keeps_durable_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cache = open_cache(store.clone(), Arc::new(StubGeocoder::new())).await;
        let coord = Coordinate {
            latitude: 10.0,
            longitude: 20.0,
        };

        cache.cache_pickup_coordinate("a", coord);
        cache.flush().await.unwrap();

        cache.clear_memory();
        assert!(cache.pickup_coordinate("a").is_none());

        // The durable record survives a memory-only clear
        let reopened = open_cache(store, Arc::new(StubGeocoder::new())).await;
        assert_eq!(reopened.pickup_coordinate("a"), Some(coord));
    }

    #[tokio::test]
    async fn clear_all_removes_durable_records() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cache = open_cache(store.clone(), Arc::new(StubGeocoder::new())).await;

        cache.cache_pickup_coordinate(
            "a",
            Coordinate {
                latitude: 10.0,
                longitude: 20.0,
            },
        );
        cache.cache_route("a", Route::new(vec![]));
        cache.flush().await.unwrap();

        cache.clear_all().await;

        let reopened = open_cache(store, Arc::new(StubGeocoder::new())).await;
        assert!(reopened.pickup_coordinate("a").is_none());
        assert!(reopened.route("a").is_none());
    }

    #[tokio::test]
    async fn malformed_record_skipped_on_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let blob = br#"{
            "good": {"coordinate": {"latitude": 1.0, "longitude": 2.0}, "resolved_at": "2026-08-01T00:00:00Z"},
            "bad": 42
        }"#;
        store.put("pickup-coordinates", blob).await.unwrap();

        let cache = open_cache(store, Arc::new(StubGeocoder::new())).await;
        assert!(cache.pickup_coordinate("good").is_some());
        assert!(cache.pickup_coordinate("bad").is_none());
    }

    #[tokio::test]
    async fn out_of_range_record_skipped_on_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let blob = br#"{
            "good": {"coordinate": {"latitude": 1.0, "longitude": 2.0}, "resolved_at": "2026-08-01T00:00:00Z"},
            "bad": {"coordinate": {"latitude": 999.0, "longitude": 2.0}, "resolved_at": "2026-08-01T00:00:00Z"}
        }"#;
        store.put("pickup-coordinates", blob).await.unwrap();

        let cache = open_cache(store, Arc::new(StubGeocoder::new())).await;
        assert!(cache.pickup_coordinate("good").is_some());
        assert!(cache.pickup_coordinate("bad").is_none());
    }

    #[tokio::test]
    async fn stats_counts_namespaces() {
        let cache = open_cache(Arc::new(MemoryStore::new()), Arc::new(StubGeocoder::new())).await;
        let coord = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };

        cache.cache_pickup_coordinate("a", coord);
        cache.cache_pickup_coordinate("b", coord);
        cache.cache_delivery_coordinate("a", coord);

        assert_eq!(
            cache.stats(),
            CacheStats {
                pickups: 2,
                deliveries: 1,
                routes: 0
            }
        );
    }
}

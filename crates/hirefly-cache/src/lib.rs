//! # Hirefly Cache - Role-Permission Caching
//!
//! Per-role permission snapshots with TTL-based invalidation, consulted on
//! every authenticated request to avoid a populate on each call.
//!
//! The cache is an optimization only: a miss (or expiry) means "consult the
//! authoritative role store". It never fails a request.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use hirefly_const::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECONDS};
use hirefly_types::Permission;

/// One cached snapshot with its insertion timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    permissions: Vec<Permission>,
    stored_at: Instant,
}

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Role ids in insertion order; the front is the eviction candidate.
    /// Re-setting a live key keeps its original position.
    order: VecDeque<String>,
}

/// Capacity-bounded role→permissions cache with TTL expiry.
///
/// Eviction is insertion-order: when the bound is exceeded the single
/// oldest-inserted entry is dropped. Expired entries are treated as absent
/// and removed by the read that observes them.
pub struct RolePermissionCache {
    state: RwLock<CacheState>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    invalidations: AtomicU64,
}

impl RolePermissionCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity as usize,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Get the cached permission snapshot for a role.
    ///
    /// Returns `None` on miss or expiry; an expired entry is evicted before
    /// returning.
    pub async fn get(&self, role_id: &str) -> Option<Vec<Permission>> {
        {
            let state = self.state.read().await;
            match state.entries.get(role_id) {
                Some(entry) if entry.stored_at.elapsed() <= self.ttl => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.permissions.clone());
                }
                Some(_) => {} // expired, evict below
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Expired: upgrade to a write lock and re-check, since another
        // reader may have evicted (or a writer refreshed) in between.
        let mut state = self.state.write().await;
        if let Some(entry) = state.entries.get(role_id) {
            if entry.stored_at.elapsed() <= self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.permissions.clone());
            }
            state.entries.remove(role_id);
            state.order.retain(|id| id != role_id);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a permission snapshot for a role, stamped with the current
    /// time. Evicts the oldest-inserted entry if the bound is exceeded.
    pub async fn set(&self, role_id: &str, permissions: Vec<Permission>) {
        let mut state = self.state.write().await;

        let entry = CacheEntry {
            permissions,
            stored_at: Instant::now(),
        };

        if state.entries.insert(role_id.to_string(), entry).is_none() {
            state.order.push_back(role_id.to_string());
        }

        if state.entries.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Remove one role's entry, or clear the whole cache.
    ///
    /// Writers mutating a role's permission set must call this before
    /// reporting success, so the mutating actor's next request observes
    /// the new set.
    pub async fn invalidate(&self, role_id: Option<&str>) {
        let mut state = self.state.write().await;
        match role_id {
            Some(id) => {
                if state.entries.remove(id).is_some() {
                    state.order.retain(|k| k != id);
                }
            }
            None => {
                state.entries.clear();
                state.order.clear();
            }
        }
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of live entries (expired-but-unobserved entries included).
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);

        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            evictions: self.evictions.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

impl Default for RolePermissionCache {
    fn default() -> Self {
        Self::new(
            DEFAULT_CACHE_CAPACITY,
            Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    pub invalidations: u64,
}

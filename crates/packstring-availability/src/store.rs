//! File-backed availability store

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use packstring_core::{Error, Result};

/// Booking statuses accepted in the availability file and the admin editor.
pub const VALID_STATUSES: [&str; 3] = ["open", "limited", "booked"];

pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

/// One bookable date range for one trip.
///
/// `dates` is display-only free text ("Sept 15 - Sept 22"), never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSlot {
    pub dates: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Trip slug to ordered slot list. Slot order is display order; duplicate
/// date ranges are allowed.
pub type Trips = BTreeMap<String, Vec<DateSlot>>;

/// Top-level structure of the YAML file.
#[derive(Debug, Default, Deserialize)]
struct AvailabilityFile {
    #[serde(default)]
    trips: Trips,
}

/// Borrowing counterpart of [`AvailabilityFile`] for serialization.
#[derive(Serialize)]
struct AvailabilityFileRef<'a> {
    trips: &'a Trips,
}

const FILE_HEADER: &str = "\
# Trip Availability - MT Hunt & Fish Outfitters
# Edit this file to update availability on the website.
# Status options: open, limited, booked

";

struct CacheState {
    trips: Trips,
    /// Backing file mtime at the last fully successful load.
    mod_time: Option<SystemTime>,
}

/// Loads and caches trip availability from a YAML file.
///
/// Constructed once at bootstrap and shared by every handler. In dev mode
/// the backing file is stat-checked on each read and reloaded when it has
/// changed; in production reads are answered purely from cache. A missing
/// or malformed file degrades to "no trips configured" and never fails the
/// serving process.
pub struct AvailabilityStore {
    path: PathBuf,
    dev_mode: bool,
    state: RwLock<CacheState>,
}

impl AvailabilityStore {
    /// Creates a store backed by the YAML file at `path` and performs one
    /// load attempt. Load failure is non-fatal: the store starts empty and
    /// a warning is logged.
    pub fn new(path: impl Into<PathBuf>, dev_mode: bool) -> Self {
        let store = Self {
            path: path.into(),
            dev_mode,
            state: RwLock::new(CacheState {
                trips: Trips::new(),
                mod_time: None,
            }),
        };
        store.load();
        store
    }

    /// Returns the slot list for a trip slug, or an empty list for an
    /// unknown slug. Never fails.
    pub fn get(&self, slug: &str) -> Vec<DateSlot> {
        if self.dev_mode {
            self.reload_if_changed();
        }
        let state = self.state.read().expect("availability lock poisoned");
        state.trips.get(slug).cloned().unwrap_or_default()
    }

    /// Returns an independent copy of the full trips mapping for the admin
    /// editor. Mutating the returned value never affects the cache.
    pub fn get_all(&self) -> Trips {
        if self.dev_mode {
            self.reload_if_changed();
        }
        let state = self.state.read().expect("availability lock poisoned");
        state.trips.clone()
    }

    /// Validates `trips`, writes them atomically to the YAML file, and
    /// replaces the in-memory cache.
    ///
    /// Validation is all-or-nothing: any slot with a status outside
    /// [`VALID_STATUSES`] fails the entire save, naming the offending slug
    /// and index, and neither the file nor the cache changes. The write
    /// goes to a temp file in the target's directory and is renamed over
    /// the target, so readers never observe a partial file.
    pub fn save(&self, trips: Trips) -> Result<()> {
        for (slug, slots) in &trips {
            for (i, slot) in slots.iter().enumerate() {
                if !is_valid_status(&slot.status) {
                    return Err(Error::InvalidSlotStatus {
                        slug: slug.clone(),
                        index: i,
                        status: slot.status.clone(),
                    });
                }
            }
        }

        let yaml = serde_yaml::to_string(&AvailabilityFileRef { trips: &trips })
            .map_err(|e| Error::AvailabilityFile(format!("serialize: {}", e)))?;

        // Temp file in the same directory guarantees a same-filesystem
        // rename; the NamedTempFile guard removes it on any early return.
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::Builder::new()
            .prefix("availability-")
            .suffix(".yaml")
            .tempfile_in(dir)?;
        tmp.write_all(FILE_HEADER.as_bytes())?;
        tmp.write_all(yaml.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        let mod_time = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok();

        {
            let mut state = self.state.write().expect("availability lock poisoned");
            let trip_count = trips.len();
            state.trips = trips;
            if mod_time.is_some() {
                state.mod_time = mod_time;
            }
            info!(trips = trip_count, path = %self.path.display(), "saved availability");
        }

        Ok(())
    }

    /// Reads and parses the backing file, replacing the cache only on a
    /// fully successful load. Any failure logs a warning and keeps the
    /// last-known-good cache (stale-but-available over empty).
    fn load(&self) {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read availability file");
                return;
            }
        };

        let mut file: AvailabilityFile = match serde_yaml::from_str(&raw) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot parse availability file");
                return;
            }
        };

        // Lenient-read policy: an unrecognized status becomes "open" so a
        // hand-edit typo degrades gracefully instead of blanking the trip.
        for (slug, slots) in &mut file.trips {
            for (i, slot) in slots.iter_mut().enumerate() {
                if !is_valid_status(&slot.status) {
                    warn!(
                        slug = %slug,
                        index = i,
                        status = %slot.status,
                        "unknown availability status, treating as open"
                    );
                    slot.status = "open".to_string();
                }
            }
        }

        let mod_time = match std::fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot stat availability file");
                return;
            }
        };

        let mut state = self.state.write().expect("availability lock poisoned");
        info!(trips = file.trips.len(), path = %self.path.display(), "loaded availability");
        state.trips = file.trips;
        state.mod_time = Some(mod_time);
    }

    /// Stat-compares the backing file and reloads when it is newer than the
    /// last load. Two readers may both observe "changed" and both reload;
    /// that race is idempotent and the exclusive lock in `load` keeps the
    /// cache swap consistent.
    fn reload_if_changed(&self) {
        let Ok(modified) = std::fs::metadata(&self.path).and_then(|m| m.modified()) else {
            return;
        };
        let changed = {
            let state = self.state.read().expect("availability lock poisoned");
            match state.mod_time {
                Some(last) => modified > last,
                None => true,
            }
        };
        if changed {
            self.load();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn slot(dates: &str, status: &str, note: &str) -> DateSlot {
        DateSlot {
            dates: dates.to_string(),
            status: status.to_string(),
            note: note.to_string(),
        }
    }

    fn sample_trips(status: &str, note: &str) -> Trips {
        let mut trips = Trips::new();
        trips.insert(
            "jet-boat".to_string(),
            vec![slot("June 1 - June 7", status, note)],
        );
        trips.insert(
            "elk-hunting".to_string(),
            vec![
                slot("Oct 15 - Oct 22", status, note),
                slot("Oct 23 - Oct 30", status, note),
            ],
        );
        trips
    }

    #[test]
    fn missing_file_is_non_fatal() {
        let dir = tempdir().unwrap();
        let store = AvailabilityStore::new(dir.path().join("availability.yaml"), false);
        assert!(store.get("jet-boat").is_empty());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn malformed_file_is_non_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        std::fs::write(&path, "trips: [not: valid: yaml: {{{").unwrap();
        let store = AvailabilityStore::new(&path, false);
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn unknown_status_normalized_to_open_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        std::fs::write(
            &path,
            "trips:\n  jet-boat:\n    - dates: June 1\n      status: frobnicate\n",
        )
        .unwrap();
        let store = AvailabilityStore::new(&path, false);

        let slots = store.get("jet-boat");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].status, "open");
    }

    #[test]
    fn invalid_status_rejected_on_save_and_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        let store = AvailabilityStore::new(&path, false);
        store.save(sample_trips("open", "")).unwrap();
        let before = std::fs::read(&path).unwrap();

        let err = store.save(sample_trips("frobnicate", "")).unwrap_err();
        match err {
            Error::InvalidSlotStatus { slug, index, status } => {
                assert_eq!(slug, "elk-hunting");
                assert_eq!(index, 0);
                assert_eq!(status, "frobnicate");
            }
            other => panic!("expected InvalidSlotStatus, got {:?}", other),
        }

        assert_eq!(std::fs::read(&path).unwrap(), before);
        // Cache also unchanged
        assert_eq!(store.get("jet-boat")[0].status, "open");
    }

    #[test]
    fn save_round_trips_through_cache_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        let store = AvailabilityStore::new(&path, false);

        let trips = sample_trips("limited", "2 spots left");
        store.save(trips.clone()).unwrap();
        assert_eq!(store.get_all(), trips);

        // A fresh store reading the written file sees the same data.
        let fresh = AvailabilityStore::new(&path, false);
        assert_eq!(fresh.get_all(), trips);

        // The human-readable header survives every save.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("# Trip Availability"));
    }

    #[test]
    fn note_omitted_from_yaml_when_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        let store = AvailabilityStore::new(&path, false);
        store.save(sample_trips("open", "")).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("note"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_leaves_file_and_cache_intact() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let sub = dir.path().join("data");
        std::fs::create_dir(&sub).unwrap();
        let path = sub.join("availability.yaml");

        let store = AvailabilityStore::new(&path, false);
        store.save(sample_trips("open", "v1")).unwrap();
        let before = std::fs::read(&path).unwrap();

        // Read-only directory: temp file creation fails, save must not
        // touch the target or the cache.
        std::fs::set_permissions(&sub, std::fs::Permissions::from_mode(0o555)).unwrap();
        let err = store.save(sample_trips("open", "v2")).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "expected Io, got {:?}", err);
        std::fs::set_permissions(&sub, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(store.get("jet-boat")[0].note, "v1");
    }

    #[test]
    fn dev_mode_reloads_on_external_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        std::fs::write(&path, "trips:\n  jet-boat:\n    - dates: old\n      status: open\n")
            .unwrap();
        let store = AvailabilityStore::new(&path, true);
        assert_eq!(store.get("jet-boat")[0].dates, "old");

        // Ensure the rewritten file carries a strictly newer mtime.
        std::thread::sleep(Duration::from_millis(50));
        std::fs::write(&path, "trips:\n  jet-boat:\n    - dates: new\n      status: booked\n")
            .unwrap();

        let slots = store.get("jet-boat");
        assert_eq!(slots[0].dates, "new");
        assert_eq!(slots[0].status, "booked");
    }

    #[test]
    fn production_mode_ignores_external_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        std::fs::write(&path, "trips:\n  jet-boat:\n    - dates: old\n      status: open\n")
            .unwrap();
        let store = AvailabilityStore::new(&path, false);

        std::thread::sleep(Duration::from_millis(50));
        std::fs::write(&path, "trips:\n  jet-boat:\n    - dates: new\n      status: booked\n")
            .unwrap();

        assert_eq!(store.get("jet-boat")[0].dates, "old");
    }

    #[test]
    fn unknown_slug_returns_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        let store = AvailabilityStore::new(&path, false);
        store.save(sample_trips("open", "")).unwrap();
        assert!(store.get("nonexistent-trip-slug").is_empty());
    }

    #[test]
    fn get_all_returns_isolated_copy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        let store = AvailabilityStore::new(&path, false);
        store.save(sample_trips("open", "")).unwrap();

        let mut copy = store.get_all();
        copy.get_mut("jet-boat").unwrap()[0].status = "booked".to_string();
        copy.remove("elk-hunting");

        assert_eq!(store.get("jet-boat")[0].status, "open");
        assert_eq!(store.get_all().len(), 2);
    }

    #[test]
    fn concurrent_reads_never_observe_mixed_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.yaml");
        let store = Arc::new(AvailabilityStore::new(&path, false));
        store.save(sample_trips("open", "v1")).unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            let stop = stop.clone();
            readers.push(std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let snapshot = store.get_all();
                    let notes: Vec<&str> = snapshot
                        .values()
                        .flat_map(|slots| slots.iter().map(|s| s.note.as_str()))
                        .collect();
                    if let Some(first) = notes.first() {
                        assert!(
                            notes.iter().all(|n| n == first),
                            "observed mixed save state: {:?}",
                            notes
                        );
                    }
                }
            }));
        }

        for i in 0..20 {
            let version = format!("v{}", i + 2);
            store.save(sample_trips("open", &version)).unwrap();
        }
        stop.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().unwrap();
        }
    }
}

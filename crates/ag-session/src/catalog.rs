//! Catalog of known activity files.
//!
//! Decoding a whole activity just to learn where it starts is expensive, so
//! the catalog remembers, per file name, the local-planar position of the
//! activity's first point.  Proximity queries then run against the catalog
//! alone.
//!
//! # CSV format
//!
//! ```csv
//! name,x,y
//! morning_ride.csv,12.5,-340.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ag_core::LocalPoint;

use crate::SessionResult;

#[derive(Serialize, Deserialize)]
struct CatalogRow {
    name: String,
    x:    f64,
    y:    f64,
}

/// File name → start position, ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityCatalog {
    entries: BTreeMap<String, LocalPoint>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<LocalPoint> {
        self.entries.get(name).copied()
    }

    /// Record `name` as starting at `start`.  Returns the previous start if
    /// the name was already catalogued.
    pub fn register(&mut self, name: impl Into<String>, start: LocalPoint) -> Option<LocalPoint> {
        self.entries.insert(name.into(), start)
    }

    pub fn remove(&mut self, name: &str) -> Option<LocalPoint> {
        self.entries.remove(name)
    }

    /// Names of activities starting strictly within `radius` metres of
    /// `position`, in name order.
    pub fn near(&self, position: LocalPoint, radius: f64) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, start)| start.distance_to(position) < radius)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LocalPoint)> {
        self.entries.iter().map(|(name, &start)| (name.as_str(), start))
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Load a catalog previously written by [`save_csv`][Self::save_csv].
    pub fn load_csv(path: &Path) -> SessionResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let mut catalog = Self::new();
        for result in reader.deserialize::<CatalogRow>() {
            let row = result?;
            catalog.register(row.name, LocalPoint::new(row.x, row.y));
        }
        Ok(catalog)
    }

    /// Write every entry to `path`, replacing any existing file.
    pub fn save_csv(&self, path: &Path) -> SessionResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for (name, start) in self.iter() {
            writer.serialize(CatalogRow { name: name.to_owned(), x: start.x, y: start.y })?;
        }
        writer.flush()?;
        Ok(())
    }
}

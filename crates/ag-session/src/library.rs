//! A directory of CSV activity files, indexed by an [`ActivityCatalog`].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use ag_core::LocalPoint;
use ag_track::{CsvActivityFile, Track, TrackDecoder, TrackResult};

use crate::{ActivityCatalog, SessionResult};

/// File extension of activity files.
const ACTIVITY_EXT: &str = "csv";

pub struct ActivityLibrary {
    dir:     PathBuf,
    catalog: ActivityCatalog,
    decoder: TrackDecoder,
}

impl ActivityLibrary {
    pub fn new(dir: impl Into<PathBuf>, catalog: ActivityCatalog, decoder: TrackDecoder) -> Self {
        Self { dir: dir.into(), catalog, decoder }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    pub fn catalog(&self) -> &ActivityCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> ActivityCatalog {
        self.catalog
    }

    /// Catalog every activity file in the directory that is not catalogued
    /// yet.  Files that fail to decode, decode to fewer than two points, or
    /// have a non-UTF-8 name are skipped.  A missing directory catalogues nothing.
    ///
    /// Returns the number of newly catalogued files.
    pub fn refresh(&mut self) -> SessionResult<usize> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "activity directory not found");
            return Ok(0);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => warn!(dir = %self.dir.display(), error = %e, "cannot read directory entry"),
            }
        }
        paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == ACTIVITY_EXT));
        paths.sort();

        let mut added = 0;
        for path in paths {
            let file = match CsvActivityFile::open(&path) {
                Ok(f) => f,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot open activity file");
                    continue;
                }
            };
            let Some(name) = file.name().map(str::to_owned) else {
                warn!(path = %path.display(), "skipping activity file with a non-UTF-8 name");
                continue;
            };
            if self.catalog.contains(&name) {
                continue;
            }

            match self.decode(&file) {
                Ok(track) if track.is_usable() => {
                    let start = track.points()[0].position();
                    debug!(%name, %start, points = track.len(), "activity catalogued");
                    self.catalog.register(name, start);
                    added += 1;
                }
                Ok(track) => {
                    debug!(%name, points = track.len(), "activity too short to catalogue");
                }
                Err(e) => warn!(%name, error = %e, "skipping unreadable activity"),
            }
        }
        Ok(added)
    }

    /// Decode every catalogued activity starting within `radius` metres of
    /// `position`.  Entries whose file has disappeared are dropped from the
    /// catalog.  Unreadable or short tracks are skipped.
    pub fn tracks_near(&mut self, position: LocalPoint, radius: f64) -> Vec<Track> {
        let mut tracks = Vec::new();

        for name in self.catalog.near(position, radius) {
            let path = self.dir.join(&name);
            if !path.is_file() {
                debug!(%name, "activity file gone; removing from catalog");
                self.catalog.remove(&name);
                continue;
            }

            match CsvActivityFile::open(&path).and_then(|file| self.decode(&file)) {
                Ok(track) if track.is_usable() => tracks.push(track),
                Ok(track) => debug!(%name, points = track.len(), "skipping short track"),
                Err(e) => warn!(%name, error = %e, "skipping unreadable activity"),
            }
        }
        tracks
    }

    fn decode(&self, file: &CsvActivityFile) -> TrackResult<Track> {
        self.decoder.decode_source(file)
    }
}

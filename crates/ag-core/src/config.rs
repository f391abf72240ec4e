//! Session configuration.
//!
//! Loaded from a TOML file by the application; every field is optional and
//! falls back to the defaults below.
//!
//! ```toml
//! opacity          = 3
//! show_date        = true
//! tick_interval_ms = 1000
//!
//! [reference_origin]
//! lat = -19.10637
//! lon = -169.871
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{GeoCoord, GhostError, GhostResult};

/// Step between opacity levels on a 0–255 alpha scale.
const ALPHA_PER_LEVEL: u8 = 51;

/// Top-level configuration for a ghost session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Geographic anchor every track in the session is projected against.
    pub reference_origin: GeoCoord,

    /// Ghost opacity level, 1 (faint) to 5 (opaque).  Out-of-range values
    /// are clamped by [`alpha`][Self::alpha].
    pub opacity: i32,

    /// Produce "N days ago" labels above nearby ghosts.
    pub show_date: bool,

    /// Wall-clock milliseconds per playback tick.
    pub tick_interval_ms: u64,

    /// Catalogued activities whose first point lies within this many metres
    /// of the player are loaded.
    pub load_radius_m: f64,

    /// Labels are produced only for ghosts within this many metres of the
    /// viewer.
    pub label_range_m: f64,

    /// Seed for embodiment selection.  `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            reference_origin: GeoCoord::new(-19.10637, -169.871),
            opacity:          5,
            show_date:        true,
            tick_interval_ms: 1_000,
            load_radius_m:    50.0,
            label_range_m:    20.0,
            seed:             None,
        }
    }
}

impl GhostConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> GhostResult<Self> {
        let config: GhostConfig =
            toml::from_str(s).map_err(|e| GhostError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> GhostResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), origin = %config.reference_origin, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> GhostResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(GhostError::Config("tick_interval_ms must be positive".into()));
        }
        if !self.reference_origin.is_finite() {
            return Err(GhostError::Config(format!(
                "reference_origin {} is not finite",
                self.reference_origin
            )));
        }
        if !(self.load_radius_m >= 0.0 && self.label_range_m >= 0.0) {
            return Err(GhostError::Config("radii must be non-negative".into()));
        }
        Ok(())
    }

    /// Alpha value for ghost entities: the opacity level clamped to 1..=5,
    /// scaled to 51..=255.
    pub fn alpha(&self) -> u8 {
        self.opacity.clamp(1, 5) as u8 * ALPHA_PER_LEVEL
    }
}

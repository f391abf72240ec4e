//! replay: play recorded activities back as ghosts in a headless world.
//!
//! Without `--activities` a built-in ride and run starting at the
//! reference origin are played.  With it, every `*.csv` activity in the
//! directory is catalogued and those starting within `load_radius_m` of the
//! player are loaded.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use ag_core::{GhostConfig, GhostId, LocalPoint, Projector, Tick};
use ag_playback::{Correction, HeadlessWorld, World};
use ag_session::{ActivityCatalog, ActivityLibrary, SessionBuilder, SessionObserver};
use ag_track::{MemorySource, Track, TrackDecoder, read_records};

// ── Built-in activities ───────────────────────────────────────────────────────

// Both start at the default reference origin and head north, ~10 m per fix.
const RIDE_CSV: &str = "\
kind,lat,lon,speed,start_time,sport\n\
session,,,,2024-03-02T07:30:00Z,2\n\
sample,-19.10637,-169.87100,5.5,,\n\
sample,-19.10628,-169.87100,5.8,,\n\
sample,-19.10619,-169.87101,6.1,,\n\
sample,-19.10610,-169.87103,6.0,,\n\
sample,-19.10601,-169.87106,5.7,,\n\
sample,-19.10592,-169.87110,5.9,,\n\
";

const RUN_CSV: &str = "\
kind,lat,lon,speed,start_time,sport\n\
session,,,,2024-05-18T18:05:00Z,1\n\
sample,-19.10637,-169.87100,2.1,,\n\
sample,-19.10628,-169.87100,2.6,,\n\
sample,-19.10628,-169.87100,,,\n\
sample,-19.10619,-169.87099,3.0,,\n\
sample,-19.10610,-169.87097,4.8,,\n\
sample,-19.10601,-169.87094,3.2,,\n\
";

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Replay recorded activities as ghosts
#[derive(Parser, Debug)]
#[command(name = "replay")]
struct Args {
    /// Directory of CSV activity files
    #[arg(short, long)]
    activities: Option<PathBuf>,

    /// Catalog file (name,x,y); read if present and rewritten after scanning
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of playback ticks
    #[arg(short, long, default_value = "60")]
    ticks: u64,

    /// Player heading in degrees, used to stagger ghost starts
    #[arg(long, default_value = "0")]
    heading: f32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    advances:  usize,
    catch_ups: usize,
    snaps:     usize,
    finished:  usize,
}

impl SessionObserver for Progress {
    fn on_ghost_advanced(&mut self, _tick: Tick, _ghost: GhostId, _index: usize, correction: Correction) {
        self.advances += 1;
        match correction {
            Correction::CatchUp => self.catch_ups += 1,
            Correction::Snap    => self.snaps += 1,
            Correction::None    => {}
        }
    }

    fn on_ghost_finished(&mut self, tick: Tick, ghost: GhostId) {
        self.finished += 1;
        info!(%tick, %ghost, "finished");
    }
}

// ── Track sources ─────────────────────────────────────────────────────────────

fn builtin_tracks(decoder: &TrackDecoder) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();
    for csv in [RIDE_CSV, RUN_CSV] {
        let source = MemorySource::new(read_records(Cursor::new(csv))?, Utc::now());
        tracks.push(decoder.decode_source(&source)?);
    }
    Ok(tracks)
}

fn library_tracks(
    args:    &Args,
    dir:     &Path,
    decoder: TrackDecoder,
    player:  LocalPoint,
    radius:  f64,
) -> Result<Vec<Track>> {
    let catalog = match &args.catalog {
        Some(path) if path.exists() => ActivityCatalog::load_csv(path)?,
        _ => ActivityCatalog::new(),
    };
    let mut library = ActivityLibrary::new(dir, catalog, decoder);

    let added = library.refresh()?;
    println!("Catalog: {} activities ({added} new)", library.catalog().len());

    let tracks = library.tracks_near(player, radius);
    if let Some(path) = &args.catalog {
        library.catalog().save_csv(path)?;
    }
    Ok(tracks)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => GhostConfig::load(path)?,
        None => GhostConfig::default(),
    };
    println!("=== replay: activity ghosts ===");
    println!(
        "Origin: {}  |  Tick: {} ms  |  Opacity alpha: {}",
        config.reference_origin,
        config.tick_interval_ms,
        config.alpha(),
    );

    // 1. Decode the activities near the player, who stands at the origin.
    let player = LocalPoint::ZERO;
    let decoder = TrackDecoder::new(Projector::new(config.reference_origin));
    let tracks = match &args.activities {
        Some(dir) => library_tracks(&args, dir, decoder, player, config.load_radius_m)?,
        None => builtin_tracks(&decoder)?,
    };

    // 2. Spawn ghosts.
    let mut session = SessionBuilder::new(config, HeadlessWorld::new()).build()?;
    let loaded = session.load(tracks, player, args.heading);
    println!("Loaded {loaded} ghosts");
    if loaded == 0 {
        return Ok(());
    }

    // 3. Play, stepping the world one tick interval between ticks.
    let interval_ms = session.config.tick_interval_ms;
    let mut progress = Progress::default();
    for _ in 0..args.ticks {
        session.world.step(interval_ms as f64 / 1_000.0);
        session.advance(interval_ms, &mut progress);
        if session.active_count() == 0 {
            break;
        }
    }

    // 4. Report.
    println!();
    println!(
        "Ticks: {}  |  advances: {}  catch-ups: {}  snaps: {}  finished: {}",
        session.current_tick().0,
        progress.advances,
        progress.catch_ups,
        progress.snaps,
        progress.finished,
    );
    for (i, ghost) in session.ghosts().iter().enumerate() {
        let position = session.world.position(ghost.agent());
        println!(
            "  {} {:<10} point {:>3}/{:<3} {:?}  at {}",
            GhostId(i as u32),
            ghost.embodiment().as_str(),
            ghost.index(),
            ghost.track().len() - 1,
            ghost.state(),
            position,
        );
    }
    for label in session.labels(Utc::now(), player) {
        println!("  {}: {}", label.ghost, label.text);
    }

    session.clear();
    Ok(())
}

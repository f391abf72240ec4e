//! Unit tests for ag-playback.

use chrono::{DateTime, TimeZone, Utc};

use ag_core::{ActivityKind, EmbodimentKind, LocalPoint};
use ag_track::{GeoPoint, Track};

use crate::{
    Correction, DeviationPolicy, Embodiment, Gait, GaitSelection, Ghost, HeadlessWorld,
    OPAQUE, PlaybackError, PlaybackState, TickOutcome, World, WorldCommand, WorldError,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// `n` points `spacing` metres apart along +x, all at `speed`.
fn line(n: usize, spacing: f64, speed: f32, activity: ActivityKind) -> Track {
    let points = (0..n).map(|i| GeoPoint::new(i as f64 * spacing, 0.0, speed)).collect();
    Track::new(points, activity, created())
}

fn ride(n: usize) -> Track {
    line(n, 10.0, 3.0, ActivityKind::Cycling)
}

fn spawn(track: Track, world: &mut HeadlessWorld) -> Ghost {
    Ghost::spawn(track, 0, OPAQUE, world).unwrap()
}

fn count(world: &HeadlessWorld, pred: impl Fn(&WorldCommand) -> bool) -> usize {
    world.log().iter().filter(|c| pred(*c)).count()
}

// ── Deviation policy ──────────────────────────────────────────────────────────

#[cfg(test)]
mod deviation {
    use super::*;

    #[test]
    fn vehicle_thresholds_exceed_pedestrian() {
        let v = DeviationPolicy::for_embodiment(EmbodimentKind::Vehicle);
        let p = DeviationPolicy::for_embodiment(EmbodimentKind::Pedestrian);
        assert!(v.snap_m > p.snap_m);
        assert!(v.catch_up_m > p.catch_up_m);
    }

    #[test]
    fn classify_bands() {
        let v = DeviationPolicy::VEHICLE;
        assert_eq!(v.classify(25.0), Correction::Snap);
        assert_eq!(v.classify(7.0), Correction::CatchUp);
        assert_eq!(v.classify(2.0), Correction::None);
        // Thresholds are exclusive.
        assert_eq!(v.classify(20.0), Correction::CatchUp);
        assert_eq!(v.classify(5.0), Correction::None);

        let p = DeviationPolicy::PEDESTRIAN;
        assert_eq!(p.classify(12.0), Correction::Snap);
        assert_eq!(p.classify(7.0), Correction::CatchUp);
        assert_eq!(p.classify(2.0), Correction::None);
    }

    #[test]
    fn tick_snaps_when_far_off() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(5), &mut world);
        world.place(g.agent(), LocalPoint::new(0.0, 25.0));

        let out = g.tick(&mut world);
        assert_eq!(out, TickOutcome::Advanced { index: 1, speed: 3.0, correction: Correction::Snap });
        assert!(world.log().contains(&WorldCommand::Teleport {
            agent: g.agent(),
            to:    LocalPoint::new(0.0, 0.0),
        }));
        assert_eq!(world.position(g.agent()), LocalPoint::new(0.0, 0.0));
    }

    #[test]
    fn tick_catches_up_when_slightly_behind() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(5), &mut world);
        world.place(g.agent(), LocalPoint::new(0.0, 7.0));

        match g.tick(&mut world) {
            TickOutcome::Advanced { index, speed, correction } => {
                assert_eq!(index, 1);
                assert_eq!(correction, Correction::CatchUp);
                assert!((speed - 3.3).abs() < 1e-5);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!world.log().iter().any(|c| matches!(c, WorldCommand::Teleport { .. })));
    }

    #[test]
    fn tick_uses_recorded_speed_when_on_track() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(5), &mut world);
        world.place(g.agent(), LocalPoint::new(0.0, 2.0));

        assert_eq!(
            g.tick(&mut world),
            TickOutcome::Advanced { index: 1, speed: 3.0, correction: Correction::None },
        );
    }
}

// ── Playback ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod playback {
    use super::*;

    #[test]
    fn spawn_places_agent_at_first_point_facing_second() {
        let mut world = HeadlessWorld::new();
        let g = spawn(ride(3), &mut world);

        let agent = world.agent(g.agent()).unwrap();
        assert_eq!(agent.position, LocalPoint::new(0.0, 0.0));
        // Facing +x is 270° counter-clockwise from +y.
        assert!((agent.heading - 270.0).abs() < 1e-3);
        assert_eq!(agent.embodiment.kind, EmbodimentKind::Vehicle);
        assert_eq!(g.index(), 0);
        assert_eq!(g.state(), PlaybackState::Advancing);
    }

    #[test]
    fn spawn_applies_alpha() {
        let mut world = HeadlessWorld::new();
        let g = Ghost::spawn(ride(3), 1, 102, &mut world).unwrap();

        let embodiment = world.agent(g.agent()).unwrap().embodiment;
        assert_eq!(embodiment, Embodiment { kind: EmbodimentKind::Vehicle, variant: 1, alpha: 102 });
        assert!(matches!(
            world.log()[0],
            WorldCommand::Spawn { embodiment: Embodiment { alpha: 102, .. }, .. }
        ));
    }

    #[test]
    fn embodiment_follows_activity() {
        let mut world = HeadlessWorld::new();
        let g = spawn(line(3, 1.0, 1.0, ActivityKind::Other), &mut world);
        assert_eq!(g.embodiment(), EmbodimentKind::Pedestrian);
    }

    #[test]
    fn vehicle_move_clears_then_moves_then_sets_speed() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(3), &mut world);
        world.take_log();

        g.tick(&mut world);
        let agent = g.agent();
        assert_eq!(world.log(), &[
            WorldCommand::ClearTasks { agent },
            WorldCommand::MoveTo { agent, target: LocalPoint::new(10.0, 0.0), speed: 3.0 },
            WorldCommand::SetSpeed { agent, speed: 3.0 },
        ]);
    }

    #[test]
    fn three_point_track_finishes_on_third_tick() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(3), &mut world);

        assert!(matches!(g.tick(&mut world), TickOutcome::Advanced { index: 1, .. }));
        assert!(matches!(g.tick(&mut world), TickOutcome::Advanced { index: 2, .. }));
        assert!(!g.is_finished());
        assert_eq!(g.tick(&mut world), TickOutcome::Completed);
        assert!(g.is_finished());
        assert!(world.agent(g.agent()).unwrap().finished);
    }

    #[test]
    fn completion_is_signalled_once() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(2), &mut world);

        for _ in 0..6 {
            g.tick(&mut world);
        }
        assert_eq!(g.tick(&mut world), TickOutcome::Idle);
        assert_eq!(g.index(), 1);
        assert_eq!(
            count(&world, |c| matches!(c, WorldCommand::SetFinished { finished: true, .. })),
            1,
        );
    }

    #[test]
    fn index_never_leaves_track() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(4), &mut world);
        for _ in 0..10 {
            g.tick(&mut world);
            assert!(g.index() < g.track().len());
        }
    }

    #[test]
    fn agent_following_its_orders_needs_no_correction() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(6), &mut world);

        for _ in 0..5 {
            let out = g.tick(&mut world);
            assert!(matches!(out, TickOutcome::Advanced { correction: Correction::None, .. }), "{out:?}");
            // 10 m at 3 m/s.
            world.step(10.0 / 3.0 + 0.01);
        }
        assert_eq!(g.tick(&mut world), TickOutcome::Completed);
    }

    #[test]
    fn despawn_removes_agent() {
        let mut world = HeadlessWorld::new();
        let g = spawn(ride(3), &mut world);
        let agent = g.agent();
        assert_eq!(world.agent_count(), 1);

        g.despawn(&mut world);
        assert_eq!(world.agent_count(), 0);
        assert!(world.agent(agent).is_none());
    }
}

// ── Regroup ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod regroup {
    use super::*;

    #[test]
    fn resumes_after_nearest_point() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(10), &mut world);
        world.take_log();

        let nearest = g.regroup(&mut world, LocalPoint::new(42.0, 1.0));
        assert_eq!(nearest, 4);
        assert_eq!(g.index(), 5);

        let agent = g.agent();
        assert!(world.log().contains(&WorldCommand::Teleport { agent, to: LocalPoint::new(40.0, 0.0) }));
        assert!(world.log().contains(&WorldCommand::MoveTo {
            agent,
            target: LocalPoint::new(50.0, 0.0),
            speed:  3.0,
        }));

        assert!(matches!(g.tick(&mut world), TickOutcome::Advanced { index: 6, .. }));
    }

    #[test]
    fn ties_choose_earliest_point() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(5), &mut world);
        assert_eq!(g.regroup(&mut world, LocalPoint::new(15.0, 0.0)), 1);
        assert_eq!(g.index(), 2);
    }

    #[test]
    fn last_point_finishes_on_next_tick() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(10), &mut world);

        assert_eq!(g.regroup(&mut world, LocalPoint::new(1000.0, 0.0)), 9);
        assert_eq!(g.index(), 9);
        assert_eq!(g.tick(&mut world), TickOutcome::Completed);
    }

    #[test]
    fn finished_ghost_is_revived() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(3), &mut world);
        for _ in 0..3 {
            g.tick(&mut world);
        }
        assert!(g.is_finished());

        g.regroup(&mut world, LocalPoint::new(0.0, 0.0));
        assert_eq!(g.state(), PlaybackState::Advancing);
        assert!(!world.agent(g.agent()).unwrap().finished);
        assert_eq!(g.index(), 1);

        assert!(matches!(g.tick(&mut world), TickOutcome::Advanced { index: 2, .. }));
        assert_eq!(g.tick(&mut world), TickOutcome::Completed);
    }

    #[test]
    fn finished_ghost_regrouped_to_last_point_completes_again() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(2), &mut world);
        g.tick(&mut world);
        g.tick(&mut world);
        assert!(g.is_finished());

        g.regroup(&mut world, LocalPoint::new(10.0, 0.0));
        assert_eq!(g.state(), PlaybackState::Advancing);
        assert_eq!(g.tick(&mut world), TickOutcome::Completed);
        assert_eq!(
            count(&world, |c| matches!(c, WorldCommand::SetFinished { finished: true, .. })),
            2,
        );
    }
}

// ── Gait ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gait {
    use super::*;

    #[test]
    fn band_boundaries_are_exact() {
        assert_eq!(Gait::for_speed(2.3999), Gait::Walk);
        assert_eq!(Gait::for_speed(2.4), Gait::Jog);
        assert_eq!(Gait::for_speed(4.5999), Gait::Jog);
        assert_eq!(Gait::for_speed(4.6), Gait::Sprint);
        assert_eq!(Gait::for_speed(0.0), Gait::Walk);
    }

    #[test]
    fn rate_matches_natural_speed() {
        assert!((GaitSelection::for_speed(1.69).rate - 1.0).abs() < 1e-6);
        assert!((GaitSelection::for_speed(3.13).rate - 1.0).abs() < 1e-6);
        assert!((GaitSelection::for_speed(13.26).rate - 2.0).abs() < 1e-5);
    }

    /// Points 1 m apart: walk, walk, jog, jog, jog.
    fn stroll() -> Track {
        let speeds = [1.0, 1.0, 3.0, 3.0, 3.0];
        let points = speeds
            .iter()
            .enumerate()
            .map(|(i, &v)| GeoPoint::new(i as f64, 0.0, v))
            .collect();
        Track::new(points, ActivityKind::Other, created())
    }

    fn plays(world: &HeadlessWorld) -> Vec<Gait> {
        world
            .log()
            .iter()
            .filter_map(|c| match c {
                WorldCommand::PlayAnimation { gait, .. } => Some(*gait),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn gait_replayed_only_on_change() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(stroll(), &mut world);

        for _ in 0..4 {
            g.tick(&mut world);
        }
        assert_eq!(plays(&world), vec![Gait::Walk, Gait::Jog]);
        assert_eq!(g.last_gait(), Some(Gait::Jog));
        assert!(world.log().contains(&WorldCommand::StopAnimation { agent: g.agent(), gait: Gait::Walk }));
        // Rate is refreshed every tick.
        assert_eq!(count(&world, |c| matches!(c, WorldCommand::SetAnimationRate { .. })), 4);

        let running = world.agent(g.agent()).unwrap().animation.unwrap();
        assert_eq!(running.0, Gait::Jog);
        assert!((running.1 - 3.0 / 3.13).abs() < 1e-6);
    }

    #[test]
    fn gait_replayed_when_resuming_from_stop() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(stroll(), &mut world);
        for _ in 0..5 {
            g.tick(&mut world);
        }
        assert!(g.is_finished());
        assert_eq!(world.speed(g.agent()), 0.0);

        // Same gait as before, but the agent was standing still.
        g.regroup(&mut world, LocalPoint::new(3.0, 0.0));
        assert_eq!(plays(&world), vec![Gait::Walk, Gait::Jog, Gait::Jog]);
    }

    #[test]
    fn vehicles_have_no_gait() {
        let mut world = HeadlessWorld::new();
        let mut g = spawn(ride(3), &mut world);
        g.tick(&mut world);
        assert_eq!(g.last_gait(), None);
        assert!(plays(&world).is_empty());
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn short_track_is_rejected() {
        let mut world = HeadlessWorld::new();
        let err = Ghost::spawn(ride(1), 0, OPAQUE, &mut world).unwrap_err();
        assert!(matches!(err, PlaybackError::TrackTooShort { points: 1 }));
        assert_eq!(world.agent_count(), 0);
    }

    #[test]
    fn missing_asset_is_reported() {
        let mut world = HeadlessWorld::new().with_unavailable(EmbodimentKind::Vehicle);
        let err = Ghost::spawn(ride(3), 0, OPAQUE, &mut world).unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::World(WorldError::MissingAsset { kind: EmbodimentKind::Vehicle, variant: 0 })
        ));

        // Pedestrians are still available.
        assert!(Ghost::spawn(line(3, 1.0, 1.0, ActivityKind::Other), 0, OPAQUE, &mut world).is_ok());
    }

    #[test]
    fn variant_out_of_range() {
        let mut world = HeadlessWorld::new().with_variants(EmbodimentKind::Vehicle, 2);
        assert_eq!(world.variant_count(EmbodimentKind::Vehicle), 2);
        assert!(Ghost::spawn(ride(3), 1, OPAQUE, &mut world).is_ok());
        assert!(Ghost::spawn(ride(3), 2, OPAQUE, &mut world).is_err());
    }
}

// ── Headless world ────────────────────────────────────────────────────────────

#[cfg(test)]
mod headless {
    use super::*;

    #[test]
    fn step_moves_toward_target_and_stops_there() {
        let mut world = HeadlessWorld::new();
        let agent = world
            .spawn(Embodiment::new(EmbodimentKind::Vehicle, 0), LocalPoint::ZERO, 0.0)
            .unwrap();
        world.move_to(agent, LocalPoint::new(10.0, 0.0), 2.0);
        world.set_speed(agent, 2.0);

        world.step(2.0);
        assert!((world.position(agent).x - 4.0).abs() < 1e-9);

        world.step(10.0);
        assert_eq!(world.position(agent), LocalPoint::new(10.0, 0.0));
        assert!(world.agent(agent).unwrap().target.is_none());
    }

    #[test]
    fn clear_tasks_stops_agent() {
        let mut world = HeadlessWorld::new();
        let agent = world
            .spawn(Embodiment::new(EmbodimentKind::Pedestrian, 1), LocalPoint::ZERO, 0.0)
            .unwrap();
        world.move_to(agent, LocalPoint::new(10.0, 0.0), 2.0);
        world.set_speed(agent, 2.0);
        world.clear_tasks(agent);

        world.step(1.0);
        assert_eq!(world.position(agent), LocalPoint::ZERO);
        assert_eq!(world.speed(agent), 0.0);
    }

    #[test]
    fn take_log_drains() {
        let mut world = HeadlessWorld::new();
        let agent = world
            .spawn(Embodiment::new(EmbodimentKind::Vehicle, 0), LocalPoint::ZERO, 0.0)
            .unwrap();
        world.remove(agent);

        let log = world.take_log();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|c| c.agent() == agent));
        assert!(world.log().is_empty());
    }
}

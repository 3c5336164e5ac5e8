//! Property tests for the simulation core

use furnace_reline::consts::*;
use furnace_reline::sim::actor::{Actor, integrate_movement};
use furnace_reline::sim::segment::{SegmentState, make_ring_segments, make_wedge_segments};
use furnace_reline::sim::stage::{Stage, StageKind, SubPhase};
use furnace_reline::sim::work::{WorkMode, apply_heat, apply_work};
use furnace_reline::sim::{RunStats, SimState, TickInput, tick};
use furnace_reline::{angle_to_point, point_to_polar};
use glam::Vec2;
use proptest::prelude::*;

fn any_mode() -> impl Strategy<Value = WorkMode> {
    prop_oneof![
        Just(WorkMode::Demolish),
        (
            prop_oneof![
                Just(SubPhase::Mold),
                Just(SubPhase::Pour),
                Just(SubPhase::Demold)
            ],
            0..SEGMENT_COUNT
        )
            .prop_map(|(sub_phase, layer)| WorkMode::Construct { sub_phase, layer }),
    ]
}

fn run_autopilot(seed: u64, ticks: usize) -> SimState {
    let mut state = SimState::new(seed);
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT);
    }
    state
}

proptest! {
    #[test]
    fn progress_stays_in_range(
        steps in prop::collection::vec((any_mode(), 0.0_f32..50.0), 1..200),
        use_ring in any::<bool>(),
    ) {
        let mut segment = if use_ring {
            make_ring_segments().remove(0)
        } else {
            make_wedge_segments().remove(0)
        };
        for (mode, rate) in steps {
            apply_work(&mut segment, mode, rate);
            prop_assert!((0.0..=PROGRESS_MAX).contains(&segment.progress));
        }
    }

    #[test]
    fn heat_saturates(start in 0.0_f32..=100.0, rate in 0.0_f32..1000.0) {
        let next = apply_heat(start, rate);
        prop_assert!(next >= start);
        prop_assert!(next <= PROGRESS_MAX);
    }

    #[test]
    fn movement_stays_contained(
        radius in TRAVEL_INNER_RADIUS..=TRAVEL_OUTER_RADIUS,
        angle in 0.0_f32..360.0,
        dx in -3.0_f32..3.0,
        dy in -3.0_f32..3.0,
        dt in 0.001_f32..0.5,
    ) {
        let actor = Actor { pos: angle_to_point(radius, angle), heading: 0.0 };
        let moved = integrate_movement(actor, Vec2::new(dx, dy), dt);
        let (r, _) = point_to_polar(moved.pos);
        prop_assert!(r >= TRAVEL_INNER_RADIUS - 0.01, "radius {} below travel zone", r);
        prop_assert!(r <= TRAVEL_OUTER_RADIUS + 0.01, "radius {} above travel zone", r);
        prop_assert!(moved.pos.x >= SCREEN_MARGIN && moved.pos.x <= VIEWPORT_WIDTH - SCREEN_MARGIN);
        prop_assert!(moved.pos.y >= SCREEN_MARGIN && moved.pos.y <= VIEWPORT_HEIGHT - SCREEN_MARGIN);
    }

    #[test]
    fn demolish_ends_iff_all_wedges_broken(broken in prop::array::uniform4(any::<bool>())) {
        let mut wedges = make_wedge_segments();
        for (wedge, is_broken) in wedges.iter_mut().zip(broken) {
            if is_broken {
                wedge.progress = 0.0;
                wedge.state = SegmentState::Broken;
            }
        }
        let mut stage = Stage::Demolish { wedges };
        let advanced = stage.try_advance(true);
        prop_assert_eq!(advanced, broken.iter().all(|b| *b));
        let expected = if advanced { StageKind::Clean } else { StageKind::Demolish };
        prop_assert_eq!(stage.kind(), expected);
    }

    #[test]
    fn reset_returns_to_intro(seed in 0_u64..1000, ticks in 0_usize..1500) {
        let mut state = run_autopilot(seed, ticks);
        let reset = TickInput { reset: true, ..TickInput::default() };
        tick(&mut state, &reset, SIM_DT);

        prop_assert_eq!(state.stage.kind(), StageKind::Intro);
        prop_assert!(state.debris.is_empty());
        prop_assert!(state.particles.is_empty());
        prop_assert!(state.notification.is_none());
        prop_assert_eq!(state.actor, Actor::default());
        prop_assert_eq!(state.stats, RunStats::default());
    }

    #[test]
    fn same_seed_same_run(seed in 0_u64..1000, ticks in 1_usize..600) {
        let a = run_autopilot(seed, ticks).snapshot().to_json().unwrap();
        let b = run_autopilot(seed, ticks).snapshot().to_json().unwrap();
        prop_assert_eq!(a, b);
    }
}

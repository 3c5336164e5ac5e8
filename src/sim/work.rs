//! Work application: progress, state changes and byproducts
//!
//! All progress arithmetic saturates into [0, PROGRESS_MAX].

use glam::Vec2;
use rand::Rng;

use super::arc::ArcBand;
use super::segment::{Segment, SegmentState};
use super::stage::SubPhase;
use super::state::{Debris, Particle};
use crate::angle_to_point;
use crate::consts::*;

/// How work is applied to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    Demolish,
    Construct { sub_phase: SubPhase, layer: usize },
}

/// Follow-up the caller must act on after a segment changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkSignal {
    /// A wedge broke; scatter its debris
    SpawnDebris,
    /// Move to the given sub-phase on the same layer
    Advance(SubPhase),
    /// Layer cast; continue with the next one
    NextLayer,
    /// The last layer is cast
    LayersComplete,
}

/// Work rate for this tick: discrete, full multiplier while held and nothing otherwise
#[inline]
pub fn work_rate(action_held: bool) -> f32 {
    if action_held {
        BASE_WORK_RATE * HELD_WORK_MULTIPLIER
    } else {
        0.0
    }
}

/// Apply one tick of work to a segment.
///
/// Wedges lose progress and break at zero. Rings gain progress scaled by the
/// sub-phase and advance state at 100, resetting progress for the next step.
/// Work on a ring whose state does not match the sub-phase is ignored.
pub fn apply_work(segment: &mut Segment, mode: WorkMode, rate: f32) -> Option<WorkSignal> {
    match mode {
        WorkMode::Demolish => {
            segment.progress = (segment.progress - rate).clamp(0.0, PROGRESS_MAX);
            if segment.progress <= 0.0 && segment.state == SegmentState::Intact {
                segment.state = SegmentState::Broken;
                return Some(WorkSignal::SpawnDebris);
            }
            None
        }
        WorkMode::Construct { sub_phase, layer } => {
            if segment.state != sub_phase.precondition() {
                return None;
            }
            segment.progress =
                (segment.progress + rate * sub_phase.rate_factor()).clamp(0.0, PROGRESS_MAX);
            if segment.progress < PROGRESS_MAX {
                return None;
            }
            segment.state = sub_phase.result();
            segment.progress = 0.0;
            Some(match sub_phase.next() {
                Some(next) => WorkSignal::Advance(next),
                None if layer < LAST_LAYER => WorkSignal::NextLayer,
                None => WorkSignal::LayersComplete,
            })
        }
    }
}

/// Raise the global heating scalar by one tick of work
#[inline]
pub fn apply_heat(temperature: f32, rate: f32) -> f32 {
    (temperature + rate * HEAT_RATE_FACTOR).clamp(0.0, PROGRESS_MAX)
}

/// Scatter a broken wedge's debris inside its angular range, near the wall midline.
///
/// IDs are assigned sequentially from `first_id`.
pub fn spawn_debris<R: Rng + ?Sized>(band: &ArcBand, rng: &mut R, first_id: u32) -> Vec<Debris> {
    let mid = band.mid_radius();
    (0..DEBRIS_PER_WEDGE as u32)
        .map(|i| {
            let angle = band.start_deg + rng.random::<f32>() * band.span();
            let radius = mid + rng.random_range(-DEBRIS_SCATTER..=DEBRIS_SCATTER);
            Debris {
                id: first_id + i,
                pos: angle_to_point(radius, angle),
                size: rng.random_range(12.0..28.0),
                rotation: rng.random_range(0.0..360.0),
            }
        })
        .collect()
}

/// Remove all debris within `radius` of `center`, returning how many went
pub fn sweep_debris(debris: &mut Vec<Debris>, center: Vec2, radius: f32) -> usize {
    let before = debris.len();
    debris.retain(|d| d.pos.distance(center) > radius);
    before - debris.len()
}

/// Throw a couple of sparks/dust motes from the tool head
pub fn spawn_work_particles<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    rng: &mut R,
    max_particles: usize,
) {
    if max_particles == 0 {
        return;
    }
    let count = rng.random_range(1..=2);
    for _ in 0..count {
        if particles.len() >= max_particles {
            // Remove oldest particles to make room
            particles.remove(0);
        }
        let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
        let speed: f32 = rng.random_range(40.0..120.0);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: rng.random_range(2.0..6.0),
            life: 1.0,
        });
    }
}

/// Drift particles, fade them by a fixed amount and drop the dead ones
pub fn age_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.95;
        particle.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_to_polar;
    use crate::sim::segment::{make_ring_segments, make_wedge_segments};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wedge_breaks_at_zero() {
        let mut wedge = make_wedge_segments().remove(1);
        wedge.progress = 3.0;
        let signal = apply_work(&mut wedge, WorkMode::Demolish, work_rate(true));
        assert_eq!(signal, Some(WorkSignal::SpawnDebris));
        assert_eq!(wedge.progress, 0.0);
        assert_eq!(wedge.state, SegmentState::Broken);

        // Already broken: no second spawn
        let again = apply_work(&mut wedge, WorkMode::Demolish, work_rate(true));
        assert_eq!(again, None);
        assert_eq!(wedge.progress, 0.0);
    }

    #[test]
    fn test_no_work_without_action() {
        let mut wedge = make_wedge_segments().remove(0);
        assert_eq!(apply_work(&mut wedge, WorkMode::Demolish, work_rate(false)), None);
        assert_eq!(wedge.progress, 100.0);
    }

    #[test]
    fn test_construct_cycle_on_one_ring() {
        let mut ring = make_ring_segments().remove(0);
        let rate = work_rate(true);

        let mut mold_ticks = 0;
        let signal = loop {
            mold_ticks += 1;
            let mode = WorkMode::Construct {
                sub_phase: SubPhase::Mold,
                layer: 0,
            };
            if let Some(s) = apply_work(&mut ring, mode, rate) {
                break s;
            }
        };
        assert_eq!(signal, WorkSignal::Advance(SubPhase::Pour));
        assert_eq!(mold_ticks, 23); // 4.5 per tick
        assert_eq!(ring.state, SegmentState::Molded);
        assert_eq!(ring.progress, 0.0);

        // Wrong sub-phase for this ring state does nothing
        let demold = WorkMode::Construct {
            sub_phase: SubPhase::Demold,
            layer: 0,
        };
        assert_eq!(apply_work(&mut ring, demold, rate), None);
        assert_eq!(ring.progress, 0.0);
    }

    #[test]
    fn test_demold_signals_by_layer() {
        let mut rings = make_ring_segments();
        for (layer, expected) in [(2, WorkSignal::NextLayer), (3, WorkSignal::LayersComplete)] {
            let ring = &mut rings[layer];
            ring.state = SegmentState::Filled;
            ring.progress = 99.0;
            let mode = WorkMode::Construct {
                sub_phase: SubPhase::Demold,
                layer,
            };
            assert_eq!(apply_work(ring, mode, 1.0), Some(expected));
            assert_eq!(ring.state, SegmentState::Concrete);
        }
    }

    #[test]
    fn test_heat_saturates() {
        assert!((apply_heat(10.0, 3.0) - 10.9).abs() < 0.0001);
        assert_eq!(apply_heat(99.9, 3.0), 100.0);
        assert_eq!(apply_heat(50.0, 0.0), 50.0);
    }

    #[test]
    fn test_debris_lands_in_wedge() {
        let mut rng = Pcg32::seed_from_u64(42);
        for wedge in make_wedge_segments() {
            let debris = spawn_debris(&wedge.band, &mut rng, 10);
            assert_eq!(debris.len(), DEBRIS_PER_WEDGE);
            assert_eq!(debris[0].id, 10);
            for d in &debris {
                let (r, angle) = point_to_polar(d.pos);
                assert!((r - WALL_MID_RADIUS).abs() <= DEBRIS_SCATTER + 0.01);
                // Allow a hair of slack at the wedge edges for float rounding
                let inside = wedge.band.contains_angle(angle)
                    || wedge.band.contains_angle(angle + 0.01)
                    || wedge.band.contains_angle(angle - 0.01);
                assert!(inside, "debris at {angle} outside wedge {}", wedge.id);
            }
        }
    }

    #[test]
    fn test_sweep_removes_only_nearby() {
        let mut debris = vec![
            Debris {
                id: 1,
                pos: Vec2::new(0.0, 0.0),
                size: 10.0,
                rotation: 0.0,
            },
            Debris {
                id: 2,
                pos: Vec2::new(500.0, 0.0),
                size: 10.0,
                rotation: 0.0,
            },
        ];
        assert_eq!(sweep_debris(&mut debris, Vec2::new(10.0, 0.0), 50.0), 1);
        assert_eq!(debris[0].id, 2);
    }

    #[test]
    fn test_particles_capped_and_aged_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        for _ in 0..50 {
            spawn_work_particles(&mut particles, Vec2::ZERO, &mut rng, 8);
        }
        assert!(particles.len() <= 8);

        spawn_work_particles(&mut particles, Vec2::ZERO, &mut rng, 0);
        let ticks_to_die = (1.0 / PARTICLE_DECAY).ceil() as usize + 1;
        for _ in 0..ticks_to_die {
            age_particles(&mut particles, SIM_DT);
        }
        assert!(particles.is_empty());
    }
}

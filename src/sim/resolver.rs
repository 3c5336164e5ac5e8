//! Targeting and eligibility
//!
//! Decides, from scratch every tick, what the actor may work on. There is no
//! hysteresis: standing exactly on a tolerance edge can flicker between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::segment::SegmentState;
use super::stage::Stage;
use super::state::Debris;
use super::tools::{Task, ToolId};
use crate::consts::*;
use crate::point_to_polar;

/// What a lock points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// A wedge or ring by id
    Segment(usize),
    /// The whole site (heating has no single segment)
    Site,
}

/// Resolver output for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Spatially selected target, if any
    pub target: Option<Target>,
    /// Whether work may be applied this tick
    pub locked: bool,
}

impl Lock {
    pub const NONE: Lock = Lock {
        target: None,
        locked: false,
    };

    fn on(target: Target, locked: bool) -> Self {
        Self {
            target: Some(target),
            locked,
        }
    }
}

/// Wedge under a bearing: `floor(angle / 90) mod 4`
#[inline]
pub fn wedge_index(angle_deg: f32) -> usize {
    ((angle_deg / WEDGE_SPAN_DEG).floor() as i64).rem_euclid(SEGMENT_COUNT as i64) as usize
}

/// Radial band in which the heater reaches the lining
#[inline]
pub fn heat_band() -> (f32, f32) {
    (
        WALL_INNER_RADIUS - HEAT_BAND_INNER_SLACK,
        WALL_OUTER_RADIUS + HEAT_BAND_OUTER_SLACK,
    )
}

/// Resolve the actor's target for this tick.
///
/// Segment ids that do not exist in the current stage resolve to no target.
pub fn resolve_target(stage: &Stage, tool: ToolId, actor_pos: Vec2, debris: &[Debris]) -> Lock {
    let (radius, angle) = point_to_polar(actor_pos);

    match stage {
        Stage::Intro | Stage::Victory { .. } => Lock::NONE,

        Stage::Demolish { wedges } => {
            if (radius - WALL_MID_RADIUS).abs() > DEMOLISH_RADIAL_TOLERANCE {
                return Lock::NONE;
            }
            let id = wedge_index(angle);
            let Some(wedge) = wedges.get(id) else {
                return Lock::NONE;
            };
            let locked = tool.handles(Task::Demolish) && wedge.state == SegmentState::Intact;
            Lock::on(Target::Segment(id), locked)
        }

        Stage::Clean { .. } => {
            let in_reach = debris
                .iter()
                .any(|d| d.pos.distance(actor_pos) <= CLEAN_LOCK_RADIUS);
            Lock {
                target: None,
                locked: in_reach && tool.handles(Task::Clean),
            }
        }

        Stage::Construct {
            rings,
            layer,
            sub_phase,
        } => {
            let Some(ring) = rings.get(*layer) else {
                return Lock::NONE;
            };
            let in_band =
                (radius - ring.band.mid_radius()).abs() <= CONSTRUCT_RADIAL_TOLERANCE;
            let locked = in_band
                && tool.handles(sub_phase.task())
                && ring.state == sub_phase.precondition();
            Lock::on(Target::Segment(*layer), locked)
        }

        Stage::Heat { .. } => {
            let (inner, outer) = heat_band();
            if tool.handles(Task::Heat) && radius >= inner && radius <= outer {
                Lock::on(Target::Site, true)
            } else {
                Lock::NONE
            }
        }
    }
}

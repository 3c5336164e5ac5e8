//! The relining machine: position, heading and movement containment

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{angle_to_point, compass_degrees, point_to_polar};

/// The controllable work unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Screen position
    pub pos: Vec2,
    /// Facing (compass degrees, 0 = up, clockwise)
    pub heading: f32,
}

impl Default for Actor {
    /// Parked at the staging position, facing the furnace center
    fn default() -> Self {
        Self {
            pos: angle_to_point(STAGING_RADIUS, STAGING_ANGLE_DEG),
            heading: 0.0,
        }
    }
}

impl Actor {
    /// Distance from the site center
    #[inline]
    pub fn radius(&self) -> f32 {
        (self.pos - SITE_CENTER).length()
    }

    /// Bearing from the site center (degrees, [0, 360))
    #[inline]
    pub fn site_angle(&self) -> f32 {
        point_to_polar(self.pos).1
    }
}

/// Advance the actor by one step of input.
///
/// The input vector is not clamped; summed input sources move faster. The
/// candidate position is first pulled back into the travel annulus along its
/// own bearing, then clamped to the viewport margins. Heading only follows
/// input outside the deadzone.
pub fn integrate_movement(actor: Actor, input: Vec2, dt: f32) -> Actor {
    let candidate = actor.pos + input * ACTOR_SPEED * dt;

    // Radial containment
    let rel = candidate - SITE_CENTER;
    let dist = rel.length();
    let contained = if dist > TRAVEL_OUTER_RADIUS {
        SITE_CENTER + rel / dist * TRAVEL_OUTER_RADIUS
    } else if dist < TRAVEL_INNER_RADIUS {
        // Dead center has no bearing; keep the previous one
        let dir = if dist > f32::EPSILON {
            rel / dist
        } else {
            (actor.pos - SITE_CENTER).normalize_or(Vec2::NEG_Y)
        };
        SITE_CENTER + dir * TRAVEL_INNER_RADIUS
    } else {
        candidate
    };

    // Screen box containment
    let pos = Vec2::new(
        contained
            .x
            .clamp(SCREEN_MARGIN, VIEWPORT_WIDTH - SCREEN_MARGIN),
        contained
            .y
            .clamp(SCREEN_MARGIN, VIEWPORT_HEIGHT - SCREEN_MARGIN),
    );

    let heading = if input.length() > MOVE_DEADZONE {
        compass_degrees(input)
    } else {
        actor.heading
    };

    Actor { pos, heading }
}

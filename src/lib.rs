//! Furnace Reline - an annular furnace relining procedure simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stages, segments, targeting, tick driver)
//! - `platform`: Input buffering and the browser bridge
//! - `settings`: Player preferences (particle quality, notification timing)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Viewport the work-site is laid out in (screen space, y grows downward)
    pub const VIEWPORT_WIDTH: f32 = 1600.0;
    pub const VIEWPORT_HEIGHT: f32 = 1200.0;
    /// Actor is kept this far inside every viewport edge
    pub const SCREEN_MARGIN: f32 = 40.0;
    /// Center of the furnace
    pub const SITE_CENTER: Vec2 = Vec2::new(800.0, 600.0);

    /// Refractory wall band (wedges during demolition, rings during construction)
    pub const WALL_INNER_RADIUS: f32 = 300.0;
    pub const WALL_OUTER_RADIUS: f32 = 500.0;
    pub const WALL_MID_RADIUS: f32 = (WALL_INNER_RADIUS + WALL_OUTER_RADIUS) / 2.0;
    /// Wedges during demolition, rings during construction
    pub const SEGMENT_COUNT: usize = 4;
    pub const LAST_LAYER: usize = SEGMENT_COUNT - 1;
    pub const WEDGE_SPAN_DEG: f32 = 360.0 / SEGMENT_COUNT as f32;

    /// Annular zone the actor travels in
    pub const TRAVEL_INNER_RADIUS: f32 = 120.0;
    pub const TRAVEL_OUTER_RADIUS: f32 = 620.0;
    /// Staging position (polar, about the site center)
    pub const STAGING_RADIUS: f32 = 520.0;
    pub const STAGING_ANGLE_DEG: f32 = 180.0;

    /// Actor speed (units per second at unit input)
    pub const ACTOR_SPEED: f32 = 300.0;
    /// Input magnitude below which heading is kept
    pub const MOVE_DEADZONE: f32 = 0.1;

    /// Work rate per tick before the held multiplier
    pub const BASE_WORK_RATE: f32 = 1.0;
    /// Multiplier while the action control is held (discrete, no easing)
    pub const HELD_WORK_MULTIPLIER: f32 = 3.0;
    pub const MOLD_RATE_FACTOR: f32 = 1.5;
    pub const POUR_RATE_FACTOR: f32 = 1.0;
    pub const DEMOLD_RATE_FACTOR: f32 = 2.0;
    pub const HEAT_RATE_FACTOR: f32 = 0.3;
    /// Upper bound for progress and temperature
    pub const PROGRESS_MAX: f32 = 100.0;

    /// Radial slack around the wall midline for demolition
    pub const DEMOLISH_RADIAL_TOLERANCE: f32 = 200.0;
    /// Radial slack around the active ring midline for construction
    pub const CONSTRUCT_RADIAL_TOLERANCE: f32 = 100.0;
    /// Debris within this distance lights the cleanup lock
    pub const CLEAN_LOCK_RADIUS: f32 = 350.0;
    /// Debris within this distance is swept up while the vacuum runs
    pub const CLEAN_PICKUP_RADIUS: f32 = 150.0;
    /// Heating band is the wall band widened by these amounts
    pub const HEAT_BAND_INNER_SLACK: f32 = 20.0;
    pub const HEAT_BAND_OUTER_SLACK: f32 = 80.0;

    /// Debris spawned per broken wedge
    pub const DEBRIS_PER_WEDGE: usize = 6;
    /// Debris lands within this distance of the wall midline
    pub const DEBRIS_SCATTER: f32 = 60.0;

    /// Particle life lost per tick (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.04;

    /// Max simulation steps per frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Pointer drag distance (px) that counts as full-speed movement
    pub const MAX_DRAG_RADIUS: f32 = 60.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Map a polar coordinate about the site center to a screen point.
///
/// 0° points up and angles grow clockwise.
#[inline]
pub fn angle_to_point(radius: f32, angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    consts::SITE_CENTER + Vec2::new(radius * theta.sin(), -radius * theta.cos())
}

/// Convert a screen point to (radius, angle in degrees [0, 360)) about the site center
#[inline]
pub fn point_to_polar(point: Vec2) -> (f32, f32) {
    let rel = point - consts::SITE_CENTER;
    (rel.length(), compass_degrees(rel))
}

/// Compass bearing of a screen-space direction (0° = up, clockwise)
#[inline]
pub fn compass_degrees(dir: Vec2) -> f32 {
    normalize_degrees(dir.x.atan2(-dir.y).to_degrees())
}

//! Deterministic simulation module
//!
//! All procedure logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (segments by id, debris by spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod arc;
pub mod autopilot;
pub mod resolver;
pub mod segment;
pub mod snapshot;
pub mod stage;
pub mod state;
pub mod tick;
pub mod tools;
pub mod work;

pub use actor::{Actor, integrate_movement};
pub use arc::{ArcBand, PathCommand, SectorPath, describe_annular_sector};
pub use resolver::{Lock, Target, resolve_target};
pub use segment::{Segment, SegmentKind, SegmentState, make_ring_segments, make_wedge_segments};
pub use snapshot::Snapshot;
pub use stage::{Stage, StageKind, SubPhase};
pub use state::{Debris, Notification, Particle, RunStats, SimState};
pub use tick::{TickInput, tick};
pub use tools::{TOOLS, Task, ToolDef, ToolId};

//! Read-only view of the world published after every tick
//!
//! Renderers and HUDs consume this; nothing in the simulation reads it back.

use serde::Serialize;

use super::actor::Actor;
use super::arc::SectorPath;
use super::resolver::Lock;
use super::segment::Segment;
use super::stage::{StageKind, SubPhase};
use super::state::{Debris, Particle, RunStats, SimState};
use super::tools::ToolId;

/// Everything an observer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub stage: StageKind,
    pub sub_phase: Option<SubPhase>,
    pub layer: Option<usize>,
    pub segments: Vec<Segment>,
    pub actor: Actor,
    pub debris: Vec<Debris>,
    pub particles: Vec<Particle>,
    /// Global heating scalar (0-100)
    pub temperature: f32,
    pub notification: Option<String>,
    pub tool: ToolId,
    /// Derived from the stage, never stored
    pub suggested_tool: Option<ToolId>,
    pub lock: Lock,
    pub stats: RunStats,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Outline of a segment by id, if it exists in this frame
    pub fn segment_path(&self, id: usize) -> Option<SectorPath> {
        self.segments.get(id).map(Segment::outline)
    }
}

impl SimState {
    /// Capture the externally observable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage.kind(),
            sub_phase: self.stage.sub_phase(),
            layer: self.stage.layer(),
            segments: self.stage.segments().to_vec(),
            actor: self.actor,
            debris: self.debris.clone(),
            particles: self.particles.clone(),
            temperature: self.stage.temperature(),
            notification: self.notification.as_ref().map(|n| n.text.clone()),
            tool: self.tool,
            suggested_tool: self.suggested_tool(),
            lock: self.lock,
            stats: self.stats,
        }
    }
}

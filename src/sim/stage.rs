//! Procedure stages
//!
//! The stage is a tagged union: each variant owns exactly the data that is
//! meaningful while it is active. Automatic transitions are predicates on that
//! payload, checked once per tick.

use serde::{Deserialize, Serialize};

use super::segment::{Segment, SegmentState, make_ring_segments, make_wedge_segments};
use super::tools::Task;
use crate::consts::*;

/// Flat stage tag for observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    Intro,
    Demolish,
    Clean,
    Construct,
    Heat,
    Victory,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Intro => "Intro",
            StageKind::Demolish => "Demolish",
            StageKind::Clean => "Clean",
            StageKind::Construct => "Construct",
            StageKind::Heat => "Heat",
            StageKind::Victory => "Victory",
        }
    }

    /// Intro and Victory accept no work
    pub fn is_interactive(&self) -> bool {
        !matches!(self, StageKind::Intro | StageKind::Victory)
    }
}

/// Construction cycle applied once per layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubPhase {
    Mold,
    Pour,
    Demold,
}

impl SubPhase {
    pub fn task(self) -> Task {
        match self {
            SubPhase::Mold => Task::Mold,
            SubPhase::Pour => Task::Pour,
            SubPhase::Demold => Task::Demold,
        }
    }

    /// Ring state this step works on
    pub fn precondition(self) -> SegmentState {
        match self {
            SubPhase::Mold => SegmentState::Empty,
            SubPhase::Pour => SegmentState::Molded,
            SubPhase::Demold => SegmentState::Filled,
        }
    }

    /// Ring state once this step completes
    pub fn result(self) -> SegmentState {
        match self {
            SubPhase::Mold => SegmentState::Molded,
            SubPhase::Pour => SegmentState::Filled,
            SubPhase::Demold => SegmentState::Concrete,
        }
    }

    /// Following step within the same layer
    pub fn next(self) -> Option<SubPhase> {
        match self {
            SubPhase::Mold => Some(SubPhase::Pour),
            SubPhase::Pour => Some(SubPhase::Demold),
            SubPhase::Demold => None,
        }
    }

    /// Progress gained per unit of work rate
    pub fn rate_factor(self) -> f32 {
        match self {
            SubPhase::Mold => MOLD_RATE_FACTOR,
            SubPhase::Pour => POUR_RATE_FACTOR,
            SubPhase::Demold => DEMOLD_RATE_FACTOR,
        }
    }
}

/// Current stage with its stage-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Waiting for the start command
    Intro,
    /// Breaking out the worn lining
    Demolish { wedges: Vec<Segment> },
    /// Removing debris; the broken wedges stay for rendering
    Clean { wedges: Vec<Segment> },
    /// Casting the new lining layer by layer, inner first
    Construct {
        rings: Vec<Segment>,
        layer: usize,
        sub_phase: SubPhase,
    },
    /// Curing the finished lining
    Heat {
        rings: Vec<Segment>,
        temperature: f32,
    },
    /// Done
    Victory { rings: Vec<Segment> },
}

impl Stage {
    /// Fresh demolition stage with four intact wedges
    pub fn demolish() -> Self {
        Stage::Demolish {
            wedges: make_wedge_segments(),
        }
    }

    /// Fresh construction stage at layer 0, molding
    pub fn construct() -> Self {
        Stage::Construct {
            rings: make_ring_segments(),
            layer: 0,
            sub_phase: SubPhase::Mold,
        }
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Intro => StageKind::Intro,
            Stage::Demolish { .. } => StageKind::Demolish,
            Stage::Clean { .. } => StageKind::Clean,
            Stage::Construct { .. } => StageKind::Construct,
            Stage::Heat { .. } => StageKind::Heat,
            Stage::Victory { .. } => StageKind::Victory,
        }
    }

    /// Segments currently on site (empty during Intro)
    pub fn segments(&self) -> &[Segment] {
        match self {
            Stage::Intro => &[],
            Stage::Demolish { wedges } | Stage::Clean { wedges } => wedges,
            Stage::Construct { rings, .. } | Stage::Heat { rings, .. } | Stage::Victory { rings } => {
                rings
            }
        }
    }

    pub fn sub_phase(&self) -> Option<SubPhase> {
        match self {
            Stage::Construct { sub_phase, .. } => Some(*sub_phase),
            _ => None,
        }
    }

    pub fn layer(&self) -> Option<usize> {
        match self {
            Stage::Construct { layer, .. } => Some(*layer),
            _ => None,
        }
    }

    /// Global heating scalar: 0 before curing, 100 once cured
    pub fn temperature(&self) -> f32 {
        match self {
            Stage::Heat { temperature, .. } => *temperature,
            Stage::Victory { .. } => PROGRESS_MAX,
            _ => 0.0,
        }
    }

    /// What the player is expected to do now
    pub fn current_task(&self) -> Option<Task> {
        match self {
            Stage::Intro | Stage::Victory { .. } => None,
            Stage::Demolish { .. } => Some(Task::Demolish),
            Stage::Clean { .. } => Some(Task::Clean),
            Stage::Construct { sub_phase, .. } => Some(sub_phase.task()),
            Stage::Heat { .. } => Some(Task::Heat),
        }
    }

    /// Take the next automatic transition if its predicate holds.
    ///
    /// At most one transition per call. Returns true when the stage changed.
    pub fn try_advance(&mut self, debris_empty: bool) -> bool {
        let next = match self {
            Stage::Demolish { wedges } if all_wedges_broken(wedges.as_slice()) => Stage::Clean {
                wedges: std::mem::take(wedges),
            },
            Stage::Clean { wedges } if debris_empty && !wedges.is_empty() => Stage::construct(),
            Stage::Construct { rings, .. } if all_rings_concrete(rings.as_slice()) => Stage::Heat {
                rings: std::mem::take(rings),
                temperature: 0.0,
            },
            Stage::Heat { rings, temperature } if *temperature >= PROGRESS_MAX => Stage::Victory {
                rings: std::mem::take(rings),
            },
            _ => return false,
        };
        *self = next;
        true
    }
}

/// True only when all four wedges exist and are broken
pub fn all_wedges_broken(wedges: &[Segment]) -> bool {
    wedges.len() == SEGMENT_COUNT && wedges.iter().all(Segment::is_broken)
}

/// True only when all four rings exist and are cast
pub fn all_rings_concrete(rings: &[Segment]) -> bool {
    rings.len() == SEGMENT_COUNT && rings.iter().all(Segment::is_concrete)
}

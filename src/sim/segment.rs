//! Work segments: demolition wedges and construction rings

use serde::{Deserialize, Serialize};

use super::arc::{ArcBand, SectorPath, describe_annular_sector};
use crate::consts::*;

/// Whether a segment is an angular wedge or a concentric ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Wedge,
    Ring,
}

/// Discrete segment state
///
/// Wedges go `Intact -> Broken`; rings go `Empty -> Molded -> Filled -> Concrete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentState {
    Intact,
    Broken,
    Empty,
    Molded,
    Filled,
    Concrete,
}

/// A single work target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Wedge index 0-3 (clockwise from north) or ring layer 0-3 (inner to outer)
    pub id: usize,
    pub kind: SegmentKind,
    pub band: ArcBand,
    /// 0-100. Wedges start at 100 (undamaged) and wear down; rings fill up per step.
    pub progress: f32,
    pub state: SegmentState,
}

impl Segment {
    pub fn is_broken(&self) -> bool {
        self.state == SegmentState::Broken
    }

    pub fn is_concrete(&self) -> bool {
        self.state == SegmentState::Concrete
    }

    /// Drawable outline of this segment's band
    pub fn outline(&self) -> SectorPath {
        describe_annular_sector(
            self.band.inner_radius,
            self.band.outer_radius,
            self.band.start_deg,
            self.band.end_deg,
        )
    }
}

/// Four 90° wedges of the worn lining, all intact
pub fn make_wedge_segments() -> Vec<Segment> {
    (0..SEGMENT_COUNT)
        .map(|id| {
            let start = id as f32 * WEDGE_SPAN_DEG;
            Segment {
                id,
                kind: SegmentKind::Wedge,
                band: ArcBand::new(
                    WALL_INNER_RADIUS,
                    WALL_OUTER_RADIUS,
                    start,
                    start + WEDGE_SPAN_DEG,
                ),
                progress: PROGRESS_MAX,
                state: SegmentState::Intact,
            }
        })
        .collect()
}

/// Four concentric rings splitting the wall band evenly, inner first, all empty
pub fn make_ring_segments() -> Vec<Segment> {
    let thickness = (WALL_OUTER_RADIUS - WALL_INNER_RADIUS) / SEGMENT_COUNT as f32;
    (0..SEGMENT_COUNT)
        .map(|id| {
            let inner = WALL_INNER_RADIUS + id as f32 * thickness;
            Segment {
                id,
                kind: SegmentKind::Ring,
                band: ArcBand::ring(inner, inner + thickness),
                progress: 0.0,
                state: SegmentState::Empty,
            }
        })
        .collect()
}

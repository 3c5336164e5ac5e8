//! Annular band geometry for wedges and rings
//!
//! A band is defined in polar space about the site center by:
//! - inner_radius / outer_radius: radial extent
//! - start_deg / end_deg: angular extent (compass degrees, clockwise)
//!
//! A span of (almost) 360° is a full ring. Both the resolver's angle tests and
//! the sector path generator use the same threshold for that.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{angle_to_point, normalize_degrees, point_to_polar};

/// Spans at least this wide are treated as a full circle
pub const FULL_CIRCLE_EPSILON: f32 = 0.01;

/// A radial band with an angular extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcBand {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Start angle (degrees)
    pub start_deg: f32,
    /// End angle (degrees, start + span, not normalized)
    pub end_deg: f32,
}

impl ArcBand {
    pub fn new(inner_radius: f32, outer_radius: f32, start_deg: f32, end_deg: f32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            start_deg,
            end_deg,
        }
    }

    /// A full 360° ring
    pub fn ring(inner_radius: f32, outer_radius: f32) -> Self {
        Self::new(inner_radius, outer_radius, 0.0, 360.0)
    }

    /// Radius halfway through the band
    #[inline]
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Angular span in degrees
    #[inline]
    pub fn span(&self) -> f32 {
        self.end_deg - self.start_deg
    }

    /// Angle halfway through the span
    pub fn mid_angle(&self) -> f32 {
        normalize_degrees(self.start_deg + self.span() / 2.0)
    }

    #[inline]
    pub fn is_full_ring(&self) -> bool {
        self.span() >= 360.0 - FULL_CIRCLE_EPSILON
    }

    /// Check if an angle is within the band's angular extent (start inclusive, end exclusive)
    pub fn contains_angle(&self, angle_deg: f32) -> bool {
        if self.is_full_ring() {
            return true;
        }
        let offset = normalize_degrees(angle_deg - self.start_deg);
        offset < self.span()
    }

    /// Check if a screen point lies inside the band
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (r, angle) = point_to_polar(point);
        r >= self.inner_radius && r <= self.outer_radius && self.contains_angle(angle)
    }
}

/// One drawing command of a sector outline (SVG path semantics)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Circular arc to `to`. `clockwise` is the on-screen sweep direction.
    ArcTo {
        radius: f32,
        large_arc: bool,
        clockwise: bool,
        to: Vec2,
    },
    Close,
}

/// Outline of a wedge or ring, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPath {
    pub commands: Vec<PathCommand>,
    /// Ring outlines are two closed circles and should be filled even-odd
    pub even_odd: bool,
}

impl SectorPath {
    /// Render as an SVG path `d` attribute
    pub fn to_svg(&self) -> String {
        let mut parts = Vec::with_capacity(self.commands.len());
        for cmd in &self.commands {
            parts.push(match *cmd {
                PathCommand::MoveTo(p) => format!("M {:.2} {:.2}", p.x, p.y),
                PathCommand::LineTo(p) => format!("L {:.2} {:.2}", p.x, p.y),
                PathCommand::ArcTo {
                    radius,
                    large_arc,
                    clockwise,
                    to,
                } => format!(
                    "A {radius:.2} {radius:.2} 0 {} {} {:.2} {:.2}",
                    u8::from(large_arc),
                    u8::from(clockwise),
                    to.x,
                    to.y
                ),
                PathCommand::Close => "Z".to_string(),
            });
        }
        parts.join(" ")
    }
}

/// Build the outline of an annular sector.
///
/// Full-circle spans become two concentric circles, each drawn as two half arcs
/// (a single arc whose end equals its start has zero sweep and renders nothing).
pub fn describe_annular_sector(
    inner_radius: f32,
    outer_radius: f32,
    start_deg: f32,
    end_deg: f32,
) -> SectorPath {
    let band = ArcBand::new(inner_radius, outer_radius, start_deg, end_deg);

    if band.is_full_ring() {
        let mut commands = Vec::with_capacity(8);
        for radius in [outer_radius, inner_radius] {
            let top = angle_to_point(radius, 0.0);
            let bottom = angle_to_point(radius, 180.0);
            commands.push(PathCommand::MoveTo(top));
            commands.push(PathCommand::ArcTo {
                radius,
                large_arc: false,
                clockwise: true,
                to: bottom,
            });
            commands.push(PathCommand::ArcTo {
                radius,
                large_arc: false,
                clockwise: true,
                to: top,
            });
            commands.push(PathCommand::Close);
        }
        return SectorPath {
            commands,
            even_odd: true,
        };
    }

    let large_arc = band.span() > 180.0;
    let outer_start = angle_to_point(outer_radius, start_deg);
    let outer_end = angle_to_point(outer_radius, end_deg);
    let inner_end = angle_to_point(inner_radius, end_deg);
    let inner_start = angle_to_point(inner_radius, start_deg);

    SectorPath {
        commands: vec![
            PathCommand::MoveTo(outer_start),
            PathCommand::ArcTo {
                radius: outer_radius,
                large_arc,
                clockwise: true,
                to: outer_end,
            },
            PathCommand::LineTo(inner_end),
            PathCommand::ArcTo {
                radius: inner_radius,
                large_arc,
                clockwise: false,
                to: inner_start,
            },
            PathCommand::Close,
        ],
        even_odd: false,
    }
}

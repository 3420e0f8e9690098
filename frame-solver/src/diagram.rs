//! Diagram data for plotting results over the frame geometry
//!
//! The crate does not render anything. A [`Diagram`] carries, per member, the
//! sampled series, an auto scale factor and the plotted outline in global
//! coordinates, ready to be handed to a plotting surface.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::results::{FrameSolution, MemberResult};
use crate::topology::Member;

/// Result kinds that can be drawn, one per display tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultKind {
    Displacements,
    NormalForce,
    ShearForce,
    Moment,
}

impl ResultKind {
    pub const ALL: [ResultKind; 4] = [
        Self::Displacements,
        Self::NormalForce,
        Self::ShearForce,
        Self::Moment,
    ];

    /// Diagram title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Displacements => "Displacements",
            Self::NormalForce => "Normal force",
            Self::ShearForce => "Shear force",
            Self::Moment => "Moment",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Displacements => "Displacements",
            Self::NormalForce => "Normal forces",
            Self::ShearForce => "Shear forces",
            Self::Moment => "Moments",
        }
    }

    /// Largest plotted value as a fraction of the frame size
    pub fn default_ratio(&self) -> f64 {
        match self {
            Self::Displacements => 0.1,
            _ => 0.2,
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Plotted data of one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDiagram {
    pub member: Member,
    /// Undeformed i-end
    pub start: [f64; 2],
    /// Undeformed j-end
    pub end: [f64; 2],
    /// Sampled values at each station
    pub values: Vec<f64>,
    /// Scaled curve in global coordinates, one point per station
    pub outline: Vec<[f64; 2]>,
}

/// One result kind drawn over the whole frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub kind: ResultKind,
    /// Factor from result units to length units, `None` if nothing to draw
    pub scale_factor: Option<f64>,
    pub members: Vec<MemberDiagram>,
}

impl Diagram {
    /// Build a diagram using the kind's default ratio
    pub fn new(solution: &FrameSolution, kind: ResultKind) -> Self {
        Self::with_ratio(solution, kind, kind.default_ratio())
    }

    /// Build a diagram whose largest value spans `ratio` of the frame size
    pub fn with_ratio(solution: &FrameSolution, kind: ResultKind, ratio: f64) -> Self {
        let scale_factor = scale_factor(solution, kind, ratio);
        let s = scale_factor.unwrap_or(0.0);

        let members = solution
            .members
            .iter()
            .map(|result| MemberDiagram {
                member: result.member,
                start: result.start,
                end: result.end,
                values: result.series(kind),
                outline: outline(result, kind, s),
            })
            .collect();

        Self {
            kind,
            scale_factor,
            members,
        }
    }

    /// Diagram of one member
    pub fn member(&self, member: Member) -> Option<&MemberDiagram> {
        self.members.iter().find(|d| d.member == member)
    }
}

/// Bounding box `[min_x, min_y, max_x, max_y]` of the undeformed frame
pub fn bounding_box(solution: &FrameSolution) -> [f64; 4] {
    let mut bbox = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
    for result in &solution.members {
        for [x, y] in [result.start, result.end] {
            bbox[0] = bbox[0].min(x);
            bbox[1] = bbox[1].min(y);
            bbox[2] = bbox[2].max(x);
            bbox[3] = bbox[3].max(y);
        }
    }
    bbox
}

/// Auto scale factor: `ratio * max(bbox width, bbox height) / max|value|`
///
/// For displacements both the axial and transverse components count.
pub fn scale_factor(solution: &FrameSolution, kind: ResultKind, ratio: f64) -> Option<f64> {
    let max_value = solution
        .members
        .iter()
        .map(|result| match kind {
            ResultKind::Displacements => result
                .samples
                .iter()
                .fold(0.0_f64, |acc, s| {
                    acc.max(s.axial_displacement.abs())
                        .max(s.transverse_displacement.abs())
                }),
            _ => result.max_abs(kind),
        })
        .fold(0.0_f64, f64::max);

    if max_value == 0.0 {
        return None;
    }

    let [min_x, min_y, max_x, max_y] = bounding_box(solution);
    let size = (max_x - min_x).max(max_y - min_y);
    Some(ratio * size / max_value)
}

fn outline(result: &MemberResult, kind: ResultKind, s: f64) -> Vec<[f64; 2]> {
    let l = result.length();
    let n = [
        (result.end[0] - result.start[0]) / l,
        (result.end[1] - result.start[1]) / l,
    ];
    let normal = [-n[1], n[0]];

    result
        .samples
        .iter()
        .map(|sample| {
            let base = [
                result.start[0] + sample.x * n[0],
                result.start[1] + sample.x * n[1],
            ];
            // (axial, transverse) offset in the member's local system
            let (along, across) = match kind {
                ResultKind::Displacements => {
                    (sample.axial_displacement, sample.transverse_displacement)
                }
                ResultKind::NormalForce => (0.0, sample.normal),
                ResultKind::ShearForce => (0.0, sample.shear),
                ResultKind::Moment => (0.0, sample.moment),
            };
            [
                base[0] + s * (along * n[0] + across * normal[0]),
                base[1] + s * (along * n[1] + across * normal[1]),
            ]
        })
        .collect()
}

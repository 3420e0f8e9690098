//! Result types for frame analysis

use serde::{Deserialize, Serialize};

use crate::diagram::ResultKind;
use crate::elements::{BeamSection, SectionSample};
use crate::topology::{Member, DOFS_PER_NODE, DOF_COUNT, MEMBER_COUNT, NODE_COUNT};

/// Reaction force at a constrained DOF
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    /// 1-based global DOF number
    pub dof: usize,
    /// Reaction force (or moment for rotational DOFs)
    pub force: f64,
}

/// Results for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberResult {
    /// Which member
    pub member: Member,
    /// i-end coordinates
    pub start: [f64; 2],
    /// j-end coordinates
    pub end: [f64; 2],
    /// Section used in the analysis
    pub section: BeamSection,
    /// Uniform transverse load used in the analysis
    pub load: f64,
    /// End displacements in global coordinates [ux_i, uy_i, rz_i, ux_j, uy_j, rz_j]
    pub displacements: [f64; 6],
    /// Section forces and displacements at equally spaced stations
    pub samples: Vec<SectionSample>,
}

impl MemberResult {
    /// Member length
    pub fn length(&self) -> f64 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Station positions along the member
    pub fn stations(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    /// Sampled values of one result kind
    ///
    /// For [`ResultKind::Displacements`] this is the transverse displacement.
    pub fn series(&self, kind: ResultKind) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| match kind {
                ResultKind::Displacements => s.transverse_displacement,
                ResultKind::NormalForce => s.normal,
                ResultKind::ShearForce => s.shear,
                ResultKind::Moment => s.moment,
            })
            .collect()
    }

    /// Axial displacement at each station
    pub fn axial_displacements(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.axial_displacement).collect()
    }

    /// Largest absolute value of a result kind along the member
    pub fn max_abs(&self, kind: ResultKind) -> f64 {
        self.series(kind).into_iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// Complete solution of one frame analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSolution {
    /// Global displacement vector, DOF order
    pub displacements: [f64; DOF_COUNT],
    /// Reactions at the constrained DOFs, ascending DOF order
    pub reactions: Vec<SupportReaction>,
    /// Per-member results, connectivity-table order
    pub members: [MemberResult; MEMBER_COUNT],
}

impl FrameSolution {
    /// Displacement of a DOF (1-based), `None` outside `1..=12`
    pub fn displacement(&self, dof: usize) -> Option<f64> {
        let index = dof.checked_sub(1)?;
        self.displacements.get(index).copied()
    }

    /// Displacement of a node (1-based) as [ux, uy, rz], `None` outside `1..=4`
    pub fn node_displacement(&self, node: usize) -> Option<[f64; 3]> {
        if !(1..=NODE_COUNT).contains(&node) {
            return None;
        }
        let base = (node - 1) * DOFS_PER_NODE;
        Some([
            self.displacements[base],
            self.displacements[base + 1],
            self.displacements[base + 2],
        ])
    }

    /// Reaction at a DOF, `None` if the DOF is free
    pub fn reaction(&self, dof: usize) -> Option<f64> {
        self.reactions
            .iter()
            .find(|r| r.dof == dof)
            .map(|r| r.force)
    }

    /// Results of one member
    pub fn member(&self, member: Member) -> &MemberResult {
        &self.members[member.index()]
    }

    /// Summary of extreme values
    pub fn summary(&self) -> SolutionSummary {
        let mut summary = SolutionSummary {
            total_dofs: DOF_COUNT,
            free_dofs: DOF_COUNT - self.reactions.len(),
            ..Default::default()
        };

        for (index, node) in self.displacements.chunks_exact(DOFS_PER_NODE).enumerate() {
            let (ux, uy) = (node[0], node[1]);
            let mag = (ux.powi(2) + uy.powi(2)).sqrt();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_node = index + 1;
            }
        }

        for result in &self.members {
            let normal = result.max_abs(ResultKind::NormalForce);
            if normal > summary.max_normal {
                summary.max_normal = normal;
                summary.max_normal_member = Some(result.member);
            }

            let shear = result.max_abs(ResultKind::ShearForce);
            if shear > summary.max_shear {
                summary.max_shear = shear;
                summary.max_shear_member = Some(result.member);
            }

            let moment = result.max_abs(ResultKind::Moment);
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = Some(result.member);
            }
        }

        summary
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionSummary {
    /// Maximum nodal translation
    pub max_displacement: f64,
    /// Node with maximum translation (0 if nothing moved)
    pub max_disp_node: usize,
    /// Maximum absolute normal force
    pub max_normal: f64,
    /// Member with maximum normal force
    pub max_normal_member: Option<Member>,
    /// Maximum absolute shear force
    pub max_shear: f64,
    /// Member with maximum shear force
    pub max_shear_member: Option<Member>,
    /// Maximum absolute moment
    pub max_moment: f64,
    /// Member with maximum moment
    pub max_moment_member: Option<Member>,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
}

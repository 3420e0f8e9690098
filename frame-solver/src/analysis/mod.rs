//! Linear static analysis of the frame

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::elements::{BeamElement, BeamSection};
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat, Vec as FEVec};
use crate::parameters::FrameParameters;
use crate::results::{FrameSolution, MemberResult, SupportReaction};
use crate::topology::{dof_index, Member, SupportCondition, DOF_COUNT, POINT_LOAD_DOF};

/// Default number of stations sampled along each member
pub const DEFAULT_SAMPLE_POINTS: usize = 21;

/// Options for the frame analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Support condition at the column feet
    pub supports: SupportCondition,
    /// Stations per member for section recovery, including both ends
    pub sample_points: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            supports: SupportCondition::FixedPinned,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }
}

impl AnalysisOptions {
    /// First-order analysis with the reference supports
    pub fn linear() -> Self {
        Self::default()
    }

    /// Set the support condition
    pub fn with_supports(mut self, supports: SupportCondition) -> Self {
        self.supports = supports;
        self
    }

    /// Set the number of stations per member (minimum 2)
    pub fn with_sample_points(mut self, sample_points: usize) -> Self {
        self.sample_points = sample_points.max(2);
        self
    }
}

/// Build the beam element of a member from the frame parameters
pub fn member_element(member: Member, params: &FrameParameters) -> BeamElement {
    let (start, end) = member.end_points(params);
    let (a, i) = member.section_properties(params);
    BeamElement::new(
        start,
        end,
        BeamSection::new(params.e, a, i),
        member.distributed_load(params),
    )
}

/// Solve the frame for the given parameters
///
/// Every call builds the global system from scratch and returns a fresh
/// solution; the parameters are not modified.
pub fn solve(params: &FrameParameters, options: &AnalysisOptions) -> FrameResult<FrameSolution> {
    let elements = Member::ALL.map(|member| member_element(member, params));

    for (member, element) in Member::ALL.iter().zip(&elements) {
        let length = element.length();
        if length.is_nan() || length <= 1e-12 {
            warn!("{member} has zero length (w = {}, h = {})", params.w, params.h);
            return Err(FrameError::SingularSystem(format!(
                "{member} has zero length"
            )));
        }
    }

    // Assemble global stiffness matrix and load vector
    let mut k_global = Mat::zeros(DOF_COUNT, DOF_COUNT);
    let mut f_global = FEVec::zeros(DOF_COUNT);
    f_global[dof_index(POINT_LOAD_DOF)] = params.f1;

    for (member, element) in Member::ALL.iter().zip(&elements) {
        let ke = element.global_stiffness();
        let fe = element.global_equivalent_loads();
        math::assemble(&member.dofs(), &mut k_global, &ke, &mut f_global, &fe);
        debug!("assembled {member}: L = {:.4}, q = {}", element.length(), element.load[1]);
    }

    // Solve with supports
    let free = options.supports.free_dofs();
    let (a, r) = math::solve_constrained(&k_global, &f_global, &free).inspect_err(|err| {
        warn!("frame solve failed: {err}");
    })?;
    debug!("solved {} free DOFs", free.len());

    let constrained = options.supports.constrained_dofs();
    let reactions = constrained
        .iter()
        .map(|&dof| SupportReaction {
            dof,
            force: r[dof_index(dof)],
        })
        .collect();

    let mut displacements = [0.0; DOF_COUNT];
    displacements.copy_from_slice(a.as_slice());

    // Recover section forces along each member
    let [left, right, beam] = elements;
    let members = [
        recover_member(Member::LeftColumn, &left, &a, options.sample_points)?,
        recover_member(Member::RightColumn, &right, &a, options.sample_points)?,
        recover_member(Member::Beam, &beam, &a, options.sample_points)?,
    ];

    info!(
        "frame solved ({:?}): max |u| = {:.4e}",
        options.supports,
        a.amax()
    );

    Ok(FrameSolution {
        displacements,
        reactions,
        members,
    })
}

/// Sample section forces and displacements of one solved member
fn recover_member(
    member: Member,
    element: &BeamElement,
    a: &FEVec,
    sample_points: usize,
) -> FrameResult<MemberResult> {
    let ed = math::extract(&member.dofs(), a);
    let samples = element.section_forces(&ed, sample_points);

    let finite = samples.iter().all(|s| {
        [s.normal, s.shear, s.moment, s.axial_displacement, s.transverse_displacement]
            .iter()
            .all(|v| v.is_finite())
    });
    if !finite {
        warn!("{member} produced non-finite section results");
        return Err(FrameError::SingularSystem(format!(
            "{member} has zero axial or bending stiffness under load"
        )));
    }
    debug!("recovered {} stations on {member}", samples.len());

    let mut displacements = [0.0; 6];
    displacements.copy_from_slice(ed.as_slice());

    Ok(MemberResult {
        member,
        start: element.start,
        end: element.end,
        section: element.section,
        load: element.load[1],
        displacements,
        samples,
    })
}

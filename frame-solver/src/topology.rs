//! Fixed frame topology - nodes, members, DOF numbering and supports
//!
//! ```text
//!   node 2 ---- member 3 ---- node 3
//!     |                         |
//!  member 1                 member 2
//!     |                         |
//!   node 1                    node 4
//!  (fixed)                (fixed or pinned)
//! ```
//!
//! Node `k` owns the global DOFs `3k-2`, `3k-1` and `3k` (x, y, rotation).
//! DOF numbers in this module are 1-based.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameters::FrameParameters;

/// Number of nodes in the frame
pub const NODE_COUNT: usize = 4;
/// Number of members in the frame
pub const MEMBER_COUNT: usize = 3;
/// DOFs per node (two translations and a rotation)
pub const DOFS_PER_NODE: usize = 3;
/// Total number of global DOFs
pub const DOF_COUNT: usize = NODE_COUNT * DOFS_PER_NODE;

/// Global DOF numbers of each member, i-end first
pub const MEMBER_DOFS: [[usize; 6]; MEMBER_COUNT] = [
    [4, 5, 6, 1, 2, 3],
    [7, 8, 9, 10, 11, 12],
    [4, 5, 6, 7, 8, 9],
];

/// DOF receiving the concentrated horizontal load `f1`
pub const POINT_LOAD_DOF: usize = 4;

/// Convert a 1-based DOF number into a vector index
///
/// Only valid for DOF numbers taken from the tables above (1 to [`DOF_COUNT`]).
pub(crate) const fn dof_index(dof: usize) -> usize {
    dof - 1
}

/// Section property group a member belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionGroup {
    /// Uses `A1`/`I1`
    Column,
    /// Uses `A2`/`I2`
    Beam,
}

/// The three members of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Member {
    LeftColumn,
    RightColumn,
    Beam,
}

impl Member {
    /// Every member, in connectivity-table order
    pub const ALL: [Member; MEMBER_COUNT] = [Self::LeftColumn, Self::RightColumn, Self::Beam];

    /// Row of this member in [`MEMBER_DOFS`]
    pub fn index(&self) -> usize {
        match self {
            Self::LeftColumn => 0,
            Self::RightColumn => 1,
            Self::Beam => 2,
        }
    }

    /// 1-based member number
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeftColumn => "left column",
            Self::RightColumn => "right column",
            Self::Beam => "beam",
        }
    }

    /// Global DOF numbers, i-end first
    pub fn dofs(&self) -> [usize; 6] {
        MEMBER_DOFS[self.index()]
    }

    /// End nodes `(i, j)` as 1-based node numbers
    pub fn nodes(&self) -> (usize, usize) {
        let dofs = self.dofs();
        (dofs[0].div_ceil(DOFS_PER_NODE), dofs[3].div_ceil(DOFS_PER_NODE))
    }

    /// Section property group
    pub fn section_group(&self) -> SectionGroup {
        match self {
            Self::LeftColumn | Self::RightColumn => SectionGroup::Column,
            Self::Beam => SectionGroup::Beam,
        }
    }

    /// Uniform transverse load acting on this member
    pub fn distributed_load(&self, params: &FrameParameters) -> f64 {
        match self {
            Self::LeftColumn => params.q1,
            Self::RightColumn => params.q2,
            Self::Beam => params.q3,
        }
    }

    /// Area and second moment of area `(A, I)` for this member
    pub fn section_properties(&self, params: &FrameParameters) -> (f64, f64) {
        match self.section_group() {
            SectionGroup::Column => (params.a1, params.i1),
            SectionGroup::Beam => (params.a2, params.i2),
        }
    }

    /// End coordinates `(start, end)` derived from the frame geometry
    pub fn end_points(&self, params: &FrameParameters) -> ([f64; 2], [f64; 2]) {
        let nodes = node_coordinates(params);
        let (i, j) = self.nodes();
        (nodes[i - 1], nodes[j - 1])
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member {} ({})", self.number(), self.name())
    }
}

/// Coordinates of nodes 1-4 for the given bay width and column height
pub fn node_coordinates(params: &FrameParameters) -> [[f64; 2]; NODE_COUNT] {
    let (w, h) = (params.w, params.h);
    [[0.0, 0.0], [0.0, h], [w, h], [w, 0.0]]
}

/// Support condition at the column feet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportCondition {
    /// Node 1 fully fixed, node 4 restrained in translation only
    #[default]
    FixedPinned,
    /// Both column feet fully fixed
    FixedFixed,
}

impl SupportCondition {
    /// Constrained DOF numbers in ascending order
    pub fn constrained_dofs(&self) -> &'static [usize] {
        match self {
            Self::FixedPinned => &[1, 2, 3, 10, 11],
            Self::FixedFixed => &[1, 2, 3, 10, 11, 12],
        }
    }

    /// Whether a DOF is prescribed to zero
    pub fn is_constrained(&self, dof: usize) -> bool {
        self.constrained_dofs().contains(&dof)
    }

    /// Free DOF numbers in ascending order
    pub fn free_dofs(&self) -> Vec<usize> {
        (1..=DOF_COUNT).filter(|&dof| !self.is_constrained(dof)).collect()
    }
}

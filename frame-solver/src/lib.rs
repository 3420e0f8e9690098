//! Frame Solver - static analysis of a three-member plane frame
//!
//! A portal frame of two columns and a beam, defined by eleven scalars
//! (geometry, material and loads), solved by the direct stiffness method:
//! - Euler-Bernoulli plane beam elements with uniform transverse loads
//! - Assembly into a 12 DOF global system and a constrained LU solve
//! - Section forces and displacements sampled along every member
//! - Diagram data with auto scale factors and a tabular text report
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let params = FrameParameters::reference();
//! let solution = solve(&params, &AnalysisOptions::default()).unwrap();
//!
//! // Horizontal sway at the head of the left column
//! let sway = solution.displacement(4).unwrap();
//! assert!(sway > 0.0);
//!
//! // Moment diagram of the beam
//! let diagram = Diagram::new(&solution, ResultKind::Moment);
//! assert_eq!(diagram.members.len(), 3);
//! ```

pub mod analysis;
pub mod diagram;
pub mod elements;
pub mod error;
pub mod math;
pub mod model;
pub mod parameters;
pub mod report;
pub mod results;
pub mod topology;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{solve, AnalysisOptions};
    pub use crate::diagram::{Diagram, MemberDiagram, ResultKind};
    pub use crate::elements::{BeamElement, BeamSection, SectionSample};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::model::FrameModel;
    pub use crate::parameters::{FrameParameters, ParameterName};
    pub use crate::report::{write_report, HeadingLevel, ResultSink, TextSink};
    pub use crate::results::{FrameSolution, MemberResult, SolutionSummary, SupportReaction};
    pub use crate::topology::{Member, SupportCondition};
}

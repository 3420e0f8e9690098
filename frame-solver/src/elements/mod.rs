//! Structural elements module

mod beam;

pub use beam::{BeamElement, BeamSection, SectionSample};

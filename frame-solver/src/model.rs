//! Frame model session - parameter editing, file handling and solving
//!
//! [`FrameModel`] is what an interactive shell binds to: text fields map to
//! [`FrameModel::set_parameter_text`], menu actions to `reset`, `open`,
//! `save`, `save_as` and `solve`, and result tabs to `report` and `diagram`.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::analysis::{self, AnalysisOptions};
use crate::diagram::{Diagram, ResultKind};
use crate::error::{FrameError, FrameResult};
use crate::parameters::{FrameParameters, ParameterName};
use crate::report::{self, ResultSink};
use crate::results::FrameSolution;

/// Editable frame parameters together with the latest valid solution
#[derive(Debug, Clone, Default)]
pub struct FrameModel {
    parameters: FrameParameters,
    options: AnalysisOptions,
    path: Option<PathBuf>,
    solution: Option<FrameSolution>,
}

impl FrameModel {
    /// Model with default parameters and no file
    pub fn new() -> Self {
        Self::default()
    }

    /// Model with the given parameters
    pub fn with_parameters(parameters: FrameParameters) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    /// Set analysis options (invalidates the solution)
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self.solution = None;
        self
    }

    pub fn parameters(&self) -> &FrameParameters {
        &self.parameters
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// File the model was last opened from or saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get one parameter
    pub fn parameter(&self, name: ParameterName) -> f64 {
        self.parameters.get(name)
    }

    /// Set one parameter
    pub fn set_parameter(&mut self, name: ParameterName, value: f64) {
        self.parameters.set(name, value);
        self.solution = None;
    }

    /// Set one parameter from user-entered text
    ///
    /// Invalid text leaves the model untouched.
    pub fn set_parameter_text(&mut self, name: ParameterName, text: &str) -> FrameResult<()> {
        self.parameters.set_from_str(name, text)?;
        self.solution = None;
        Ok(())
    }

    /// Replace all parameters
    pub fn set_parameters(&mut self, parameters: FrameParameters) {
        self.parameters = parameters;
        self.solution = None;
    }

    /// Start over with default parameters and no file
    pub fn reset(&mut self) {
        let options = self.options;
        *self = Self::default().with_options(options);
    }

    /// Load parameters from a file and remember its path
    ///
    /// On failure the model is left unchanged.
    pub fn open(&mut self, path: impl AsRef<Path>) -> FrameResult<()> {
        let path = path.as_ref();
        let parameters = FrameParameters::load(path).inspect_err(|err| {
            warn!("could not open {}: {err}", path.display());
        })?;

        self.parameters = parameters;
        self.path = Some(path.to_path_buf());
        self.solution = None;
        info!("opened parameters from {}", path.display());
        Ok(())
    }

    /// Save parameters to the remembered file
    pub fn save(&mut self) -> FrameResult<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| FrameError::InvalidInput("no file name given, use save as".to_string()))?;
        self.save_as(path)
    }

    /// Save parameters to a new file and remember its path
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> FrameResult<()> {
        let path = path.as_ref();
        self.parameters.save(path)?;
        self.path = Some(path.to_path_buf());
        info!("saved parameters to {}", path.display());
        Ok(())
    }

    /// Solve the frame with the current parameters
    ///
    /// A failed solve leaves no solution behind.
    pub fn solve(&mut self) -> FrameResult<&FrameSolution> {
        self.solution = None;
        let solution = analysis::solve(&self.parameters, &self.options)?;
        Ok(&*self.solution.insert(solution))
    }

    /// Latest solution, `None` if not solved since the last change
    pub fn solution(&self) -> Option<&FrameSolution> {
        self.solution.as_ref()
    }

    fn require_solution(&self) -> FrameResult<&FrameSolution> {
        self.solution.as_ref().ok_or(FrameError::NotSolved)
    }

    /// Write the text report of the current solution
    pub fn report(&self, sink: &mut dyn ResultSink) -> FrameResult<()> {
        let solution = self.require_solution()?;
        report::write_report(&self.parameters, solution, sink)
    }

    /// Diagram of one result kind for the current solution
    pub fn diagram(&self, kind: ResultKind) -> FrameResult<Diagram> {
        let solution = self.require_solution()?;
        Ok(Diagram::new(solution, kind))
    }
}

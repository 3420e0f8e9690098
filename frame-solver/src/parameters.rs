//! Model parameters - the eleven scalars that define a frame analysis

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Geometry, material and load parameters for the three-member frame.
///
/// Members 1 and 2 (the columns) share `a1`/`i1`, member 3 (the beam) uses
/// `a2`/`i2`. Node coordinates are derived from `w` and `h` on every solve.
/// The serialized form is a flat JSON object keyed by the names in
/// [`ParameterName::key`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParameters {
    /// Bay width
    pub w: f64,
    /// Column height
    pub h: f64,
    /// Young's modulus, shared by all members
    #[serde(rename = "E")]
    pub e: f64,
    /// Cross-section area of the columns
    #[serde(rename = "A1")]
    pub a1: f64,
    /// Cross-section area of the beam
    #[serde(rename = "A2")]
    pub a2: f64,
    /// Second moment of area of the columns
    #[serde(rename = "I1")]
    pub i1: f64,
    /// Second moment of area of the beam
    #[serde(rename = "I2")]
    pub i2: f64,
    /// Uniform transverse load on member 1 (left column)
    pub q1: f64,
    /// Uniform transverse load on member 2 (right column)
    pub q2: f64,
    /// Uniform transverse load on member 3 (beam)
    pub q3: f64,
    /// Horizontal point load at the head of the left column
    pub f1: f64,
}

impl Default for FrameParameters {
    fn default() -> Self {
        Self {
            w: 6.0,
            h: 4.0,
            e: 200.0e9,
            a1: 2.0e-3,
            a2: 6.0e-3,
            i1: 1.6e-5,
            i2: 5.4e-5,
            q1: 0.0,
            q2: 0.0,
            q3: -10e3,
            f1: 0.0,
        }
    }
}

impl FrameParameters {
    /// The example load case: default frame with a 2 kN horizontal load
    pub fn reference() -> Self {
        Self {
            f1: 2e3,
            ..Self::default()
        }
    }

    /// Get a parameter by name
    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::W => self.w,
            ParameterName::H => self.h,
            ParameterName::E => self.e,
            ParameterName::A1 => self.a1,
            ParameterName::A2 => self.a2,
            ParameterName::I1 => self.i1,
            ParameterName::I2 => self.i2,
            ParameterName::Q1 => self.q1,
            ParameterName::Q2 => self.q2,
            ParameterName::Q3 => self.q3,
            ParameterName::F1 => self.f1,
        }
    }

    /// Set a parameter by name
    pub fn set(&mut self, name: ParameterName, value: f64) {
        let slot = match name {
            ParameterName::W => &mut self.w,
            ParameterName::H => &mut self.h,
            ParameterName::E => &mut self.e,
            ParameterName::A1 => &mut self.a1,
            ParameterName::A2 => &mut self.a2,
            ParameterName::I1 => &mut self.i1,
            ParameterName::I2 => &mut self.i2,
            ParameterName::Q1 => &mut self.q1,
            ParameterName::Q2 => &mut self.q2,
            ParameterName::Q3 => &mut self.q3,
            ParameterName::F1 => &mut self.f1,
        };
        *slot = value;
    }

    /// Set a parameter from user-entered text.
    ///
    /// The parameter is left unchanged when the text is not a finite number.
    pub fn set_from_str(&mut self, name: ParameterName, text: &str) -> FrameResult<()> {
        let value = parse_value(name, text)?;
        self.set(name, value);
        Ok(())
    }

    /// All parameters in file order as `(name, value)` pairs
    pub fn entries(&self) -> [(ParameterName, f64); 11] {
        ParameterName::ALL.map(|name| (name, self.get(name)))
    }

    /// Parse parameters from a JSON document
    pub fn from_json_str(json: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize parameters to a JSON document
    pub fn to_json_string(&self) -> FrameResult<String> {
        if let Some((name, value)) = self.entries().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(FrameError::InvalidInput(format!(
                "parameter {name} is {value} and cannot be written to a parameter file"
            )));
        }
        serde_json::to_string_pretty(self)
            .map_err(|err| FrameError::InvalidInput(format!("cannot serialize parameters: {err}")))
    }

    /// Load parameters from a JSON file
    ///
    /// Content that is not valid UTF-8 JSON is reported as
    /// [`FrameError::MalformedFile`], read failures as [`FrameError::Io`].
    pub fn load(path: impl AsRef<Path>) -> FrameResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Save parameters to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> FrameResult<()> {
        let json = self.to_json_string()?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn parse_value(name: ParameterName, text: &str) -> FrameResult<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        FrameError::InvalidInput(format!(
            "'{}' is not a number ({}, parameter {name})",
            text.trim(),
            name.description()
        ))
    })?;
    if !value.is_finite() {
        return Err(FrameError::InvalidInput(format!(
            "parameter {name} must be finite, got {value}"
        )));
    }
    Ok(value)
}

/// Names of the editable frame parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterName {
    W,
    H,
    E,
    A1,
    A2,
    I1,
    I2,
    Q1,
    Q2,
    Q3,
    F1,
}

impl ParameterName {
    /// Every parameter, in parameter-file order
    pub const ALL: [ParameterName; 11] = [
        Self::W,
        Self::H,
        Self::E,
        Self::A1,
        Self::A2,
        Self::I1,
        Self::I2,
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::F1,
    ];

    /// Key used in the parameter file
    pub fn key(&self) -> &'static str {
        match self {
            Self::W => "w",
            Self::H => "h",
            Self::E => "E",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::I1 => "I1",
            Self::I2 => "I2",
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::F1 => "f1",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::W => "bay width",
            Self::H => "column height",
            Self::E => "Young's modulus",
            Self::A1 => "column area",
            Self::A2 => "beam area",
            Self::I1 => "column second moment of area",
            Self::I2 => "beam second moment of area",
            Self::Q1 => "distributed load, left column",
            Self::Q2 => "distributed load, right column",
            Self::Q3 => "distributed load, beam",
            Self::F1 => "horizontal point load",
        }
    }

    /// Dimension of the parameter (SI base units are assumed but not enforced)
    pub fn unit(&self) -> &'static str {
        match self {
            Self::W | Self::H => "length",
            Self::E => "pressure",
            Self::A1 | Self::A2 => "area",
            Self::I1 | Self::I2 => "length^4",
            Self::Q1 | Self::Q2 | Self::Q3 => "force/length",
            Self::F1 => "force",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ParameterName {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.key() == s)
            .ok_or_else(|| FrameError::InvalidInput(format!("unknown parameter '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_frame() {
        let params = FrameParameters::default();
        assert_eq!(params.w, 6.0);
        assert_eq!(params.e, 200.0e9);
        assert_eq!(params.q3, -10e3);
        assert_eq!(params.f1, 0.0);
        assert_eq!(FrameParameters::reference().f1, 2e3);
    }

    #[test]
    fn test_get_set_by_name() {
        let mut params = FrameParameters::default();
        for (i, name) in ParameterName::ALL.into_iter().enumerate() {
            params.set(name, i as f64 + 0.5);
        }
        assert_eq!(params.get(ParameterName::W), 0.5);
        assert_eq!(params.i2, 6.5);
        assert_eq!(params.f1, 10.5);
    }

    #[test]
    fn test_set_from_str_rejects_garbage() {
        let mut params = FrameParameters::default();
        params.set_from_str(ParameterName::H, " 3.5 ").unwrap();
        assert_eq!(params.h, 3.5);

        let err = params.set_from_str(ParameterName::H, "tall").unwrap_err();
        assert!(matches!(err, FrameError::InvalidInput(_)));
        assert!(err.to_string().contains("column height"));
        assert!(params.set_from_str(ParameterName::E, "inf").is_err());
        assert_eq!(params.h, 3.5);
        assert_eq!(params.e, 200.0e9);
    }

    #[test]
    fn test_parameter_name_parsing() {
        assert_eq!("A1".parse::<ParameterName>().unwrap(), ParameterName::A1);
        assert_eq!("q3".parse::<ParameterName>().unwrap(), ParameterName::Q3);
        assert!("a1".parse::<ParameterName>().is_err());
        assert_eq!(ParameterName::E.to_string(), "E");
    }

    #[test]
    fn test_json_has_exactly_eleven_keys() {
        let json = FrameParameters::reference().to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 11);
        for name in ParameterName::ALL {
            assert!(object.contains_key(name.key()), "missing {name}");
        }
    }

    #[test]
    fn test_json_keys_in_file_order() {
        let json = FrameParameters::reference().to_json_string().unwrap();
        let positions: Vec<usize> = ParameterName::ALL
            .iter()
            .map(|name| json.find(&format!("\"{}\":", name.key())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_descriptions_and_units() {
        assert_eq!(ParameterName::W.description(), "bay width");
        assert_eq!(ParameterName::W.unit(), "length");
        assert_eq!(ParameterName::I2.unit(), "length^4");
        assert_eq!(ParameterName::Q3.unit(), "force/length");
        assert_eq!(ParameterName::F1.unit(), "force");
        for name in ParameterName::ALL {
            assert!(!name.description().is_empty());
        }
    }

    #[test]
    fn test_non_utf8_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.json");
        fs::write(&path, [b'{', b'"', 0xff, 0xfe, b'"', b':', b'1', b'}']).unwrap();

        let err = FrameParameters::load(&path).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFile(_)));

        let err = FrameParameters::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let json = r#"{"w": 6, "h": 4, "E": 2e11, "A1": 0.002, "A2": 0.006,
                       "I1": 1.6e-5, "I2": 5.4e-5, "q1": 0, "q2": 0, "q3": -1e4}"#;
        let err = FrameParameters::from_json_str(json).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFile(_)));
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let json = r#"{"w": "wide", "h": 4, "E": 2e11, "A1": 0.002, "A2": 0.006,
                       "I1": 1.6e-5, "I2": 5.4e-5, "q1": 0, "q2": 0, "q3": -1e4, "f1": 0}"#;
        let err = FrameParameters::from_json_str(json).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFile(_)));
    }

    #[test]
    fn test_extra_keys_and_integers_accepted() {
        let json = r#"{"w": 6, "h": 4, "E": 200000000000, "A1": 0.002, "A2": 0.006,
                       "I1": 1.6e-5, "I2": 5.4e-5, "q1": 0, "q2": 0, "q3": -10000,
                       "f1": 2000, "comment": "portal"}"#;
        let params = FrameParameters::from_json_str(json).unwrap();
        assert_eq!(params, FrameParameters::reference());
    }

    #[test]
    fn test_non_finite_values_are_not_saved() {
        let params = FrameParameters {
            q1: f64::NAN,
            ..FrameParameters::default()
        };
        assert!(matches!(
            params.to_json_string(),
            Err(FrameError::InvalidInput(_))
        ));
    }
}

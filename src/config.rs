//! A module for validating and managing run configurations for the pipe
//! integrity assessment tool.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::engine::Assessment;
use crate::material::Material;

/// Represents an error that can occur during validation of configuration data.
#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a given message.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error.
    pub fn new(message: &str) -> ValidationError {
        ValidationError {
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Represents the configuration for one assessment run.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub solution: Solution,
    pub pipe: Pipe,
    pub corrosion: Corrosion,
    pub material: Material,
    pub operating: Operating,
    /// Optional CSV batch section; when present, the run also evaluates every
    /// record in the referenced file.
    pub batch: Option<Batch>,
}

impl Config {
    /// Validates the entire configuration.
    ///
    /// This method checks the validity of each component of the configuration
    /// and ensures all required conditions are met before the engine runs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.solution.validate()?;
        self.pipe.validate()?;
        self.corrosion.validate(&self.pipe)?;
        self.material.validate()?;
        self.operating.validate()?;
        if let Some(batch) = &self.batch {
            batch.validate()?;
        }
        Ok(())
    }

    /// Assembles the engine input record from the configuration sections.
    pub fn to_assessment(&self) -> Assessment {
        Assessment {
            thickness: self.pipe.thickness,
            diameter: self.pipe.diameter,
            length: self.pipe.length,
            corrosion_length: self.corrosion.length,
            corrosion_depth: self.corrosion.depth,
            yield_stress: self.material.yield_stress,
            ultimate_stress: self.material.ultimate_stress,
            max_operating_pressure: self.operating.max_pressure,
            min_operating_pressure: self.operating.min_pressure,
        }
    }
}

/// Represents the solution settings for an assessment session: what to run
/// and how to emit the results.
#[derive(Debug, Deserialize)]
pub struct Solution {
    /// Specifies the type of run. Valid values are "BURST" for the burst
    /// pressure assessment and "NONE" for no analysis.
    pub run_type: String,
    /// Defines the mode of operation. Valid modes are "STRESS" for the
    /// operating-pressure stress assessment and "NONE" to skip it.
    pub mode: String,
    /// The desired output format. Currently, "JSON" is supported as a valid
    /// output.
    pub output: String,
}

impl Solution {
    /// Validates the `Solution` configuration to ensure all specified
    /// settings are valid and consistent with the application's requirements.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeburst::config::Solution;
    ///
    /// let solution = Solution {
    ///     run_type: String::from("BURST"),
    ///     mode: String::from("STRESS"),
    ///     output: String::from("JSON"),
    /// };
    /// assert!(solution.validate().is_ok());
    ///
    /// let unknown_output = Solution {
    ///     run_type: String::from("BURST"),
    ///     mode: String::from("STRESS"),
    ///     output: String::from("XML"),
    /// };
    /// assert!(unknown_output.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.run_type.as_str() {
            "BURST" | "NONE" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "run_type must be BURST or NONE, got {}",
                self.run_type
            ))),
        }?;
        match self.mode.as_str() {
            "STRESS" | "NONE" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "mode must be STRESS or NONE, got {}",
                self.mode
            ))),
        }?;
        match self.output.as_str() {
            "JSON" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "output must be JSON, got {}",
                self.output
            ))),
        }?;
        Ok(())
    }
}

/// Dimensions of the assessed pipe segment, all in mm.
#[derive(Debug, Deserialize)]
pub struct Pipe {
    /// Wall thickness t. Must be greater than 0.
    pub thickness: f64,
    /// Outer diameter D. Must be greater than the wall thickness.
    pub diameter: f64,
    /// Defect-relevant axial length L.
    pub length: f64,
}

impl Pipe {
    /// Validates the `Pipe` struct's fields to ensure they describe a usable
    /// thin-walled segment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.thickness <= 0.0 {
            return Err(ValidationError::new(&format!(
                "thickness must be greater than 0.0, got {}",
                self.thickness
            )));
        }
        if self.diameter <= self.thickness {
            return Err(ValidationError::new(&format!(
                "diameter must be greater than the wall thickness, got {}",
                self.diameter
            )));
        }
        if self.length < 0.0 {
            return Err(ValidationError::new(&format!(
                "length must not be negative, got {}",
                self.length
            )));
        }
        Ok(())
    }
}

/// Axial extent and depth of the corrosion defect, in mm.
#[derive(Debug, Deserialize)]
pub struct Corrosion {
    /// Corrosion axial length Lc.
    pub length: f64,
    /// Corrosion depth Dc. Must stay below the wall thickness.
    pub depth: f64,
}

impl Corrosion {
    /// Validates the corrosion geometry against the pipe it sits on.
    pub fn validate(&self, pipe: &Pipe) -> Result<(), ValidationError> {
        if self.length < 0.0 {
            return Err(ValidationError::new(&format!(
                "corrosion length must not be negative, got {}",
                self.length
            )));
        }
        if self.depth < 0.0 {
            return Err(ValidationError::new(&format!(
                "corrosion depth must not be negative, got {}",
                self.depth
            )));
        }
        if self.depth >= pipe.thickness {
            return Err(ValidationError::new(&format!(
                "corrosion depth must be less than the wall thickness {}, got {}",
                pipe.thickness, self.depth
            )));
        }
        Ok(())
    }
}

/// Operating pressure envelope of the segment, in MPa.
#[derive(Debug, Deserialize)]
pub struct Operating {
    /// Maximum operating pressure.
    pub max_pressure: f64,
    /// Minimum operating pressure. Must satisfy max >= min >= 0.
    pub min_pressure: f64,
}

impl Operating {
    /// Validates the `Operating` struct's fields to ensure the pressure
    /// envelope is ordered and non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeburst::config::Operating;
    ///
    /// let envelope = Operating { max_pressure: 10.0, min_pressure: 2.0 };
    /// assert!(envelope.validate().is_ok());
    ///
    /// let inverted = Operating { max_pressure: 2.0, min_pressure: 10.0 };
    /// assert!(inverted.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_pressure < 0.0 {
            return Err(ValidationError::new(&format!(
                "min_pressure must not be negative, got {}",
                self.min_pressure
            )));
        }
        if self.max_pressure < self.min_pressure {
            return Err(ValidationError::new(&format!(
                "max_pressure must be at least min_pressure, got {} < {}",
                self.max_pressure, self.min_pressure
            )));
        }
        Ok(())
    }
}

/// Batch input section: a CSV file of assessment records.
#[derive(Debug, Deserialize)]
pub struct Batch {
    /// Path to the CSV file of input records.
    pub path: String,
}

impl Batch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::new("batch path must not be empty"));
        }
        if !Path::new(&self.path).exists() {
            return Err(ValidationError::new(&format!(
                "batch file does not exist: {}",
                self.path
            )));
        }
        Ok(())
    }
}

/// Loads the run configuration from a YAML file.
///
/// # Arguments
///
/// * `config_path` - A path reference to the configuration file.
///
/// # Errors
///
/// This function will return an error if reading or parsing the configuration
/// file fails.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(config_path)?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

//! A module for pipe material properties used by the integrity assessment.

use serde::Deserialize;

use crate::config::ValidationError;

/// Represents the pipe material in a burst pressure assessment.
///
/// Holds the two strength properties the burst models depend on: the yield
/// stress and the ultimate tensile strength, both in MPa.
#[derive(Debug, Deserialize)]
pub struct Material {
    /// Name of the material, e.g. an API 5L grade.
    pub name: String,
    /// Yield stress Sy of the material (MPa).
    pub yield_stress: f64,
    /// Ultimate tensile strength UTS of the material (MPa).
    pub ultimate_stress: f64,
}

impl Material {
    /// Validates the `Material` struct to ensure both strength properties are
    /// defined correctly.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if all properties are valid and within their expected
    /// ranges. Otherwise, it returns a `ValidationError` detailing the issue.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new(&format!(
                "name must not be empty, got {}",
                self.name
            )));
        }
        if self.yield_stress < 0.0 {
            return Err(ValidationError::new(&format!(
                "yield_stress must be greater than 0.0, got {}",
                self.yield_stress
            )));
        }
        if self.ultimate_stress < 0.0 {
            return Err(ValidationError::new(&format!(
                "ultimate_stress must be greater than 0.0, got {}",
                self.ultimate_stress
            )));
        }
        if self.ultimate_stress < self.yield_stress {
            return Err(ValidationError::new(&format!(
                "ultimate_stress must not be below yield_stress, got {} < {}",
                self.ultimate_stress, self.yield_stress
            )));
        }
        Ok(())
    }
}

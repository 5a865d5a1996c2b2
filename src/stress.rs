extern crate nalgebra as na;
use na::{Const, Matrix3, SymmetricEigen, Vector3};

use crate::engine::EngineError;

/// Stress state at a point of the pipe wall, held as a symmetric 3x3 tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct StressTensor {
    matrix: Matrix3<f64>,
}

impl StressTensor {
    pub fn new(matrix: Matrix3<f64>) -> Self {
        StressTensor { matrix }
    }

    /// Builds the diagonal tensor of an already-principal stress state
    /// (hoop, axial, radial).
    pub fn from_principal(hoop: f64, axial: f64, radial: f64) -> Self {
        StressTensor {
            matrix: Matrix3::from_diagonal(&Vector3::new(hoop, axial, radial)),
        }
    }

    // Principal stresses are the eigenvalues of the symmetric stress tensor
    pub fn principal_stresses(&self) -> SymmetricEigen<f64, Const<3>> {
        self.matrix.symmetric_eigen()
    }

    pub fn max_principal_stress(&self) -> f64 {
        let eigen = self.principal_stresses();
        eigen
            .eigenvalues
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Von Mises equivalent stress from the principal stresses:
    /// `sqrt(((s1-s2)^2 + (s2-s3)^2 + (s3-s1)^2) / 2)`.
    pub fn von_mises_stress(&self) -> f64 {
        let eigen = self.principal_stresses();
        let s1 = eigen.eigenvalues[0];
        let s2 = eigen.eigenvalues[1];
        let s3 = eigen.eigenvalues[2];
        (((s1 - s2).powi(2) + (s2 - s3).powi(2) + (s3 - s1).powi(2)) / 2.0).sqrt()
    }
}

/// Principal stresses of a thin-walled cylinder under internal pressure:
/// hoop `p D / (2 t)`, axial `p D / (4 t)`, radial 0 in the thin-wall
/// approximation.
pub fn thin_wall_principal_stresses(
    pressure: f64,
    diameter: f64,
    thickness: f64,
) -> Result<(f64, f64, f64), EngineError> {
    if thickness <= 0.0 {
        return Err(EngineError::Domain {
            quantity: "thickness",
            value: thickness,
            reason: "must be positive",
        });
    }
    if diameter <= 0.0 {
        return Err(EngineError::Domain {
            quantity: "diameter",
            value: diameter,
            reason: "must be positive",
        });
    }
    let hoop = pressure * diameter / (2.0 * thickness);
    let axial = pressure * diameter / (4.0 * thickness);
    Ok((hoop, axial, 0.0))
}

/// Stress tensor of the thin-walled cylinder wall at one operating pressure.
pub fn thin_wall_stress_tensor(
    pressure: f64,
    diameter: f64,
    thickness: f64,
) -> Result<StressTensor, EngineError> {
    let (hoop, axial, radial) = thin_wall_principal_stresses(pressure, diameter, thickness)?;
    Ok(StressTensor::from_principal(hoop, axial, radial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_von_mises_of_general_tensor() {
        let matrix = Matrix3::new(
            1.0, 0.0, 2.0,
            0.0, 0.0, 0.0,
            2.0, 0.0, 3.0,
        );
        let stress = StressTensor::new(matrix);
        assert_relative_eq!(stress.max_principal_stress(), 4.2360679774997898, epsilon = 1e-6);
        assert_relative_eq!(stress.von_mises_stress(), 4.358898943540674, epsilon = 1e-6);
    }

    #[test]
    fn test_thin_wall_principal_stresses() {
        let (hoop, axial, radial) = thin_wall_principal_stresses(10.0, 300.0, 10.0).unwrap();
        assert_relative_eq!(hoop, 150.0, epsilon = 1e-12);
        assert_relative_eq!(axial, 75.0, epsilon = 1e-12);
        assert_relative_eq!(radial, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thin_wall_von_mises_matches_closed_form() {
        let tensor = thin_wall_stress_tensor(10.0, 300.0, 10.0).unwrap();
        // (1/sqrt(2)) * sqrt(75^2 + 75^2 + 150^2) = 75 * sqrt(3)
        assert_relative_eq!(tensor.von_mises_stress(), 129.9038105676658, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_pressure_gives_zero_stress() {
        let tensor = thin_wall_stress_tensor(0.0, 300.0, 10.0).unwrap();
        assert_relative_eq!(tensor.von_mises_stress(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_wall() {
        assert!(thin_wall_principal_stresses(10.0, 300.0, 0.0).is_err());
        assert!(thin_wall_principal_stresses(10.0, 0.0, 10.0).is_err());
    }
}

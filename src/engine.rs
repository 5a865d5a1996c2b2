//! Burst pressure models and operating stress assessment for a corroded pipe segment.
//!
//! The engine is a pure function of one [`Assessment`] record: the same inputs
//! always produce the same [`AssessmentResult`], and nothing is cached or shared
//! between evaluations. Model formulas follow Zhu, "A comparative study of burst
//! failure models for assessing remaining strength of corroded pipelines",
//! J. Pipeline Sci. Eng. 1 (2021).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stress::thin_wall_stress_tensor;

/// Structured failure of an engine operation.
///
/// Every failure names the offending quantity and carries the offending value;
/// the engine never substitutes a default. The presentation layer decides how
/// to display these.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An input violates its stated range constraint, e.g. a negative
    /// thickness or a corrosion depth reaching the wall thickness.
    InvalidInput {
        quantity: &'static str,
        value: f64,
        constraint: &'static str,
    },
    /// A formula precondition failed at evaluation time: division by zero or
    /// a square root of a negative operand.
    Domain {
        quantity: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput {
                quantity,
                value,
                constraint,
            } => write!(f, "invalid input: {} {}, got {}", quantity, constraint, value),
            EngineError::Domain {
                quantity,
                value,
                reason,
            } => write!(f, "domain error: {} {}, got {}", quantity, reason, value),
        }
    }
}

impl std::error::Error for EngineError {}

fn require_positive(quantity: &'static str, value: f64) -> Result<(), EngineError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::Domain {
            quantity,
            value,
            reason: "must be positive",
        })
    }
}

/// One evaluation request: dimensions in mm, stresses and pressures in MPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Pipe wall thickness t (mm).
    pub thickness: f64,
    /// Pipe outer diameter D (mm).
    pub diameter: f64,
    /// Defect-relevant axial pipe length L (mm).
    pub length: f64,
    /// Corrosion axial length Lc (mm).
    pub corrosion_length: f64,
    /// Corrosion depth Dc (mm), 0 <= Dc < t.
    pub corrosion_depth: f64,
    /// Material yield stress Sy (MPa).
    pub yield_stress: f64,
    /// Material ultimate tensile strength UTS (MPa), UTS >= Sy.
    pub ultimate_stress: f64,
    /// Maximum operating pressure (MPa).
    pub max_operating_pressure: f64,
    /// Minimum operating pressure (MPa), PopMax >= PopMin >= 0.
    pub min_operating_pressure: f64,
}

impl Assessment {
    /// Checks the stated range constraints of the input record.
    ///
    /// Relational constraints such as `Dc < t` are only enforced once the
    /// quantities they relate to are themselves usable; a non-positive wall
    /// thickness is left for the model operations to reject as a domain
    /// failure naming the thickness.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |quantity, value, constraint| {
            Err(EngineError::InvalidInput {
                quantity,
                value,
                constraint,
            })
        };
        if self.thickness < 0.0 {
            return invalid("thickness", self.thickness, "must be positive");
        }
        if self.diameter < 0.0 {
            return invalid("diameter", self.diameter, "must be positive");
        }
        if self.length < 0.0 {
            return invalid("length", self.length, "must not be negative");
        }
        if self.corrosion_length < 0.0 {
            return invalid(
                "corrosion_length",
                self.corrosion_length,
                "must not be negative",
            );
        }
        if self.corrosion_depth < 0.0 {
            return invalid(
                "corrosion_depth",
                self.corrosion_depth,
                "must not be negative",
            );
        }
        if self.thickness > 0.0 && self.corrosion_depth >= self.thickness {
            return invalid(
                "corrosion_depth",
                self.corrosion_depth,
                "must be less than the wall thickness",
            );
        }
        if self.yield_stress < 0.0 {
            return invalid("yield_stress", self.yield_stress, "must not be negative");
        }
        if self.ultimate_stress < self.yield_stress {
            return invalid(
                "ultimate_stress",
                self.ultimate_stress,
                "must be at least the yield stress",
            );
        }
        if self.min_operating_pressure < 0.0 {
            return invalid(
                "min_operating_pressure",
                self.min_operating_pressure,
                "must not be negative",
            );
        }
        if self.max_operating_pressure < self.min_operating_pressure {
            return invalid(
                "max_operating_pressure",
                self.max_operating_pressure,
                "must be at least the minimum operating pressure",
            );
        }
        Ok(())
    }
}

/// One evaluation response. Field names on the wire match the model
/// literature: burst pressures in MPa, Folias and Q dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Intact pipe burst pressure, Von Mises criterion (MPa).
    #[serde(rename = "Pvm")]
    pub p_vm: f64,
    /// Intact pipe burst pressure, Tresca criterion (MPa).
    #[serde(rename = "PTresca")]
    pub p_tresca: f64,
    /// Folias bulging factor M.
    #[serde(rename = "Folias")]
    pub folias: f64,
    /// Corroded pipe burst pressure, ASME B31G (2013) (MPa).
    #[serde(rename = "PAsmeB31G")]
    pub p_asme_b31g: f64,
    /// DNV curve-fit factor Q.
    #[serde(rename = "Q")]
    pub q: f64,
    /// Corroded pipe burst pressure, DNV model (MPa).
    #[serde(rename = "PDnv")]
    pub p_dnv: f64,
    /// Corroded pipe burst pressure, PCORRC model (MPa).
    #[serde(rename = "PPcorrc")]
    pub p_pcorrc: f64,
    /// Von Mises equivalent stress at maximum operating pressure (MPa).
    #[serde(rename = "SigmaVmMax")]
    pub sigma_vm_max: f64,
    /// Von Mises equivalent stress at minimum operating pressure (MPa).
    #[serde(rename = "SigmaVmMin")]
    pub sigma_vm_min: f64,
}

/// Intact pipe burst pressure under the Von Mises yield criterion:
/// `4 t UTS / (sqrt(3) D)`.
pub fn von_mises_burst(thickness: f64, diameter: f64, ultimate_stress: f64) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    Ok(4.0 * thickness * ultimate_stress / (3.0_f64.sqrt() * diameter))
}

/// Intact pipe burst pressure under the Tresca yield criterion:
/// `2 t UTS / D`.
pub fn tresca_burst(thickness: f64, diameter: f64, ultimate_stress: f64) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    Ok(2.0 * thickness * ultimate_stress / diameter)
}

/// Folias bulging factor `M = sqrt(1 + 0.8 L / sqrt(D t))`.
pub fn folias_factor(length: f64, diameter: f64, thickness: f64) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    let dt = diameter * thickness;
    // t > 0 and D > 0 imply D*t > 0; the product is still guarded because the
    // factor is also exposed on its own.
    if dt <= 0.0 {
        return Err(EngineError::Domain {
            quantity: "diameter * thickness",
            value: dt,
            reason: "must be positive under the square root",
        });
    }
    Ok((1.0 + 0.8 * (length / dt.sqrt())).sqrt())
}

/// Corroded pipe burst pressure per ASME B31G (2013).
///
/// The defect regime is selected against the critical length `sqrt(20 D t)`.
/// A defect shorter than the critical length uses the Folias-corrected form
/// with an explicit numerator/denominator pair:
///
/// ```text
/// P = (2 t UTS / D) * (1 - (2/3)(Dc/t)) / (1 - (2/3)(Dc/t)/M)
/// ```
///
/// A defect at or beyond the critical length uses the long-defect form
/// `(2 t UTS / D) * (1 - Dc/t)`. The boundary itself is treated as long,
/// matching the ASME convention.
pub fn asme_b31g_burst(
    thickness: f64,
    diameter: f64,
    length: f64,
    corrosion_depth: f64,
    ultimate_stress: f64,
) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    let reference = 2.0 * thickness * ultimate_stress / diameter;
    let wall_loss = corrosion_depth / thickness;
    let critical_length = (20.0 * diameter * thickness).sqrt();
    if length < critical_length {
        let m = folias_factor(length, diameter, thickness)?;
        let numerator = 1.0 - (2.0 / 3.0) * wall_loss;
        let denominator = 1.0 - (2.0 / 3.0) * wall_loss / m;
        if denominator == 0.0 {
            return Err(EngineError::Domain {
                quantity: "1 - (2/3)(Dc/t)/M",
                value: denominator,
                reason: "must not vanish as a divisor",
            });
        }
        Ok(reference * numerator / denominator)
    } else {
        Ok(reference * (1.0 - wall_loss))
    }
}

/// DNV curve-fit factor `Q = sqrt(1 + 0.31 Lc^2 / (D t))` for the corrosion
/// geometry.
pub fn dnv_q_factor(
    corrosion_length: f64,
    diameter: f64,
    thickness: f64,
) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    Ok((1.0 + 0.31 * corrosion_length.powi(2) / (diameter * thickness)).sqrt())
}

/// Corroded pipe burst pressure per the DNV model:
/// `(2 UTS t / (D - t)) * (1 - Dc/t) / (1 - Dc/(t Q))`.
pub fn dnv_burst(
    thickness: f64,
    diameter: f64,
    corrosion_length: f64,
    corrosion_depth: f64,
    ultimate_stress: f64,
) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    let mid_wall = diameter - thickness;
    if mid_wall <= 0.0 {
        return Err(EngineError::Domain {
            quantity: "diameter - thickness",
            value: mid_wall,
            reason: "must be positive, the mid-wall divisor collapses",
        });
    }
    let q = dnv_q_factor(corrosion_length, diameter, thickness)?;
    let denominator = 1.0 - corrosion_depth / (thickness * q);
    if denominator == 0.0 {
        return Err(EngineError::Domain {
            quantity: "1 - Dc/(t*Q)",
            value: denominator,
            reason: "must not vanish as a divisor",
        });
    }
    Ok((2.0 * ultimate_stress * thickness / mid_wall) * (1.0 - corrosion_depth / thickness)
        / denominator)
}

/// Corroded pipe burst pressure per the PCORRC model:
/// `(2 t UTS / D) * (1 - Dc/t)`.
pub fn pcorrc_burst(
    thickness: f64,
    diameter: f64,
    corrosion_depth: f64,
    ultimate_stress: f64,
) -> Result<f64, EngineError> {
    require_positive("thickness", thickness)?;
    require_positive("diameter", diameter)?;
    Ok(2.0 * thickness * ultimate_stress / diameter * (1.0 - corrosion_depth / thickness))
}

/// Von Mises equivalent stress of the thin-walled cylinder at one operating
/// pressure, from the principal stresses `p D/(2t)`, `p D/(4t)` and `0`.
pub fn operating_von_mises(
    pressure: f64,
    diameter: f64,
    thickness: f64,
) -> Result<f64, EngineError> {
    if pressure < 0.0 {
        return Err(EngineError::InvalidInput {
            quantity: "operating pressure",
            value: pressure,
            constraint: "must not be negative",
        });
    }
    let tensor = thin_wall_stress_tensor(pressure, diameter, thickness)?;
    Ok(tensor.von_mises_stress())
}

/// Evaluates the full output record for one input record.
///
/// Range constraints are checked first ([`Assessment::validate`]); each model
/// then enforces its own formula preconditions. Either the whole record is
/// produced or the call fails, there is no partial success.
pub fn evaluate(input: &Assessment) -> Result<AssessmentResult, EngineError> {
    input.validate()?;
    let folias = folias_factor(input.length, input.diameter, input.thickness)?;
    let q = dnv_q_factor(input.corrosion_length, input.diameter, input.thickness)?;
    Ok(AssessmentResult {
        p_vm: von_mises_burst(input.thickness, input.diameter, input.ultimate_stress)?,
        p_tresca: tresca_burst(input.thickness, input.diameter, input.ultimate_stress)?,
        folias,
        p_asme_b31g: asme_b31g_burst(
            input.thickness,
            input.diameter,
            input.length,
            input.corrosion_depth,
            input.ultimate_stress,
        )?,
        q,
        p_dnv: dnv_burst(
            input.thickness,
            input.diameter,
            input.corrosion_length,
            input.corrosion_depth,
            input.ultimate_stress,
        )?,
        p_pcorrc: pcorrc_burst(
            input.thickness,
            input.diameter,
            input.corrosion_depth,
            input.ultimate_stress,
        )?,
        sigma_vm_max: operating_von_mises(
            input.max_operating_pressure,
            input.diameter,
            input.thickness,
        )?,
        sigma_vm_min: operating_von_mises(
            input.min_operating_pressure,
            input.diameter,
            input.thickness,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_case() -> Assessment {
        Assessment {
            thickness: 10.0,
            diameter: 300.0,
            length: 500.0,
            corrosion_length: 50.0,
            corrosion_depth: 2.0,
            yield_stress: 350.0,
            ultimate_stress: 450.0,
            max_operating_pressure: 10.0,
            min_operating_pressure: 0.0,
        }
    }

    #[test]
    fn test_reference_case_burst_pressures() {
        let result = evaluate(&reference_case()).unwrap();
        assert_relative_eq!(result.p_vm, 34.6410161514, epsilon = 1e-6);
        assert_relative_eq!(result.p_tresca, 30.0, epsilon = 1e-9);
        // L = 500 lies beyond sqrt(20*300*10) ~ 244.95, so ASME takes the
        // long-defect branch and matches PCORRC here.
        assert_relative_eq!(result.p_asme_b31g, 24.0, epsilon = 1e-9);
        assert_relative_eq!(result.p_pcorrc, 24.0, epsilon = 1e-9);
        assert_relative_eq!(result.folias, 2.8814870, epsilon = 1e-4);
        assert_relative_eq!(result.q, 1.1217546, epsilon = 1e-6);
        assert_relative_eq!(result.p_dnv, 30.21463, epsilon = 1e-3);
    }

    #[test]
    fn test_reference_case_operating_stresses() {
        let result = evaluate(&reference_case()).unwrap();
        // P1 = 150, P2 = 75, P3 = 0 at PopMax = 10 MPa.
        assert_relative_eq!(result.sigma_vm_max, 129.9038106, epsilon = 1e-4);
        assert_relative_eq!(result.sigma_vm_min, 0.0, epsilon = 1e-12);
        assert!(result.sigma_vm_max >= result.sigma_vm_min);
    }

    #[test]
    fn test_all_outputs_finite_and_non_negative() {
        let result = evaluate(&reference_case()).unwrap();
        for value in [
            result.p_vm,
            result.p_tresca,
            result.folias,
            result.p_asme_b31g,
            result.q,
            result.p_dnv,
            result.p_pcorrc,
            result.sigma_vm_max,
            result.sigma_vm_min,
        ] {
            assert!(value.is_finite());
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn test_asme_short_defect_branch() {
        // L = 100 < sqrt(20*300*10), the Folias-corrected form applies.
        let p = asme_b31g_burst(10.0, 300.0, 100.0, 2.0, 450.0).unwrap();
        assert_relative_eq!(p, 28.41530, epsilon = 1e-3);
        // The Folias correction must raise the estimate above the long form.
        let long = asme_b31g_burst(10.0, 300.0, 500.0, 2.0, 450.0).unwrap();
        assert!(p > long);
    }

    #[test]
    fn test_asme_branch_boundary_is_long() {
        // sqrt(20 * 250 * 8) = 200 exactly; the boundary takes the
        // long-defect branch.
        let p = asme_b31g_burst(8.0, 250.0, 200.0, 2.0, 450.0).unwrap();
        let long_form = 2.0 * 8.0 * 450.0 / 250.0 * (1.0 - 2.0 / 8.0);
        assert_relative_eq!(p, long_form, epsilon = 1e-12);
        assert_relative_eq!(p, 21.6, epsilon = 1e-9);
    }

    #[test]
    fn test_burst_pressure_decreases_with_corrosion_depth() {
        let depths = [1.0, 2.0, 4.0, 8.0];
        for models in [
            depths.map(|dc| asme_b31g_burst(10.0, 300.0, 500.0, dc, 450.0).unwrap()),
            depths.map(|dc| dnv_burst(10.0, 300.0, 50.0, dc, 450.0).unwrap()),
            depths.map(|dc| pcorrc_burst(10.0, 300.0, dc, 450.0).unwrap()),
        ] {
            for pair in models.windows(2) {
                assert!(pair[1] < pair[0], "deeper corrosion must lower burst pressure");
            }
        }
    }

    #[test]
    fn test_zero_corrosion_reduces_to_tresca_form() {
        let tresca = tresca_burst(10.0, 300.0, 450.0).unwrap();
        // Long-defect branch.
        let long = asme_b31g_burst(10.0, 300.0, 500.0, 0.0, 450.0).unwrap();
        // Short-defect branch.
        let short = asme_b31g_burst(10.0, 300.0, 100.0, 0.0, 450.0).unwrap();
        let pcorrc = pcorrc_burst(10.0, 300.0, 0.0, 450.0).unwrap();
        assert_relative_eq!(long, tresca, epsilon = 1e-12);
        assert_relative_eq!(short, tresca, epsilon = 1e-12);
        assert_relative_eq!(pcorrc, tresca, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_thickness_is_a_domain_error_naming_thickness() {
        let failures = [
            von_mises_burst(0.0, 300.0, 450.0),
            tresca_burst(0.0, 300.0, 450.0),
            folias_factor(500.0, 300.0, 0.0),
            asme_b31g_burst(0.0, 300.0, 500.0, 0.0, 450.0),
            dnv_burst(0.0, 300.0, 50.0, 0.0, 450.0),
            pcorrc_burst(0.0, 300.0, 0.0, 450.0),
            operating_von_mises(10.0, 300.0, 0.0),
        ];
        for failure in failures {
            match failure {
                Err(EngineError::Domain { quantity, value, .. }) => {
                    assert_eq!(quantity, "thickness");
                    assert_eq!(value, 0.0);
                }
                other => panic!("expected a domain error for t = 0, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_dnv_rejects_collapsed_mid_wall() {
        let err = dnv_burst(10.0, 10.0, 50.0, 2.0, 450.0).unwrap_err();
        match err {
            EngineError::Domain { quantity, .. } => {
                assert_eq!(quantity, "diameter - thickness")
            }
            other => panic!("expected a domain error for D = t, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_deep_corrosion_and_inverted_ranges() {
        let mut input = reference_case();
        input.corrosion_depth = 10.0;
        assert!(matches!(
            input.validate(),
            Err(EngineError::InvalidInput { quantity: "corrosion_depth", .. })
        ));

        let mut input = reference_case();
        input.ultimate_stress = 300.0;
        assert!(matches!(
            input.validate(),
            Err(EngineError::InvalidInput { quantity: "ultimate_stress", .. })
        ));

        let mut input = reference_case();
        input.min_operating_pressure = 12.0;
        assert!(matches!(
            input.validate(),
            Err(EngineError::InvalidInput { quantity: "max_operating_pressure", .. })
        ));

        let mut input = reference_case();
        input.thickness = -1.0;
        assert!(matches!(
            input.validate(),
            Err(EngineError::InvalidInput { quantity: "thickness", .. })
        ));
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let input = reference_case();
        let first = evaluate(&input).unwrap();
        let second = evaluate(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serializes_with_model_names() {
        let result = evaluate(&reference_case()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        for key in ["Pvm", "PTresca", "Folias", "PAsmeB31G", "Q", "PDnv", "PPcorrc", "SigmaVmMax", "SigmaVmMin"] {
            assert!(json.contains(key), "missing {} in {}", key, json);
        }
    }
}

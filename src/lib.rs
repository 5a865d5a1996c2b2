// src/lib.rs

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

pub mod app_logic;
pub mod batch;
pub mod config;
pub mod engine;
pub mod material;
pub mod stress;

// When the "wasm" feature is enabled, use wasm_bindgen to expose the engine to
// the host environment. The output record is flattened into a Vec in the order
// [Pvm, PTresca, Folias, PAsmeB31G, Q, PDnv, PPcorrc, SigmaVmMax, SigmaVmMin];
// an empty Vec signals a failed evaluation and leaves the messaging to the
// caller.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn assess_pipe(
    thickness: f64,
    diameter: f64,
    length: f64,
    corrosion_length: f64,
    corrosion_depth: f64,
    yield_stress: f64,
    ultimate_stress: f64,
    max_operating_pressure: f64,
    min_operating_pressure: f64,
) -> Vec<f64> {
    let input = engine::Assessment {
        thickness,
        diameter,
        length,
        corrosion_length,
        corrosion_depth,
        yield_stress,
        ultimate_stress,
        max_operating_pressure,
        min_operating_pressure,
    };
    match engine::evaluate(&input) {
        Ok(result) => vec![
            result.p_vm,
            result.p_tresca,
            result.folias,
            result.p_asme_b31g,
            result.q,
            result.p_dnv,
            result.p_pcorrc,
            result.sigma_vm_max,
            result.sigma_vm_min,
        ],
        Err(_) => Vec::new(),
    }
}

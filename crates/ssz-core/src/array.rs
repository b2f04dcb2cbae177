use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_finite, ensure_non_negative, invalid};
use crate::model::SszModel;
use crate::qubit::Qubit;
use crate::segment::Regime;

/// Ξ statistics across a qubit array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayUniformity {
    pub xi_mean: f64,
    /// Population standard deviation
    pub xi_std: f64,
    pub xi_min: f64,
    pub xi_max: f64,
    pub xi_range: f64,
    /// 1 − std/mean; 1.0 for a perfectly uniform array, 0 when mean is 0
    pub uniformity: f64,
}

/// Lay out `n` qubits on a centred square grid at one height.
///
/// All qubits share `base_height`, so the array is Ξ-uniform by
/// construction. The grid spans at most `max_separation` per side.
/// Ids are `Q000`, `Q001`, ... in row-major order.
pub fn optimize_qubit_array(n: usize, base_height: f64, max_separation: f64) -> Result<Vec<Qubit>> {
    ensure_finite("base height", base_height)?;
    ensure_non_negative("max separation", max_separation)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let n_side = (n as f64).sqrt().ceil() as usize;
    let spacing = max_separation / n_side as f64;
    let offset = (n_side - 1) as f64 * spacing / 2.0;

    Ok((0..n)
        .map(|i| {
            let row = i / n_side;
            let col = i % n_side;
            Qubit::new(
                format!("Q{i:03}"),
                col as f64 * spacing - offset,
                row as f64 * spacing - offset,
                base_height,
            )
        })
        .collect())
}

impl SszModel {
    /// Ξ mean/std/min/max/range and a uniformity score across `qubits`.
    ///
    /// `regime` is explicit: auto selection could mix formulas across an
    /// array and compare incomparable values.
    pub fn array_segment_uniformity(
        &self,
        qubits: &[Qubit],
        mass: f64,
        regime: Regime,
    ) -> Result<ArrayUniformity> {
        if qubits.is_empty() {
            return Err(invalid("qubit array is empty"));
        }
        let xi: Vec<f64> = qubits
            .iter()
            .map(|q| {
                q.validate_position()?;
                self.segment_density(self.radius_of(q), mass, regime)
            })
            .collect::<Result<_>>()?;

        let xi_min = xi.iter().copied().fold(f64::INFINITY, f64::min);
        let xi_max = xi.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let n = xi.len() as f64;

        // shifted by the minimum so identical values give exactly zero spread
        let shifted_mean = xi.iter().map(|v| v - xi_min).sum::<f64>() / n;
        let variance = xi
            .iter()
            .map(|v| {
                let d = v - xi_min - shifted_mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let xi_mean = xi_min + shifted_mean;
        let xi_std = variance.sqrt();

        let uniformity = if xi_mean > 0.0 {
            1.0 - xi_std / xi_mean
        } else {
            0.0
        };

        Ok(ArrayUniformity {
            xi_mean,
            xi_std,
            xi_min,
            xi_max,
            xi_range: xi_max - xi_min,
            uniformity,
        })
    }
}

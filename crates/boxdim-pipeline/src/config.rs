use crate::ReconstructError;
use boxdim_core::Real;
use boxdim_optim::SolveOptions;
use serde::{Deserialize, Serialize};

/// Parameters of the polygon extraction from the edge mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionParams {
    /// Douglas-Peucker tolerance as a fraction of the contour perimeter.
    pub epsilon_ratio: Real,
    /// Polygons with more vertices than this are discarded.
    pub max_vertices: usize,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            epsilon_ratio: 0.02,
            max_vertices: 6,
        }
    }
}

/// Levenberg-Marquardt settings for the pose refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseSolverConfig {
    pub max_iters: usize,
    pub ftol: Real,
    pub xtol: Real,
    pub gtol: Real,
}

impl Default for PoseSolverConfig {
    fn default() -> Self {
        let opts = SolveOptions::default();
        Self {
            max_iters: opts.max_iters,
            ftol: opts.ftol,
            xtol: opts.xtol,
            gtol: opts.gtol,
        }
    }
}

impl PoseSolverConfig {
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            max_iters: self.max_iters,
            ftol: self.ftol,
            gtol: self.gtol,
            xtol: self.xtol,
        }
    }
}

/// Largest rounding precision an `f64` dimension can still represent.
pub const MAX_ROUNDING_DECIMALS: u32 = 15;

/// Tunables shared by every reconstruction; per-image inputs live in
/// [`crate::ReconstructionRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub extraction: ExtractionParams,
    pub solver: PoseSolverConfig,
    /// Fractional digits kept in the metric dimensions.
    pub rounding_decimals: u32,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionParams::default(),
            solver: PoseSolverConfig::default(),
            rounding_decimals: 2,
        }
    }
}

impl ReconstructionConfig {
    /// Reject settings under which a stage could only produce NaN or nothing.
    pub fn validate(&self) -> Result<(), ReconstructError> {
        let ratio = self.extraction.epsilon_ratio;
        if !(ratio.is_finite() && ratio >= 0.0) {
            return Err(ReconstructError::InvalidConfig(format!(
                "epsilon_ratio must be finite and >= 0, got {ratio}"
            )));
        }
        if self.rounding_decimals > MAX_ROUNDING_DECIMALS {
            return Err(ReconstructError::InvalidConfig(format!(
                "rounding_decimals must be at most {MAX_ROUNDING_DECIMALS}, got {}",
                self.rounding_decimals
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ReconstructionConfig::default();
        assert_eq!(cfg.extraction.epsilon_ratio, 0.02);
        assert_eq!(cfg.extraction.max_vertices, 6);
        assert_eq!(cfg.solver.max_iters, 200);
        assert_eq!(cfg.solver.ftol, 1e-12);
        assert_eq!(cfg.rounding_decimals, 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ReconstructionConfig =
            serde_json::from_str(r#"{"solver": {"max_iters": 20}, "rounding_decimals": 1}"#)
                .unwrap();
        assert_eq!(cfg.solver.max_iters, 20);
        assert_eq!(cfg.solver.xtol, 1e-12);
        assert_eq!(cfg.extraction, ExtractionParams::default());
        assert_eq!(cfg.rounding_decimals, 1);
        assert_eq!(cfg.solver.solve_options().max_iters, 20);
    }

    #[test]
    fn validate_bounds_rounding_and_tolerance() {
        let mut cfg = ReconstructionConfig::default();
        assert_eq!(cfg.validate(), Ok(()));

        cfg.rounding_decimals = MAX_ROUNDING_DECIMALS;
        assert_eq!(cfg.validate(), Ok(()));
        cfg.rounding_decimals = 400;
        assert!(matches!(
            cfg.validate(),
            Err(ReconstructError::InvalidConfig(msg)) if msg.contains("rounding_decimals")
        ));

        let mut cfg = ReconstructionConfig::default();
        cfg.extraction.epsilon_ratio = Real::NAN;
        assert!(matches!(cfg.validate(), Err(ReconstructError::InvalidConfig(_))));
    }
}

//! Support Vector Regressor
//!
//! Kernel expansion over the fitted support vectors:
//! `f(x) = Σ αᵢ · K(svᵢ, x) + b`

use serde::{Deserialize, Serialize};

use super::regressors::{ModelKind, Regressor};

/// Kernel function, mirroring the sklearn `SVR(kernel=...)` options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Rbf { gamma: f64 },
    Linear,
    Poly { gamma: f64, coef0: f64, degree: u32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    pub fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Rbf { gamma } => {
                let sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
                (-gamma * sq).exp()
            }
            Kernel::Linear => dot(a, b),
            Kernel::Poly { gamma, coef0, degree } => {
                (gamma * dot(a, b) + coef0).powi(*degree as i32)
            }
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let gamma = match self {
            Kernel::Rbf { gamma } => *gamma,
            Kernel::Poly { gamma, degree, .. } => {
                if i32::try_from(*degree).is_err() {
                    return Err(format!("kernel degree {} out of range", degree));
                }
                *gamma
            }
            Kernel::Sigmoid { gamma, .. } => *gamma,
            Kernel::Linear => return Ok(()),
        };
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(format!("invalid kernel gamma {}", gamma));
        }
        Ok(())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Fitted epsilon-SVR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvrRegressor {
    pub n_features: usize,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    pub kernel: Kernel,
}

impl Regressor for SvrRegressor {
    fn kind(&self) -> ModelKind {
        ModelKind::Svr
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn max_feature(&self) -> Option<usize> {
        self.support_vectors
            .iter()
            .map(|sv| sv.len())
            .max()
            .and_then(|len| len.checked_sub(1))
    }

    fn predict_raw(&self, features: &[f64]) -> Option<f64> {
        if features.len() < self.n_features {
            return None;
        }
        let sum: f64 = self
            .support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, alpha)| alpha * self.kernel.eval(sv, features))
            .sum();
        Some(sum + self.intercept)
    }

    fn validate(&self) -> Result<(), String> {
        if self.support_vectors.is_empty() {
            return Err("no support vectors".into());
        }
        if self.support_vectors.len() != self.dual_coef.len() {
            return Err(format!(
                "{} support vectors but {} dual coefficients",
                self.support_vectors.len(),
                self.dual_coef.len()
            ));
        }
        if let Some(bad) = self.support_vectors.iter().position(|sv| sv.len() != self.n_features) {
            return Err(format!("support vector {} has wrong dimension", bad));
        }
        if !self.intercept.is_finite() {
            return Err("non-finite intercept".into());
        }
        self.kernel.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FEATURE_COUNT;

    fn svr(kernel: Kernel) -> SvrRegressor {
        SvrRegressor {
            n_features: FEATURE_COUNT,
            support_vectors: vec![vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]],
            dual_coef: vec![2.0, -1.0],
            intercept: 50.0,
            kernel,
        }
    }

    #[test]
    fn test_linear_kernel() {
        let model = svr(Kernel::Linear);
        // 2*0 + (-1)*6 + 50
        assert_eq!(model.predict(&[1.0; FEATURE_COUNT]).unwrap(), 44.0);
    }

    #[test]
    fn test_rbf_kernel() {
        let model = svr(Kernel::Rbf { gamma: 0.5 });
        // at the origin: 2*exp(0) - exp(-0.5*6) + 50
        let expected = 2.0 - (-3.0f64).exp() + 50.0;
        let got = model.predict(&[0.0; FEATURE_COUNT]).unwrap();
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_poly_and_sigmoid_kernels() {
        let k = Kernel::Poly { gamma: 1.0, coef0: 1.0, degree: 2 };
        assert_eq!(k.eval(&[1.0, 2.0], &[3.0, 4.0]), 144.0);
        let s = Kernel::Sigmoid { gamma: 1.0, coef0: 0.0 };
        assert_eq!(s.eval(&[0.0], &[5.0]), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(svr(Kernel::Rbf { gamma: 0.1 }).validate().is_ok());
        assert!(svr(Kernel::Rbf { gamma: 0.0 }).validate().is_err());

        let mut model = svr(Kernel::Linear);
        model.dual_coef.pop();
        assert!(model.validate().is_err());

        let mut model = svr(Kernel::Linear);
        model.support_vectors[1].push(0.0);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_poly_degree() {
        let poly = |degree| Kernel::Poly { gamma: 0.5, coef0: 1.0, degree };
        assert!(svr(poly(3)).validate().is_ok());
        assert!(svr(poly(i32::MAX as u32)).validate().is_ok());
        assert!(svr(poly(i32::MAX as u32 + 1)).validate().is_err());
        assert!(svr(poly(u32::MAX)).validate().is_err());
    }

    #[test]
    fn test_short_input_has_no_prediction() {
        let model = svr(Kernel::Linear);
        assert_eq!(model.predict_raw(&[1.0; 3]), None);
        assert_eq!(model.predict_raw(&[1.0; FEATURE_COUNT]), Some(44.0));
    }

    #[test]
    fn test_kernel_json() {
        let k: Kernel = serde_json::from_str(r#"{"type":"rbf","gamma":0.1666}"#).unwrap();
        assert_eq!(k, Kernel::Rbf { gamma: 0.1666 });
    }
}

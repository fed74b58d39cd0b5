//! Liquid sodium property correlations.
//!
//! Four independent closed-form fits in absolute temperature:
//!
//! ```text
//! ρ(T)  = ρ0 + ρ1 (1 - T/Tc) + ρ2 (1 - T/Tc)^½
//! k(T)  = k0 + k1 T + k2 T² + k3 T³
//! cp(T) = c0 + c1 θ + c2 θ²            θ = T - 273.15
//! μ(T)  = exp(m0 + m1 ln T + m2 / T)
//! ```
//!
//! Valid between the melting point and 2500 K. Outside that window the fits are
//! still evaluated (the result is physically meaningless) and a warning is logged.

use crate::error::{FluidError, FluidResult};
use crate::model::{MaterialState, PropertyModel};
use pf_core::units::constants::CELSIUS_OFFSET_K;
use pf_core::units::{
    Conductivity, Density, DynVisc, SpecHeatCapacity, Temperature, kgpm3, pas, wpmk,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Correlation coefficients and validity window.
#[derive(Clone, Debug, PartialEq)]
pub struct SodiumCoefficients {
    /// Critical temperature [K]
    pub critical_temperature_k: f64,
    /// Below this temperature the liquid correlations are extrapolated [K]
    pub solidification_k: f64,
    /// Upper end of the fitted range [K]
    pub max_valid_k: f64,
    /// ρ0, ρ1, ρ2 [kg/m³]
    pub density: [f64; 3],
    /// k0..k3 of the cubic conductivity fit
    pub conductivity: [f64; 4],
    /// c0..c2 of the quadratic specific heat fit (Celsius-shifted)
    pub specific_heat: [f64; 3],
    /// m0..m2 of the exponential viscosity fit
    pub viscosity: [f64; 3],
}

impl Default for SodiumCoefficients {
    fn default() -> Self {
        Self {
            critical_temperature_k: 2509.46,
            solidification_k: 370.87,
            max_valid_k: 2500.0,
            density: [219.0, 275.32, 511.58],
            conductivity: [124.67, -0.11381, 5.5226e-5, -1.1842e-8],
            specific_heat: [1436.72, -0.58, 4.627e-4],
            viscosity: [-6.4406, -0.3958, 556.835],
        }
    }
}

impl SodiumCoefficients {
    /// Check that the validity window is consistent.
    pub fn validate(&self) -> FluidResult<()> {
        if !self.critical_temperature_k.is_finite() || self.critical_temperature_k <= 0.0 {
            return Err(FluidError::InvalidCoefficients {
                what: "critical temperature must be positive",
            });
        }
        if !(self.solidification_k > 0.0 && self.solidification_k < self.max_valid_k) {
            return Err(FluidError::InvalidCoefficients {
                what: "solidification temperature must lie below the upper validity bound",
            });
        }
        if self.max_valid_k > self.critical_temperature_k {
            return Err(FluidError::InvalidCoefficients {
                what: "upper validity bound exceeds the critical temperature",
            });
        }
        Ok(())
    }
}

/// Liquid sodium property model.
///
/// Values are a pure function of temperature. The only interior state is a
/// counter of out-of-range evaluations, kept so callers can observe diagnostics
/// without scraping logs.
#[derive(Debug, Default)]
pub struct SodiumModel {
    coeffs: SodiumCoefficients,
    range_warnings: AtomicU64,
}

impl SodiumModel {
    /// Build a model from validated coefficients.
    pub fn new(coeffs: SodiumCoefficients) -> FluidResult<Self> {
        coeffs.validate()?;
        Ok(Self {
            coeffs,
            range_warnings: AtomicU64::new(0),
        })
    }

    pub fn coefficients(&self) -> &SodiumCoefficients {
        &self.coeffs
    }

    /// Emit one diagnostic if `t_k` lies outside the fitted range.
    fn check_range(&self, t_k: f64, what: &'static str) {
        let c = &self.coeffs;
        if t_k < c.solidification_k {
            self.range_warnings.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                temperature_k = t_k,
                solidification_k = c.solidification_k,
                property = what,
                "sodium below solidification temperature, extrapolating liquid correlation"
            );
        } else if t_k > c.max_valid_k {
            self.range_warnings.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                temperature_k = t_k,
                max_valid_k = c.max_valid_k,
                property = what,
                "sodium above correlation range, extrapolating"
            );
        }
    }

    fn rho_raw(&self, t_k: f64) -> f64 {
        let [r0, r1, r2] = self.coeffs.density;
        let x = 1.0 - t_k / self.coeffs.critical_temperature_k;
        r0 + r1 * x + r2 * x.sqrt()
    }

    fn k_raw(&self, t_k: f64) -> f64 {
        let [k0, k1, k2, k3] = self.coeffs.conductivity;
        k0 + t_k * (k1 + t_k * (k2 + t_k * k3))
    }

    fn cp_raw(&self, t_k: f64) -> f64 {
        let [c0, c1, c2] = self.coeffs.specific_heat;
        let theta = t_k - CELSIUS_OFFSET_K;
        c0 + c1 * theta + c2 * theta * theta
    }

    fn mu_raw(&self, t_k: f64) -> f64 {
        let [m0, m1, m2] = self.coeffs.viscosity;
        (m0 + m1 * t_k.ln() + m2 / t_k).exp()
    }
}

impl PropertyModel for SodiumModel {
    fn name(&self) -> &str {
        "sodium"
    }

    fn density(&self, t: Temperature) -> Density {
        self.check_range(t.value, "density");
        kgpm3(self.rho_raw(t.value))
    }

    fn viscosity(&self, t: Temperature) -> DynVisc {
        self.check_range(t.value, "viscosity");
        pas(self.mu_raw(t.value))
    }

    fn conductivity(&self, t: Temperature) -> Conductivity {
        self.check_range(t.value, "conductivity");
        wpmk(self.k_raw(t.value))
    }

    fn specific_heat(&self, t: Temperature) -> SpecHeatCapacity {
        self.check_range(t.value, "specific heat");
        self.cp_raw(t.value)
    }

    fn state(&self, t: Temperature) -> MaterialState {
        let t_k = t.value;
        self.check_range(t_k, "state");
        MaterialState {
            rho: kgpm3(self.rho_raw(t_k)),
            mu: pas(self.mu_raw(t_k)),
            k: wpmk(self.k_raw(t_k)),
            cp: self.cp_raw(t_k),
        }
    }

    fn range_warnings(&self) -> u64 {
        self.range_warnings.load(Ordering::Relaxed)
    }
}

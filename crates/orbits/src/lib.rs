//! Analytic Keplerian propagation: orbital elements in, parent-relative position out.
//!
//! Everything here is a pure function of `(elements, time)`. Positions come out in the
//! same distance unit as the semi-major axis, with the orbital plane remapped so that
//! the second component is "up".
use std::f64::consts::TAU;

use orrery_core::units::deg_to_rad;
use orrery_core::vector::{self, Vector3};
use thiserror::Error;

/// Newton-Raphson stops once the correction to `E` drops below this.
pub const KEPLER_TOLERANCE: f64 = 1.0e-8;
/// Hard cap on Newton-Raphson iterations; the solve never loops unbounded.
pub const KEPLER_MAX_ITERATIONS: u32 = 15;

/// Classical orbital elements of one body relative to its parent. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalParams {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub longitude_ascending_node: f64,
    pub argument_periapsis: f64,
    pub orbital_period: f64,
    pub mean_anomaly_at_epoch: f64,
}

/// Reasons a set of elements is rejected by [`OrbitalParams::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("orbital element `{0}` is not finite")]
    NonFinite(&'static str),
    #[error("semi-major axis must not be negative (got {0})")]
    NegativeSemiMajorAxis(f64),
    #[error("eccentricity {0} is outside the elliptic range [0, 1)")]
    EccentricityOutOfRange(f64),
    #[error("orbital period must be positive for a moving body (got {0})")]
    NonPositivePeriod(f64),
}

impl OrbitalParams {
    /// Elements of a body pinned to its parent's origin.
    pub fn stationary() -> Self {
        Self::default()
    }

    /// Circular, equatorial orbit starting at the reference direction.
    pub fn circular(semi_major_axis: f64, orbital_period: f64) -> Self {
        Self {
            semi_major_axis,
            orbital_period,
            ..Self::default()
        }
    }

    /// Build elements from catalog-style degrees.
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        orbital_period: f64,
        mean_anomaly_deg: f64,
        longitude_ascending_node_deg: f64,
        argument_periapsis_deg: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: deg_to_rad(inclination_deg),
            longitude_ascending_node: deg_to_rad(longitude_ascending_node_deg),
            argument_periapsis: deg_to_rad(argument_periapsis_deg),
            orbital_period,
            mean_anomaly_at_epoch: deg_to_rad(mean_anomaly_deg),
        }
    }

    /// True when the body never leaves its parent's origin.
    pub fn is_stationary(&self) -> bool {
        self.semi_major_axis == 0.0 || self.orbital_period == 0.0
    }

    /// Mean motion `2π / P`, or `None` for a stationary body.
    pub fn mean_motion(&self) -> Option<f64> {
        if self.is_stationary() {
            None
        } else {
            Some(TAU / self.orbital_period)
        }
    }

    /// Reject elements that would make the propagator produce NaNs or nonsense.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let fields = [
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination),
            ("longitude_ascending_node", self.longitude_ascending_node),
            ("argument_periapsis", self.argument_periapsis),
            ("orbital_period", self.orbital_period),
            ("mean_anomaly_at_epoch", self.mean_anomaly_at_epoch),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbitError::NonFinite(*name));
        }
        if self.semi_major_axis < 0.0 {
            return Err(OrbitError::NegativeSemiMajorAxis(self.semi_major_axis));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrbitError::EccentricityOutOfRange(self.eccentricity));
        }
        if self.orbital_period < 0.0 || (self.semi_major_axis > 0.0 && self.orbital_period == 0.0)
        {
            return Err(OrbitError::NonPositivePeriod(self.orbital_period));
        }
        Ok(())
    }
}

/// Outcome of a bounded Newton-Raphson solve of Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    pub iterations: u32,
    pub converged: bool,
}

/// Mean anomaly at `time`, wrapped into `[0, 2π)`. Zero for a stationary body.
pub fn mean_anomaly(params: &OrbitalParams, time: f64) -> f64 {
    match params.mean_motion() {
        Some(n) => (params.mean_anomaly_at_epoch + n * time).rem_euclid(TAU),
        None => 0.0,
    }
}

/// Solve `M = E - e sin E` for `E`, seeded at `E = M`.
///
/// Gives up after [`KEPLER_MAX_ITERATIONS`] or when the derivative `1 - e cos E`
/// vanishes (only possible for `e >= 1`) and returns the best estimate so far.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    let mut e_anom = mean_anomaly;
    for iteration in 1..=KEPLER_MAX_ITERATIONS {
        let derivative = 1.0 - eccentricity * e_anom.cos();
        if derivative == 0.0 || !derivative.is_finite() {
            return KeplerSolution {
                eccentric_anomaly: e_anom,
                iterations: iteration - 1,
                converged: false,
            };
        }
        let residual = mean_anomaly - (e_anom - eccentricity * e_anom.sin());
        let delta = residual / derivative;
        e_anom += delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: e_anom,
                iterations: iteration,
                converged: true,
            };
        }
    }
    KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations: KEPLER_MAX_ITERATIONS,
        converged: false,
    }
}

/// True anomaly from eccentric anomaly, using the half-angle `atan2` form.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * eccentric_anomaly;
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * half.sin(),
        (1.0 - eccentricity).sqrt() * half.cos(),
    )
}

/// Position relative to the parent body at `time`, Y-up.
pub fn position(params: &OrbitalParams, time: f64) -> Vector3 {
    if params.is_stationary() {
        return vector::ZERO;
    }

    let e = params.eccentricity;
    let m = mean_anomaly(params, time);
    let e_anom = solve_kepler(m, e).eccentric_anomaly;
    let v = true_anomaly(e_anom, e);
    let r = params.semi_major_axis * (1.0 - e * e_anom.cos());

    // argument of latitude
    let u = v + params.argument_periapsis;
    let (sin_u, cos_u) = u.sin_cos();
    let (sin_node, cos_node) = params.longitude_ascending_node.sin_cos();
    let (sin_i, cos_i) = params.inclination.sin_cos();

    let x = r * (cos_node * cos_u - sin_node * sin_u * cos_i);
    let y_orbit = r * (sin_node * cos_u + cos_node * sin_u * cos_i);
    let z = r * (sin_i * sin_u);

    [x, z, y_orbit]
}

/// Sample the idealized closed orbit by sweeping mean anomaly over one revolution.
///
/// Returns an empty path for a stationary body.
pub fn orbit_path(params: &OrbitalParams, segments: usize) -> Vec<Vector3> {
    if params.is_stationary() {
        return Vec::new();
    }
    (0..segments)
        .map(|i| {
            let sample = OrbitalParams {
                mean_anomaly_at_epoch: TAU * i as f64 / segments as f64,
                ..*params
            };
            position(&sample, 0.0)
        })
        .collect()
}

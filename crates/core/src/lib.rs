//! Core units, constants, and shared primitives for the orrery workspace.

/// Simulation constants. Distances are in AU and time in Julian years unless stated otherwise.
pub mod constants {
    /// Days per Julian year.
    pub const DAYS_PER_YEAR: f64 = 365.25;
    /// Gravitational constant tuned for the visual scale of the N-body mode.
    pub const DEFAULT_GRAVITY_CONSTANT: f64 = 1.0e-4;
    /// Squared softening length added to every pairwise separation.
    pub const DEFAULT_SOFTENING_SQ: f64 = 1.0e-3;
    /// Separations below this distance exert no force at all.
    pub const DEFAULT_MIN_SEPARATION: f64 = 1.0e-4;
    /// Mass assigned to the central root body when none is supplied.
    pub const DEFAULT_STAR_MASS: f64 = 1.0e6;
    /// Finite-difference step used to seed velocities from the analytic orbits.
    pub const DEFAULT_VELOCITY_PROBE_DT: f64 = 1.0e-4;
    /// Physics sub-steps per rendered frame.
    pub const DEFAULT_SUBSTEPS: u32 = 4;
    /// Clock rate: one simulated day per real second.
    pub const DEFAULT_TIME_SCALE: f64 = 1.0 / DAYS_PER_YEAR;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::DAYS_PER_YEAR;

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Convert days to years.
    #[inline]
    pub fn days_to_years(days: f64) -> f64 {
        days / DAYS_PER_YEAR
    }

    /// Convert years to days.
    #[inline]
    pub fn years_to_days(years: f64) -> f64 {
        years * DAYS_PER_YEAR
    }
}

/// Simulated time bookkeeping shared by the driver and front-ends.
pub mod time {
    use super::constants::DEFAULT_TIME_SCALE;

    /// Simulation clock advanced by real elapsed time scaled by `time_scale`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SimulationClock {
        time: f64,
        time_scale: f64,
        paused: bool,
    }

    impl SimulationClock {
        pub fn new(time_scale: f64) -> Self {
            Self {
                time: 0.0,
                time_scale,
                paused: false,
            }
        }

        /// Advance by `real_dt` seconds of wall time. Does nothing while paused.
        pub fn advance(&mut self, real_dt: f64) {
            if !self.paused {
                self.time += real_dt * self.time_scale;
            }
        }

        pub fn time(&self) -> f64 {
            self.time
        }

        pub fn set_time(&mut self, time: f64) {
            self.time = time;
        }

        pub fn time_scale(&self) -> f64 {
            self.time_scale
        }

        pub fn set_time_scale(&mut self, scale: f64) {
            self.time_scale = scale;
        }

        pub fn is_paused(&self) -> bool {
            self.paused
        }

        pub fn set_paused(&mut self, paused: bool) {
            self.paused = paused;
        }
    }

    impl Default for SimulationClock {
        fn default() -> Self {
            Self::new(DEFAULT_TIME_SCALE)
        }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU or AU/year depending on context.
    pub type Vector3 = [f64; 3];

    /// The zero vector.
    pub const ZERO: Vector3 = [0.0; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        norm_squared(v).sqrt()
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn norm_squared(v: &Vector3) -> f64 {
        dot(v, v)
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// `a + b * s`, the accumulate step used by the integrator.
    #[inline]
    pub fn add_scaled(a: &Vector3, b: &Vector3, s: f64) -> Vector3 {
        [a[0] + b[0] * s, a[1] + b[1] * s, a[2] + b[2] * s]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }
}

//! Direct-summation N-body integrator over a [`BodyForest`].
//!
//! Gravity ignores the tree: every body pulls on every other body. The cost is O(n²)
//! per step, which is fine for the tens of bodies a planetary system holds.

use orrery_config::PhysicsConfig;
use orrery_core::constants::{
    DEFAULT_GRAVITY_CONSTANT, DEFAULT_MIN_SEPARATION, DEFAULT_SOFTENING_SQ, DEFAULT_STAR_MASS,
    DEFAULT_VELOCITY_PROBE_DT,
};
use orrery_core::vector::{self, Vector3};
use tracing::{debug, trace};

use crate::body::BodyForest;

/// Softened-gravity, semi-implicit Euler integrator. Holds tuning only, no body state.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSimulator {
    gravity_constant: f64,
    softening_sq: f64,
    min_separation: f64,
    star_mass: f64,
    velocity_probe_dt: f64,
}

impl Default for PhysicsSimulator {
    fn default() -> Self {
        Self {
            gravity_constant: DEFAULT_GRAVITY_CONSTANT,
            softening_sq: DEFAULT_SOFTENING_SQ,
            min_separation: DEFAULT_MIN_SEPARATION,
            star_mass: DEFAULT_STAR_MASS,
            velocity_probe_dt: DEFAULT_VELOCITY_PROBE_DT,
        }
    }
}

impl PhysicsSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuning taken from the `[physics]` config table.
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            gravity_constant: config.gravity_constant,
            softening_sq: config.softening_sq,
            min_separation: config.min_separation,
            star_mass: config.star_mass,
            velocity_probe_dt: config.velocity_probe_dt,
        }
    }

    pub fn gravity_constant(&self) -> f64 {
        self.gravity_constant
    }

    /// Override G, e.g. to make a unit orbit close in one period.
    pub fn set_gravity_constant(&mut self, g: f64) {
        self.gravity_constant = g;
    }

    pub fn softening_sq(&self) -> f64 {
        self.softening_sq
    }

    /// Mass given to the first root body when it has no explicit mass.
    pub fn star_mass(&self) -> f64 {
        self.star_mass
    }

    /// Seed every body's physics state from the analytic orbits at `time`.
    ///
    /// Positions and velocities are absolute: each body adds its parent's world state.
    /// Velocity is a forward difference over `velocity_probe_dt`. Mass is the explicit
    /// override when present, otherwise `radius³`, except that the first root gets the
    /// configured star mass.
    pub fn initialize_from_orbits(&self, forest: &mut BodyForest, time: f64) {
        let probe = self.velocity_probe_dt;
        let first_root = forest.roots().first().copied();
        let mut world: Vec<(Vector3, Vector3)> =
            vec![(vector::ZERO, vector::ZERO); forest.len()];

        for id in forest.depth_first() {
            let Some(body) = forest.get(id) else {
                continue;
            };
            let local = body.position(time);
            let ahead = body.position(time + probe);
            let local_velocity = vector::scale(&vector::sub(&ahead, &local), 1.0 / probe);

            let (parent_position, parent_velocity) = body
                .parent()
                .map(|parent| world[parent.index()])
                .unwrap_or((vector::ZERO, vector::ZERO));
            let position = vector::add(&parent_position, &local);
            let velocity = vector::add(&parent_velocity, &local_velocity);
            world[id.index()] = (position, velocity);

            let mass = match body.mass_override() {
                Some(mass) => mass,
                None if Some(id) == first_root => self.star_mass,
                None => body.radius().powi(3),
            };

            if let Some(body) = forest.get_mut(id) {
                let state = body.physics_mut();
                state.position = position;
                state.velocity = velocity;
                state.mass = mass;
            }
        }

        debug!(bodies = forest.len(), time, "physics state seeded from orbits");
    }

    /// Gravitational acceleration on every body, indexed like the forest.
    pub fn accelerations(&self, forest: &BodyForest) -> Vec<Vector3> {
        let states: Vec<(Vector3, f64)> = forest
            .iter()
            .map(|(_, body)| (body.physics_position(), body.mass()))
            .collect();
        let mut accelerations = vec![vector::ZERO; states.len()];

        for i in 0..states.len() {
            let (position_i, mass_i) = states[i];
            for j in (i + 1)..states.len() {
                let (position_j, mass_j) = states[j];
                let separation = vector::sub(&position_j, &position_i);
                let dist_sq = vector::norm_squared(&separation);
                let dist = dist_sq.sqrt();
                if dist < self.min_separation {
                    continue;
                }
                let force_mag = self.gravity_constant / (dist_sq + self.softening_sq);
                let direction = vector::scale(&separation, 1.0 / dist);

                accelerations[i] =
                    vector::add_scaled(&accelerations[i], &direction, force_mag * mass_j);
                accelerations[j] =
                    vector::add_scaled(&accelerations[j], &direction, -force_mag * mass_i);
            }
        }

        accelerations
    }

    /// Advance every body by `dt`: velocity first, then position with the new velocity.
    pub fn update(&self, forest: &mut BodyForest, dt: f64) {
        let accelerations = self.accelerations(forest);
        for ((_, body), acceleration) in forest.iter_mut().zip(accelerations) {
            let state = body.physics_mut();
            state.velocity = vector::add_scaled(&state.velocity, &acceleration, dt);
            state.position = vector::add_scaled(&state.position, &state.velocity, dt);
        }
        trace!(bodies = forest.len(), dt, "physics step");
    }

    /// Total linear momentum. Pairwise forces cancel, so `update` preserves it.
    pub fn total_momentum(&self, forest: &BodyForest) -> Vector3 {
        forest.iter().fold(vector::ZERO, |sum, (_, body)| {
            vector::add_scaled(&sum, &body.physics_velocity(), body.mass())
        })
    }

    /// Mass-weighted mean of physics positions, or `None` for a massless forest.
    pub fn center_of_mass(&self, forest: &BodyForest) -> Option<Vector3> {
        let total_mass: f64 = forest.iter().map(|(_, body)| body.mass()).sum();
        if total_mass <= 0.0 {
            return None;
        }
        let weighted = forest.iter().fold(vector::ZERO, |sum, (_, body)| {
            vector::add_scaled(&sum, &body.physics_position(), body.mass())
        });
        Some(vector::scale(&weighted, 1.0 / total_mass))
    }
}

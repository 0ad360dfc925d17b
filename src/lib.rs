//! Celestial-body simulation core for planetarium-style front-ends.
//!
//! Bodies move either analytically along fixed Keplerian orbits or under mutual
//! N-body gravity. Rendering, input, and asset loading live elsewhere and talk to
//! this crate through [`system::SolarSystem`] and the [`system::SystemSource`] seam.

pub mod body;
pub mod catalog;
pub mod physics;
pub mod system;

pub use orrery_config as config;
pub use orrery_core::{constants, time, units, vector};
pub use orrery_export as export;
pub use orrery_orbits as orbits;

pub use body::{BodyError, BodyForest, BodyId, BodySpec, BodyType, CelestialBody, PhysicsState};
pub use physics::PhysicsSimulator;
pub use system::{SimulationMode, SolarSystem, SystemData, SystemError, SystemSource};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

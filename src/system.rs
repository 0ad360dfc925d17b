//! System orchestration: owns the body forest and switches between kinematic and N-body motion.

use orrery_core::vector::Vector3;
use orrery_export::snapshot::{BodySample, Snapshot};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::body::{BodyError, BodyForest, BodyId, BodySpec};
use crate::physics::PhysicsSimulator;

/// Display multiplier for orbital distances when no other value is supplied.
pub const DEFAULT_SYSTEM_SCALE: f32 = 10.0;
/// Display multiplier for body radii when no other value is supplied.
pub const DEFAULT_PLANET_SCALE: f32 = 1.0;

/// How body positions are produced. The mode applies to the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    /// Analytic Keplerian positions evaluated on demand.
    #[default]
    Kinematic,
    /// Numerically integrated mutual gravity.
    NBody,
}

impl SimulationMode {
    /// Lower-case name used in exports and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Kinematic => "kinematic",
            Self::NBody => "n-body",
        }
    }
}

/// A fully parsed system as handed over by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemData {
    pub name: String,
    pub system_scale: f32,
    pub planet_scale: f32,
    pub bodies: Vec<BodySpec>,
}

impl SystemData {
    /// Data with the default display scales.
    pub fn new(name: impl Into<String>, bodies: Vec<BodySpec>) -> Self {
        Self {
            name: name.into(),
            system_scale: DEFAULT_SYSTEM_SCALE,
            planet_scale: DEFAULT_PLANET_SCALE,
            bodies,
        }
    }
}

/// Errors surfaced while loading or building a system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("system '{0}' not found")]
    NotFound(String),
    #[error("invalid body data: {0}")]
    InvalidBody(#[from] BodyError),
}

/// Source of system definitions (asset files, a built-in catalog, a test fixture...).
pub trait SystemSource {
    /// Load the system called `name`.
    fn load(&self, name: &str) -> Result<SystemData, SystemError>;

    /// Names this source can load.
    fn available(&self) -> Vec<String>;
}

/// The aggregate root: one loaded system, its mode, and the integrator tuning.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    name: String,
    forest: BodyForest,
    mode: SimulationMode,
    simulator: PhysicsSimulator,
    system_scale: f32,
    planet_scale: f32,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new(PhysicsSimulator::default())
    }
}

impl SolarSystem {
    /// An empty system in kinematic mode.
    pub fn new(simulator: PhysicsSimulator) -> Self {
        Self {
            name: String::new(),
            forest: BodyForest::new(),
            mode: SimulationMode::Kinematic,
            simulator,
            system_scale: DEFAULT_SYSTEM_SCALE,
            planet_scale: DEFAULT_PLANET_SCALE,
        }
    }

    /// Build a system directly from loader output.
    pub fn from_data(data: SystemData, simulator: PhysicsSimulator) -> Result<Self, SystemError> {
        let mut system = Self::new(simulator);
        system.reload(data)?;
        Ok(system)
    }

    /// Fetch `name` from `source` and replace the current system with it.
    pub fn load_system(&mut self, source: &dyn SystemSource, name: &str) -> Result<(), SystemError> {
        let data = source.load(name)?;
        self.reload(data)
    }

    /// Replace the forest wholesale and return to kinematic mode.
    ///
    /// On error the previously loaded system is left untouched.
    pub fn reload(&mut self, data: SystemData) -> Result<(), SystemError> {
        let forest = BodyForest::from_specs(data.bodies)?;
        info!(system = %data.name, bodies = forest.len(), "system loaded");
        self.name = data.name;
        self.forest = forest;
        self.system_scale = data.system_scale;
        self.planet_scale = data.planet_scale;
        self.mode = SimulationMode::Kinematic;
        Ok(())
    }

    /// Switch modes. Entering N-body mode seeds physics state from the orbits at `time`;
    /// leaving it discards nothing and kinematic reads resume from the original elements.
    /// Requesting the current mode is a no-op.
    pub fn set_physics_enabled(&mut self, enabled: bool, time: f64) {
        match (self.mode, enabled) {
            (SimulationMode::Kinematic, true) => {
                self.simulator.initialize_from_orbits(&mut self.forest, time);
                self.mode = SimulationMode::NBody;
                debug!(time, "entered n-body mode");
            }
            (SimulationMode::NBody, false) => {
                self.mode = SimulationMode::Kinematic;
                debug!(time, "returned to kinematic mode");
            }
            _ => {}
        }
    }

    /// True in N-body mode.
    pub fn is_physics_enabled(&self) -> bool {
        self.mode == SimulationMode::NBody
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    /// One integration step of `dt`. Does nothing in kinematic mode.
    pub fn update_physics(&mut self, dt: f64) {
        if self.mode == SimulationMode::NBody {
            self.simulator.update(&mut self.forest, dt);
        } else {
            trace!("physics update ignored in kinematic mode");
        }
    }

    /// Split `frame_dt` into `substeps` equal updates. Zero sub-steps count as one.
    pub fn update_physics_substepped(&mut self, frame_dt: f64, substeps: u32) {
        let substeps = substeps.max(1);
        let dt = frame_dt / f64::from(substeps);
        for _ in 0..substeps {
            self.update_physics(dt);
        }
    }

    /// Position of `id` in the active mode: integrated state in N-body mode, the
    /// analytic world position at `time` otherwise.
    pub fn body_position(&self, id: BodyId, time: f64) -> Option<Vector3> {
        match self.mode {
            SimulationMode::NBody => self.forest.get(id).map(|body| body.physics_position()),
            SimulationMode::Kinematic => self.forest.world_position(id, time),
        }
    }

    /// Name of the loaded system, empty before the first load.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bodies(&self) -> &BodyForest {
        &self.forest
    }

    /// The central body, by convention the first root.
    pub fn sun(&self) -> Option<BodyId> {
        self.forest.roots().first().copied()
    }

    /// Display multiplier for orbital distances.
    pub fn system_scale(&self) -> f32 {
        self.system_scale
    }

    /// Display multiplier for body radii.
    pub fn planet_scale(&self) -> f32 {
        self.planet_scale
    }

    pub fn simulator(&self) -> &PhysicsSimulator {
        &self.simulator
    }

    /// Integrator tuning. Changes apply from the next update.
    pub fn simulator_mut(&mut self) -> &mut PhysicsSimulator {
        &mut self.simulator
    }

    /// Positions of every body at `time` in the active mode, depth-first.
    pub fn snapshot(&self, time: f64) -> Snapshot {
        let bodies = self
            .forest
            .depth_first()
            .into_iter()
            .filter_map(|id| {
                let body = self.forest.get(id)?;
                let position = self.body_position(id, time)?;
                let velocity = self.is_physics_enabled().then_some(body.physics_velocity());
                let parent = body
                    .parent()
                    .and_then(|parent| self.forest.get(parent))
                    .map(|parent| parent.name().to_string());
                Some(BodySample {
                    name: body.name().to_string(),
                    body_type: body.body_type().label().to_string(),
                    parent,
                    position,
                    velocity,
                })
            })
            .collect();

        Snapshot {
            system: self.name.clone(),
            time,
            mode: self.mode.label().to_string(),
            bodies,
        }
    }
}

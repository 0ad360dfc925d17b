//! Celestial bodies and the arena that owns them.
//!
//! Bodies form a forest (stars at the roots, planets and moons below them). The
//! [`BodyForest`] owns every node; parent/child links are [`BodyId`] indices into it,
//! so a reload simply drops the old forest and every id with it.

use orrery_core::vector::{self, Vector3};
use orrery_orbits::{self as orbits, OrbitError, OrbitalParams};
use thiserror::Error;

/// RGB display colour in `[0, 1]`.
pub type Color = [f32; 3];

/// Handle to a body inside one [`BodyForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Position of the body in its forest's storage.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Coarse classification used by front-ends and for defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyType {
    Star,
    #[default]
    Planet,
    Moon,
    DwarfPlanet,
    Asteroid,
    Comet,
    BlackHole,
    Other,
}

impl BodyType {
    /// Parse a catalog label. Unknown labels fall back to [`BodyType::Planet`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "star" => Self::Star,
            "planet" => Self::Planet,
            "moon" => Self::Moon,
            "dwarf_planet" => Self::DwarfPlanet,
            "asteroid" => Self::Asteroid,
            "comet" => Self::Comet,
            "black_hole" => Self::BlackHole,
            "other" => Self::Other,
            _ => Self::Planet,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Star => "Star",
            Self::Planet => "Planet",
            Self::Moon => "Moon",
            Self::DwarfPlanet => "Dwarf Planet",
            Self::Asteroid => "Asteroid",
            Self::Comet => "Comet",
            Self::BlackHole => "Black Hole",
            Self::Other => "Other",
        }
    }
}

/// Absolute world-space state used only while N-body mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsState {
    pub position: Vector3,
    pub velocity: Vector3,
    pub mass: f64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BodyError {
    #[error("body '{name}' has invalid orbital elements: {source}")]
    InvalidOrbit {
        name: String,
        #[source]
        source: OrbitError,
    },
    #[error("body '{name}' has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f64 },
    #[error("body '{name}' has invalid mass {mass}")]
    InvalidMass { name: String, mass: f64 },
    #[error("no body with id {0:?} in this system")]
    UnknownBody(BodyId),
}

/// Fully parsed description of a body and its satellites, as handed over by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub name: String,
    pub radius: f64,
    pub color: Color,
    /// `None` means "Planet" for roots and "Moon" for children.
    pub body_type: Option<BodyType>,
    pub orbit: OrbitalParams,
    /// Explicit mass; derived from the radius when absent.
    pub mass: Option<f64>,
    pub children: Vec<BodySpec>,
}

impl BodySpec {
    pub fn new(name: impl Into<String>, radius: f64, color: Color, orbit: OrbitalParams) -> Self {
        Self {
            name: name.into(),
            radius,
            color,
            body_type: None,
            orbit,
            mass: None,
            children: Vec::new(),
        }
    }

    pub fn with_type(mut self, body_type: BodyType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_child(mut self, child: BodySpec) -> Self {
        self.children.push(child);
        self
    }
}

/// One node of the body forest.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    name: String,
    radius: f64,
    color: Color,
    body_type: BodyType,
    orbit: OrbitalParams,
    mass_override: Option<f64>,
    parent: Option<BodyId>,
    children: Vec<BodyId>,
    physics: PhysicsState,
}

impl CelestialBody {
    /// Validate and build a detached body. Links are set when it is inserted into a forest.
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        color: Color,
        orbit: OrbitalParams,
        body_type: BodyType,
    ) -> Result<Self, BodyError> {
        let name = name.into();
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(BodyError::InvalidRadius { name, radius });
        }
        if let Err(source) = orbit.validate() {
            return Err(BodyError::InvalidOrbit { name, source });
        }
        let physics = PhysicsState {
            mass: radius * radius * radius,
            ..PhysicsState::default()
        };
        Ok(Self {
            name,
            radius,
            color,
            body_type,
            orbit,
            mass_override: None,
            parent: None,
            children: Vec::new(),
            physics,
        })
    }

    /// Pin the physical mass instead of deriving it from the radius.
    pub fn with_mass(mut self, mass: f64) -> Result<Self, BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::InvalidMass {
                name: self.name,
                mass,
            });
        }
        self.mass_override = Some(mass);
        self.physics.mass = mass;
        Ok(self)
    }

    /// Position relative to the parent at `time`, from the analytic orbit.
    pub fn position(&self, time: f64) -> Vector3 {
        orbits::position(&self.orbit, time)
    }

    /// Display name as given by the loader.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Radius in Earth radii, before any display scaling.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Stars and black holes are both treated as the luminous/central kind.
    pub fn is_star(&self) -> bool {
        matches!(self.body_type, BodyType::Star | BodyType::BlackHole)
    }

    /// Elements relative to the parent (or the origin for a root).
    pub fn orbital_params(&self) -> &OrbitalParams {
        &self.orbit
    }

    /// Mass given explicitly at load time, if any.
    pub fn mass_override(&self) -> Option<f64> {
        self.mass_override
    }

    /// `None` for a root.
    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    /// Direct satellites in insertion order.
    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    /// Integrator state. Only meaningful after N-body mode has been entered.
    pub fn physics(&self) -> &PhysicsState {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsState {
        &mut self.physics
    }

    /// Absolute integrated position.
    pub fn physics_position(&self) -> Vector3 {
        self.physics.position
    }

    /// Absolute integrated velocity.
    pub fn physics_velocity(&self) -> Vector3 {
        self.physics.velocity
    }

    /// Gravitational mass used by the integrator.
    pub fn mass(&self) -> f64 {
        self.physics.mass
    }

    pub fn set_physics_position(&mut self, position: Vector3) {
        self.physics.position = position;
    }

    pub fn set_physics_velocity(&mut self, velocity: Vector3) {
        self.physics.velocity = velocity;
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.physics.mass = mass;
    }
}

/// Arena owning every body of a system.
///
/// A child is always inserted after its parent, so `parent < child` for every link and
/// the structure cannot contain a cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyForest {
    bodies: Vec<CelestialBody>,
    roots: Vec<BodyId>,
}

impl BodyForest {
    /// An empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from nested loader output, validating every body.
    pub fn from_specs(specs: Vec<BodySpec>) -> Result<Self, BodyError> {
        let mut forest = Self::new();
        for spec in specs {
            forest.insert_spec(None, spec)?;
        }
        Ok(forest)
    }

    fn insert_spec(&mut self, parent: Option<BodyId>, spec: BodySpec) -> Result<BodyId, BodyError> {
        let default_type = if parent.is_some() {
            BodyType::Moon
        } else {
            BodyType::Planet
        };
        let mut body = CelestialBody::new(
            spec.name,
            spec.radius,
            spec.color,
            spec.orbit,
            spec.body_type.unwrap_or(default_type),
        )?;
        if let Some(mass) = spec.mass {
            body = body.with_mass(mass)?;
        }
        let id = match parent {
            Some(parent) => self.add_child(parent, body)?,
            None => self.add_root(body),
        };
        for child in spec.children {
            self.insert_spec(Some(id), child)?;
        }
        Ok(id)
    }

    /// Insert a top-level body.
    pub fn add_root(&mut self, mut body: CelestialBody) -> BodyId {
        let id = BodyId(self.bodies.len());
        body.parent = None;
        body.children.clear();
        self.bodies.push(body);
        self.roots.push(id);
        id
    }

    /// Take ownership of `body` and attach it under `parent`.
    pub fn add_child(&mut self, parent: BodyId, mut body: CelestialBody) -> Result<BodyId, BodyError> {
        if parent.0 >= self.bodies.len() {
            return Err(BodyError::UnknownBody(parent));
        }
        let id = BodyId(self.bodies.len());
        body.parent = Some(parent);
        body.children.clear();
        self.bodies.push(body);
        self.bodies[parent.0].children.push(id);
        Ok(id)
    }

    /// Number of bodies across all trees.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Top-level bodies in load order. The first one is the system's primary.
    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id.0)
    }

    /// Satellites of `id`, empty for an unknown id.
    pub fn children(&self, id: BodyId) -> &[BodyId] {
        self.get(id).map(CelestialBody::children).unwrap_or(&[])
    }

    /// All bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut CelestialBody)> {
        self.bodies
            .iter_mut()
            .enumerate()
            .map(|(i, b)| (BodyId(i), b))
    }

    /// Ids in depth-first pre-order: each root followed by its subtree.
    pub fn depth_first(&self) -> Vec<BodyId> {
        let mut order = Vec::with_capacity(self.bodies.len());
        let mut stack: Vec<BodyId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// First body named `name`, in depth-first order.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.depth_first()
            .into_iter()
            .find(|id| self.bodies[id.0].name == name)
    }

    /// Parent-relative analytic position of `id`.
    pub fn local_position(&self, id: BodyId, time: f64) -> Option<Vector3> {
        self.get(id).map(|body| body.position(time))
    }

    /// Absolute analytic position: the body's own offset plus every ancestor's.
    pub fn world_position(&self, id: BodyId, time: f64) -> Option<Vector3> {
        let mut body = self.get(id)?;
        let mut world = body.position(time);
        while let Some(parent) = body.parent {
            body = &self.bodies[parent.0];
            world = vector::add(&world, &body.position(time));
        }
        Some(world)
    }
}

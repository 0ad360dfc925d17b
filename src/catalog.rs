//! Built-in system definitions.
//!
//! Distances are in AU, periods in Julian years, radii in Earth radii. Angles are
//! given here in degrees as published. Solar System elements are J2000 values.

use orrery_core::units::days_to_years;
use orrery_orbits::OrbitalParams;

use crate::body::{BodySpec, BodyType, Color};
use crate::system::{SystemData, SystemError, SystemSource};

pub const SOLAR_SYSTEM: &str = "Solar System";
pub const TRAPPIST_1: &str = "TRAPPIST-1";
pub const BLACK_HOLE: &str = "Black Hole";
pub const BINARY_STAR: &str = "Binary Star";

/// A named instant worth jumping the clock to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricEvent {
    pub label: &'static str,
    /// Years since J2000.
    pub time: f64,
}

const SOLAR_SYSTEM_EVENTS: &[HistoricEvent] = &[
    HistoricEvent {
        label: "Great Conjunction (2020)",
        time: 20.972,
    },
    HistoricEvent {
        label: "Total Solar Eclipse (2017)",
        time: 17.638,
    },
    HistoricEvent {
        label: "Venus Transit (2012)",
        time: 12.427,
    },
    HistoricEvent {
        label: "Shoemaker-Levy 9 (1994)",
        time: -5.460,
    },
    HistoricEvent {
        label: "Voyager 2 Neptune (1989)",
        time: -10.353,
    },
];

/// Presets for `system`, empty when it has none.
pub fn historic_events(system: &str) -> &'static [HistoricEvent] {
    if system == SOLAR_SYSTEM {
        SOLAR_SYSTEM_EVENTS
    } else {
        &[]
    }
}

/// How a front-end should group a system in its picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    /// A star (or stars) with orbiting planets.
    Planetary,
    /// A showcase scenario such as a black hole or a close binary.
    SpecialEvent,
}

/// Grouping for a catalog system name. Unknown names count as planetary.
pub fn system_kind(system: &str) -> SystemKind {
    if system == BLACK_HOLE || system == BINARY_STAR {
        SystemKind::SpecialEvent
    } else {
        SystemKind::Planetary
    }
}

/// Systems compiled into the binary. Names match case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl SystemSource for BuiltinCatalog {
    fn load(&self, name: &str) -> Result<SystemData, SystemError> {
        let builders: [(&str, fn() -> SystemData); 4] = [
            (SOLAR_SYSTEM, solar_system),
            (TRAPPIST_1, trappist_1),
            (BLACK_HOLE, black_hole),
            (BINARY_STAR, binary_star),
        ];
        builders
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, build)| build())
            .ok_or_else(|| SystemError::NotFound(name.to_string()))
    }

    fn available(&self) -> Vec<String> {
        [SOLAR_SYSTEM, TRAPPIST_1, BLACK_HOLE, BINARY_STAR]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

fn planet(name: &str, radius: f64, color: Color, elements: [f64; 7]) -> BodySpec {
    let [a, e, i, period, mean_anomaly, node, periapsis] = elements;
    BodySpec::new(
        name,
        radius,
        color,
        OrbitalParams::from_degrees(a, e, i, period, mean_anomaly, node, periapsis),
    )
    .with_type(BodyType::Planet)
}

/// The Sun, the eight planets, and Earth's Moon.
pub fn solar_system() -> SystemData {
    // elements: a, e, i, period, M0, node, argument of periapsis
    let moon = BodySpec::new(
        "Moon",
        0.273,
        [0.8, 0.8, 0.8],
        OrbitalParams::from_degrees(
            0.002_57,
            0.0549,
            5.145,
            days_to_years(27.321_66),
            134.96,
            125.08,
            318.15,
        ),
    );

    let bodies = vec![
        BodySpec::new("Sun", 109.0, [1.0, 1.0, 0.0], OrbitalParams::stationary())
            .with_type(BodyType::Star),
        planet(
            "Mercury",
            0.38,
            [0.7, 0.7, 0.7],
            [0.387, 0.2056, 7.00, 0.2408, 174.79, 48.33, 29.12],
        ),
        planet(
            "Venus",
            0.95,
            [0.9, 0.8, 0.5],
            [0.723, 0.0068, 3.39, 0.6152, 50.11, 76.68, 54.85],
        ),
        planet(
            "Earth",
            1.0,
            [0.2, 0.4, 0.9],
            [1.000, 0.0167, 0.00, 1.0000, 357.52, -11.26, 102.94],
        )
        .with_child(moon),
        planet(
            "Mars",
            0.53,
            [0.8, 0.4, 0.3],
            [1.524, 0.0934, 1.85, 1.8808, 19.41, 49.58, 286.50],
        ),
        planet(
            "Jupiter",
            11.2,
            [0.8, 0.7, 0.6],
            [5.203, 0.0484, 1.30, 11.862, 20.02, 100.55, 273.87],
        ),
        planet(
            "Saturn",
            9.45,
            [0.9, 0.8, 0.6],
            [9.537, 0.0541, 2.49, 29.457, 317.02, 113.72, 339.39],
        ),
        planet(
            "Uranus",
            4.0,
            [0.6, 0.8, 0.9],
            [19.191, 0.0472, 0.77, 84.011, 142.59, 74.00, 96.66],
        ),
        planet(
            "Neptune",
            3.88,
            [0.3, 0.3, 0.8],
            [30.069, 0.0086, 1.77, 164.79, 260.25, 131.78, 272.85],
        ),
    ];

    SystemData::new(SOLAR_SYSTEM, bodies)
}

/// TRAPPIST-1 and its seven transiting planets.
///
/// Periods, semi-major axes and radii are the published transit fits. Eccentricities
/// and periapsis arguments come from the transit-timing solution. Inclinations are
/// measured from the common orbital plane (90° minus the sky-plane value). Phases are
/// not constrained, so every planet starts at periapsis.
pub fn trappist_1() -> SystemData {
    // a, e, i, period (days), periapsis, radius
    let planets: [(&str, [f64; 6]); 7] = [
        ("TRAPPIST-1b", [0.011_54, 0.006_22, 0.272, 1.510_826, 336.86, 1.116]),
        ("TRAPPIST-1c", [0.015_80, 0.006_54, 0.222, 2.421_937, 282.45, 1.097]),
        ("TRAPPIST-1d", [0.022_27, 0.008_37, 0.104, 4.049_219, 351.27, 0.788]),
        ("TRAPPIST-1e", [0.029_25, 0.005_10, 0.207, 6.101_013, 108.37, 0.920]),
        ("TRAPPIST-1f", [0.038_49, 0.010_07, 0.260, 9.207_540, 8.81, 1.045]),
        ("TRAPPIST-1g", [0.046_83, 0.002_08, 0.258, 12.352_446, 191.34, 1.129]),
        ("TRAPPIST-1h", [0.061_89, 0.005_67, 0.195, 18.772_866, 338.92, 0.755]),
    ];

    let mut bodies = vec![
        BodySpec::new("TRAPPIST-1", 13.0, [1.0, 0.45, 0.3], OrbitalParams::stationary())
            .with_type(BodyType::Star),
    ];
    bodies.extend(planets.into_iter().map(|(name, [a, e, i, days, peri, radius])| {
        planet(
            name,
            radius,
            [0.75, 0.6, 0.5],
            [a, e, i, days_to_years(days), 0.0, 0.0, peri],
        )
    }));

    let mut data = SystemData::new(TRAPPIST_1, bodies);
    data.system_scale = 200.0;
    data
}

/// Sgr A* with the S-stars S2 and S38 on their observed orbits.
///
/// Elements are the published astrometric fits, with angular semi-major axes
/// converted to AU at 8.32 kpc. Mean anomalies at J2000 come from the periapsis
/// epochs (S2: 2002.33, S38: 2003.19).
pub fn black_hole() -> SystemData {
    let bodies = vec![
        BodySpec::new("Sgr A*", 40.0, [0.05, 0.0, 0.1], OrbitalParams::stationary())
            .with_type(BodyType::BlackHole),
        BodySpec::new(
            "S2",
            12.0,
            [0.7, 0.8, 1.0],
            OrbitalParams::from_degrees(1044.2, 0.8839, 134.18, 16.00, 307.58, 226.94, 65.51),
        )
        .with_type(BodyType::Star),
        BodySpec::new(
            "S38",
            9.0,
            [1.0, 0.85, 0.6],
            OrbitalParams::from_degrees(1178.1, 0.8201, 171.1, 19.2, 300.19, 101.06, 17.99),
        )
        .with_type(BodyType::Star),
    ];

    let mut data = SystemData::new(BLACK_HOLE, bodies);
    data.system_scale = 0.02;
    data
}

/// Two stars on a shared circular orbit around their barycentre, plus a
/// circumbinary planet.
///
/// The stars sit on opposite sides of the origin with separations split in inverse
/// proportion to their masses (1e6 and 6e5), so the barycentre stays fixed.
/// The primary is the first root and takes the configured star mass.
pub fn binary_star() -> SystemData {
    let bodies = vec![
        BodySpec::new(
            "Binary A",
            100.0,
            [1.0, 0.9, 0.6],
            OrbitalParams::from_degrees(0.375, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0),
        )
        .with_type(BodyType::Star),
        BodySpec::new(
            "Binary B",
            80.0,
            [1.0, 0.55, 0.3],
            OrbitalParams::from_degrees(0.625, 0.0, 0.0, 1.0, 180.0, 0.0, 0.0),
        )
        .with_type(BodyType::Star)
        .with_mass(6.0e5),
        planet(
            "Circumbinary b",
            1.2,
            [0.4, 0.6, 0.8],
            [3.0, 0.05, 2.0, 4.11, 90.0, 0.0, 0.0],
        ),
    ];

    SystemData::new(BINARY_STAR, bodies)
}

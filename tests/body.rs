use orrery::orbits::{OrbitError, OrbitalParams};
use orrery::vector;
use orrery::{BodyError, BodyForest, BodySpec, BodyType, CelestialBody};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

fn three_level_specs() -> Vec<BodySpec> {
    let moon = BodySpec::new(
        "Moon",
        0.27,
        WHITE,
        OrbitalParams {
            eccentricity: 0.05,
            inclination: 0.09,
            mean_anomaly_at_epoch: 2.0,
            ..OrbitalParams::circular(0.05, 0.08)
        },
    );
    let planet = BodySpec::new(
        "Planet",
        1.0,
        WHITE,
        OrbitalParams {
            eccentricity: 0.1,
            argument_periapsis: 0.7,
            ..OrbitalParams::circular(1.0, 1.0)
        },
    )
    .with_child(moon);
    let star = BodySpec::new("Star", 10.0, WHITE, OrbitalParams::stationary())
        .with_type(BodyType::Star);
    vec![star, planet]
}

#[test]
fn moon_world_position_composes_parent_offsets() {
    let forest = BodyForest::from_specs(three_level_specs()).expect("forest");
    let planet = forest.find("Planet").expect("planet");
    let moon = forest.find("Moon").expect("moon");

    for t in [0.0, 0.013, 0.4, 2.75] {
        let expected = vector::add(
            &forest.get(planet).unwrap().position(t),
            &forest.get(moon).unwrap().position(t),
        );
        let world = forest.world_position(moon, t).expect("world position");
        assert!(vector::distance(&world, &expected) < 1e-12, "t = {t}");
        assert_eq!(
            forest.world_position(planet, t),
            forest.local_position(planet, t)
        );
    }
}

#[test]
fn children_point_back_at_their_parent() {
    let forest = BodyForest::from_specs(three_level_specs()).expect("forest");
    let planet = forest.find("Planet").unwrap();
    let moon = forest.find("Moon").unwrap();

    assert_eq!(forest.roots().len(), 2);
    assert_eq!(forest.children(planet), &[moon]);
    assert_eq!(forest.get(moon).unwrap().parent(), Some(planet));
    assert_eq!(forest.get(planet).unwrap().parent(), None);
    assert!(moon > planet, "children are stored after their parent");
}

#[test]
fn body_types_default_by_depth() {
    let forest = BodyForest::from_specs(three_level_specs()).expect("forest");
    let types: Vec<BodyType> = forest
        .depth_first()
        .into_iter()
        .map(|id| forest.get(id).unwrap().body_type())
        .collect();
    assert_eq!(types, vec![BodyType::Star, BodyType::Planet, BodyType::Moon]);

    let star = forest.get(forest.roots()[0]).unwrap();
    assert!(star.is_star());
    assert!(!forest.get(forest.find("Moon").unwrap()).unwrap().is_star());
}

#[test]
fn depth_first_visits_subtrees_before_siblings() {
    let mut forest = BodyForest::new();
    let make = |name: &str| {
        CelestialBody::new(name, 1.0, WHITE, OrbitalParams::stationary(), BodyType::Other)
            .expect("body")
    };
    let a = forest.add_root(make("a"));
    let b = forest.add_root(make("b"));
    let a1 = forest.add_child(a, make("a1")).unwrap();
    let b1 = forest.add_child(b, make("b1")).unwrap();
    let a1x = forest.add_child(a1, make("a1x")).unwrap();
    let a2 = forest.add_child(a, make("a2")).unwrap();

    assert_eq!(forest.depth_first(), vec![a, a1, a1x, a2, b, b1]);
    assert_eq!(forest.len(), 6);
}

#[test]
fn find_returns_first_match_in_depth_first_order() {
    let forest = BodyForest::from_specs(three_level_specs()).expect("forest");
    assert_eq!(forest.find("Star"), Some(forest.roots()[0]));
    assert_eq!(forest.find("Pluto"), None);
}

#[test]
fn adding_under_unknown_parent_fails() {
    let mut forest = BodyForest::new();
    let other = BodyForest::from_specs(three_level_specs()).expect("forest");
    let foreign = other.find("Moon").unwrap();
    let body = CelestialBody::new("x", 1.0, WHITE, OrbitalParams::stationary(), BodyType::Comet)
        .unwrap();
    assert_eq!(
        forest.add_child(foreign, body),
        Err(BodyError::UnknownBody(foreign))
    );
    assert!(forest.is_empty());
}

#[test]
fn invalid_bodies_are_rejected_at_construction() {
    let bad_radius = CelestialBody::new(
        "Shrunk",
        -1.0,
        WHITE,
        OrbitalParams::stationary(),
        BodyType::Planet,
    );
    assert!(matches!(bad_radius, Err(BodyError::InvalidRadius { .. })));

    let hyperbolic = OrbitalParams {
        eccentricity: 1.2,
        ..OrbitalParams::circular(1.0, 1.0)
    };
    let bad_orbit = BodyForest::from_specs(vec![BodySpec::new("Comet", 0.1, WHITE, hyperbolic)]);
    assert_eq!(
        bad_orbit,
        Err(BodyError::InvalidOrbit {
            name: "Comet".to_string(),
            source: OrbitError::EccentricityOutOfRange(1.2),
        })
    );

    let massless = BodySpec::new("Ghost", 1.0, WHITE, OrbitalParams::stationary()).with_mass(0.0);
    assert!(matches!(
        BodyForest::from_specs(vec![massless]),
        Err(BodyError::InvalidMass { .. })
    ));
}

#[test]
fn mass_defaults_to_radius_cubed_unless_overridden() {
    let derived = CelestialBody::new("A", 2.0, WHITE, OrbitalParams::stationary(), BodyType::Planet)
        .unwrap();
    assert_eq!(derived.mass(), 8.0);
    assert_eq!(derived.mass_override(), None);

    let pinned = derived.with_mass(5.5).unwrap();
    assert_eq!(pinned.mass(), 5.5);
    assert_eq!(pinned.mass_override(), Some(5.5));
}

#[test]
fn body_type_labels_round_trip_through_catalog_names() {
    let cases = [
        ("star", BodyType::Star),
        ("planet", BodyType::Planet),
        ("moon", BodyType::Moon),
        ("dwarf_planet", BodyType::DwarfPlanet),
        ("asteroid", BodyType::Asteroid),
        ("comet", BodyType::Comet),
        ("black_hole", BodyType::BlackHole),
        ("other", BodyType::Other),
    ];
    for (label, expected) in cases {
        assert_eq!(BodyType::from_label(label), expected);
    }
    assert_eq!(BodyType::from_label("quasar"), BodyType::Planet);
    assert_eq!(BodyType::DwarfPlanet.label(), "Dwarf Planet");
}

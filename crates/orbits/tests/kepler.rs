use std::f64::consts::{FRAC_PI_2, PI, TAU};

use orrery_core::vector::{self, norm};
use orrery_orbits::{
    KEPLER_MAX_ITERATIONS, OrbitError, OrbitalParams, mean_anomaly, orbit_path, position,
    solve_kepler, true_anomaly,
};

fn inclined(eccentricity: f64, period: f64) -> OrbitalParams {
    OrbitalParams {
        semi_major_axis: 1.7,
        eccentricity,
        inclination: 0.4,
        longitude_ascending_node: 1.1,
        argument_periapsis: 2.3,
        orbital_period: period,
        mean_anomaly_at_epoch: 0.25,
    }
}

#[test]
fn stationary_body_stays_at_origin() {
    let sun = OrbitalParams {
        eccentricity: 0.3,
        orbital_period: 1.0,
        ..OrbitalParams::stationary()
    };
    for t in [-50.0, 0.0, 0.3, 12.5, 1.0e6] {
        assert_eq!(position(&sun, t), vector::ZERO);
    }
    // zero period is guarded even with a non-zero axis
    let pinned = OrbitalParams::circular(2.0, 0.0);
    assert_eq!(position(&pinned, 3.0), vector::ZERO);
}

#[test]
fn position_repeats_after_one_period() {
    for e in [0.0, 0.1, 0.45, 0.7, 0.9] {
        let params = inclined(e, 2.75);
        for t in [-3.1, 0.0, 0.4, 1.9, 40.2] {
            let a = position(&params, t);
            let b = position(&params, t + params.orbital_period);
            let gap = vector::distance(&a, &b);
            assert!(gap < 1e-5, "e = {e}, t = {t}: drift {gap}");
        }
    }
}

#[test]
fn circular_orbit_keeps_constant_radius() {
    let params = OrbitalParams {
        eccentricity: 0.0,
        ..inclined(0.0, 0.6)
    };
    for step in 0..200 {
        let t = step as f64 * 0.0137;
        let r = norm(&position(&params, t));
        assert!(
            (r - params.semi_major_axis).abs() < 1e-12,
            "t = {t}: radius {r}"
        );
    }
}

#[test]
fn kepler_solver_satisfies_equation() {
    for e in [0.0, 0.3, 0.7, 0.95] {
        for k in 0..720 {
            let m = TAU * k as f64 / 720.0;
            let solution = solve_kepler(m, e);
            let e_anom = solution.eccentric_anomaly;
            let residual = (m - (e_anom - e * e_anom.sin())).abs();
            assert!(
                residual < 1e-6,
                "e = {e}, M = {m}: residual {residual} after {} iterations",
                solution.iterations
            );
            assert!(solution.iterations <= KEPLER_MAX_ITERATIONS);
        }
    }
}

#[test]
fn kepler_solver_terminates_outside_elliptic_range() {
    for e in [0.999_999, 1.0, 1.5, 25.0] {
        for m in [0.0, 1.0e-3, 0.5, PI, 5.9] {
            let solution = solve_kepler(m, e);
            assert!(solution.iterations <= KEPLER_MAX_ITERATIONS);
        }
    }
    // e = 1 at M = 0 has a vanishing derivative; the solve bails out immediately
    let degenerate = solve_kepler(0.0, 1.0);
    assert!(!degenerate.converged);
    assert_eq!(degenerate.iterations, 0);

    let params = OrbitalParams {
        eccentricity: 1.0,
        ..OrbitalParams::circular(1.0, 1.0)
    };
    // Parabolic limit: the solve still converges away from M = 0 and the half-angle
    // form pins the true anomaly to apoapsis, so the body sits on the -x axis.
    let solution = solve_kepler(TAU * 0.37, 1.0);
    assert!(solution.converged);
    let expected_r = 1.0 - solution.eccentric_anomaly.cos();
    let p = position(&params, 0.37);
    assert!(p.iter().all(|c| c.is_finite()), "position {p:?}");
    assert!((p[0] + expected_r).abs() < 1e-9, "position {p:?}");
    assert!(p[1].abs() < 1e-9 && p[2].abs() < 1e-9, "position {p:?}");
}

#[test]
fn periapsis_and_apoapsis_distances() {
    let mut params = OrbitalParams {
        eccentricity: 0.5,
        ..OrbitalParams::circular(2.0, 3.0)
    };
    assert!((norm(&position(&params, 0.0)) - 1.0).abs() < 1e-12);
    params.mean_anomaly_at_epoch = PI;
    assert!((norm(&position(&params, 0.0)) - 3.0).abs() < 1e-9);
    assert!((true_anomaly(PI, 0.5).abs() - PI).abs() < 1e-12);
}

#[test]
fn equatorial_orbit_stays_in_horizontal_plane() {
    let params = OrbitalParams {
        eccentricity: 0.2,
        longitude_ascending_node: 0.8,
        argument_periapsis: 1.4,
        ..OrbitalParams::circular(1.0, 1.0)
    };
    for step in 0..50 {
        let p = position(&params, step as f64 * 0.021);
        assert!(p[1].abs() < 1e-12, "up component {}", p[1]);
    }
}

#[test]
fn inclined_orbit_rises_along_up_axis() {
    let params = OrbitalParams {
        inclination: FRAC_PI_2,
        mean_anomaly_at_epoch: FRAC_PI_2,
        ..OrbitalParams::circular(1.0, 1.0)
    };
    let p = position(&params, 0.0);
    assert!(p[0].abs() < 1e-12);
    assert!((p[1] - 1.0).abs() < 1e-12);
    assert!(p[2].abs() < 1e-12);
}

#[test]
fn mean_anomaly_wraps_into_one_revolution() {
    let params = OrbitalParams {
        mean_anomaly_at_epoch: 6.0,
        ..OrbitalParams::circular(1.0, 2.0)
    };
    for t in [-7.3, -0.1, 0.0, 0.9, 100.0] {
        let m = mean_anomaly(&params, t);
        assert!((0.0..TAU).contains(&m), "t = {t}: M = {m}");
    }
    assert_eq!(mean_anomaly(&OrbitalParams::stationary(), 4.0), 0.0);
}

#[test]
fn orbit_path_traces_the_ellipse() {
    let params = inclined(0.3, 5.0);
    let path = orbit_path(&params, 256);
    assert_eq!(path.len(), 256);
    let periapsis = params.semi_major_axis * (1.0 - params.eccentricity);
    let apoapsis = params.semi_major_axis * (1.0 + params.eccentricity);
    for point in &path {
        let r = norm(point);
        assert!(r >= periapsis - 1e-9 && r <= apoapsis + 1e-9, "r = {r}");
    }
    let start = OrbitalParams {
        mean_anomaly_at_epoch: 0.0,
        ..params
    };
    assert_eq!(path[0], position(&start, 0.0));
    assert!(orbit_path(&OrbitalParams::stationary(), 128).is_empty());
}

#[test]
fn validation_rejects_bad_elements() {
    assert!(OrbitalParams::stationary().validate().is_ok());
    assert!(OrbitalParams::from_degrees(1.0, 0.0167, 0.0, 1.0, 357.52, -11.26, 102.94)
        .validate()
        .is_ok());
    assert_eq!(
        OrbitalParams::circular(-1.0, 1.0).validate(),
        Err(OrbitError::NegativeSemiMajorAxis(-1.0))
    );
    let open = OrbitalParams {
        eccentricity: 1.0,
        ..OrbitalParams::circular(1.0, 1.0)
    };
    assert_eq!(open.validate(), Err(OrbitError::EccentricityOutOfRange(1.0)));
    assert_eq!(
        OrbitalParams::circular(1.0, 0.0).validate(),
        Err(OrbitError::NonPositivePeriod(0.0))
    );
    let nan = OrbitalParams {
        inclination: f64::NAN,
        ..OrbitalParams::circular(1.0, 1.0)
    };
    assert_eq!(nan.validate(), Err(OrbitError::NonFinite("inclination")));
}

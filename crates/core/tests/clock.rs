use orrery_core::constants::DAYS_PER_YEAR;
use orrery_core::time::SimulationClock;
use orrery_core::units::{days_to_years, years_to_days};
use orrery_core::vector;

#[test]
fn default_clock_runs_one_day_per_second() {
    let mut clock = SimulationClock::default();
    clock.advance(1.0);
    assert!((years_to_days(clock.time()) - 1.0).abs() < 1e-12);
    clock.advance(DAYS_PER_YEAR - 1.0);
    assert!((clock.time() - 1.0).abs() < 1e-12, "time = {}", clock.time());
}

#[test]
fn paused_clock_holds_time() {
    let mut clock = SimulationClock::new(2.0);
    clock.set_time(17.638);
    clock.set_paused(true);
    clock.advance(10.0);
    assert_eq!(clock.time(), 17.638);
    clock.set_paused(false);
    clock.advance(0.5);
    assert!((clock.time() - 18.638).abs() < 1e-12);
}

#[test]
fn time_scale_can_be_changed_mid_run() {
    let mut clock = SimulationClock::new(days_to_years(1.0));
    clock.advance(365.25);
    clock.set_time_scale(0.0);
    clock.advance(100.0);
    assert!((clock.time() - 1.0).abs() < 1e-12);
}

#[test]
fn vector_helpers_behave() {
    let a = [3.0, 4.0, 0.0];
    let b = [1.0, 1.0, 1.0];
    assert_eq!(vector::norm(&a), 5.0);
    assert_eq!(vector::norm_squared(&a), 25.0);
    assert_eq!(vector::dot(&a, &b), 7.0);
    assert_eq!(vector::add_scaled(&a, &b, 2.0), [5.0, 6.0, 2.0]);
    assert_eq!(vector::distance(&a, &vector::ZERO), 5.0);
}

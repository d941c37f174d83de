use std::time::Duration;

use conway::{LifeEngine, Pattern, RunState, SoloConfig, SoloEngine};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn running(pattern: &Pattern) -> SoloEngine {
    let mut engine = SoloEngine::default();
    engine.seed_pattern(pattern);
    assert!(engine.toggle_pause());
    engine
}

#[test]
fn starts_paused_and_refuses_to_step() {
    let mut engine = SoloEngine::default();
    assert_eq!(engine.state(), RunState::Paused);
    assert_eq!(engine.status(), "PAUSED");
    assert!(engine.step().is_none());
}

#[test]
fn block_stays_put() {
    let block = Pattern::new("block", vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    let mut engine = running(&block);
    let before = engine.grid().clone();
    let report = engine.step().unwrap();
    assert_eq!(engine.grid(), &before);
    assert_eq!((report.births, report.deaths, report.population), (0, 0, 4));
}

#[test]
fn blinker_returns_every_two_steps() {
    let blinker = Pattern::new("blinker", vec![(0, 0), (1, 0), (2, 0)]);
    let mut engine = running(&blinker);
    let row = engine.grid().clone();
    assert!(row.is_alive((-1, 0)) && row.is_alive((1, 0)));

    let report = engine.step().unwrap();
    assert!(engine.grid().is_alive((0, -1)) && engine.grid().is_alive((0, 1)));
    assert_eq!((report.births, report.deaths), (2, 2));

    engine.step();
    assert_eq!(engine.grid(), &row);
    assert_eq!(engine.generation(), 2);
}

#[test]
fn seeding_twice_gives_the_same_board() {
    let glider = conway::patterns::builtin()
        .into_iter()
        .find(|p| p.name == "Glider")
        .unwrap();
    let mut engine = SoloEngine::default();
    engine.toggle_cell_at((40, 40), true);
    engine.seed_pattern(&glider);
    let first = engine.grid().clone();
    assert!(!first.is_alive((40, 40)));

    engine.seed_pattern(&glider);
    assert_eq!(engine.grid(), &first);
    assert_eq!(first.len(), 5);
}

#[test]
fn cell_edits_only_while_paused() {
    let mut engine = SoloEngine::default();
    assert!(engine.toggle_cell_at((3, 3), true));
    assert!(engine.grid().is_alive((3, 3)));
    assert!(engine.toggle_cell_at((3, 3), false));
    assert!(engine.grid().is_empty());

    engine.toggle_pause();
    assert!(!engine.toggle_cell_at((3, 3), true));
    assert!(engine.grid().is_empty());
}

#[test]
fn edits_made_while_paused_are_simulated() {
    let mut engine = SoloEngine::default();
    for x in 0..3 {
        engine.toggle_cell_at((x, 10), true);
    }
    engine.toggle_pause();
    engine.step();
    let grid = engine.grid();
    assert_eq!(grid.len(), 3);
    assert!(grid.is_alive((1, 9)) && grid.is_alive((1, 10)) && grid.is_alive((1, 11)));
}

#[test]
fn speed_is_clamped_at_the_minimum() {
    let mut engine = SoloEngine::new(&SoloConfig { update_interval: 0.1, ..SoloConfig::default() });
    for _ in 0..5 {
        engine.faster();
    }
    assert!((engine.update_interval() - 0.05).abs() < 1e-6);
    assert_eq!(engine.speed_text(), "Time of change: 0.05");

    engine.speed_adjust(10.0);
    assert!((engine.update_interval() - 10.05).abs() < 1e-4);
    assert!(engine.interval().as_secs_f32() > 10.0);
}

#[test]
fn random_fill_is_seedable_and_paused_only() {
    let mut a = SoloEngine::new(&SoloConfig { fill_percent: 40, ..SoloConfig::default() });
    let mut b = a.clone();
    assert!(a.random_fill((-10, -10), (10, 10), &mut StdRng::seed_from_u64(3)));
    assert!(b.random_fill((-10, -10), (10, 10), &mut StdRng::seed_from_u64(3)));
    assert_eq!(a.grid(), b.grid());
    assert!(!a.grid().is_empty());

    a.toggle_pause();
    let before = a.grid().clone();
    assert!(!a.random_fill((0, 0), (5, 5), &mut StdRng::seed_from_u64(4)));
    assert_eq!(a.grid(), &before);
}

#[test]
fn clear_resets_generation() {
    let blinker = Pattern::new("blinker", vec![(0, 0), (1, 0), (2, 0)]);
    let mut engine = running(&blinker);
    engine.step();
    engine.toggle_pause();
    engine.clear();
    assert!(engine.grid().is_empty());
    assert_eq!(engine.generation(), 0);
}

#[test]
fn huge_intervals_saturate_instead_of_panicking() {
    let mut engine = SoloEngine::default();
    engine.speed_adjust(1e20);
    assert_eq!(engine.interval(), Duration::MAX);

    engine.speed_adjust(f32::INFINITY);
    assert_eq!(engine.interval(), Duration::MAX);
    engine.slower();
    assert_eq!(engine.interval(), Duration::MAX);
}

//! Drill scenarios with pinned-down outcomes.

use evac_core::{Point2D, Rect, SimConfig, World};

/// One agent with a fixed spawn point and unjittered speed
fn single_agent_config(spawn: Point2D, exit: Point2D, obstacles: Vec<Rect>) -> SimConfig {
    let mut config = SimConfig::default();
    config.agents.count = 1;
    config.agents.base_speed = 1.0;
    config.agents.speed_jitter = 0.0;
    config.agents.spawn_min = spawn;
    config.agents.spawn_max = spawn;
    config.arena.exits = vec![exit];
    config.arena.obstacles = obstacles;
    config
}

#[test]
fn test_agent_on_exit_evacuates_first_tick() {
    let exit = Point2D::new(850.0, 120.0);
    let mut world = World::seeded(single_agent_config(exit, exit, vec![]), 1).unwrap();
    world.set_alarm();

    world.tick();

    assert!(world.agents()[0].is_evacuated());
    assert_eq!(world.evacuated_count(), 1);
    assert!(world.all_evacuated());
}

#[test]
fn test_agent_walled_off_never_moves() {
    let start = Point2D::new(195.0, 300.0);
    let wall = Rect::new(200.0, 200.0, 20.0, 200.0);
    let config = single_agent_config(start, Point2D::new(400.0, 300.0), vec![wall]);
    let mut world = World::seeded(config, 1).unwrap();
    world.set_alarm();

    for _ in 0..500 {
        let report = world.tick();
        assert_eq!(report.steps.blocked, 1);
        assert_eq!(world.agents()[0].position(), start);
        assert!(!world.agents()[0].is_evacuated());
    }
}

#[test]
fn test_unobstructed_agent_reaches_exit() {
    let config = single_agent_config(Point2D::new(100.0, 300.0), Point2D::new(400.0, 300.0), vec![]);
    let mut world = World::seeded(config, 1).unwrap();
    world.set_alarm();

    let mut ticks = 0;
    while !world.all_evacuated() {
        world.tick();
        ticks += 1;
        assert!(ticks < 1000, "agent never arrived");
    }
    // 300 units at 1 per tick, arriving inside the 12 unit radius
    assert_eq!(ticks, 289);
}

#[test]
fn test_hazard_grows_one_cell_per_interval() {
    let mut config = SimConfig::default();
    config.agents.count = 5;
    let mut world = World::seeded(config, 2024).unwrap();
    world.start_hazard(Point2D::new(450.0, 300.0));

    // time_step 0.1 and interval 2.0: one spread every 20 ticks
    for k in 0..10 {
        assert_eq!(world.active_hazard_cell_count(), 1 + k);
        for _ in 0..10 {
            world.tick();
        }
        assert_eq!(world.active_hazard_cell_count(), 1 + k);
        for _ in 0..10 {
            world.tick();
        }
    }
    assert_eq!(world.active_hazard_cell_count(), 11);
    assert_eq!(world.hazard().cells()[0], Point2D::new(450.0, 300.0));
}

#[test]
fn test_reset_mid_drill_restores_initial_state() {
    let mut config = SimConfig::default();
    config.agents.count = 20;
    config.arena.obstacles.clear();
    let mut world = World::seeded(config.clone(), 77).unwrap();
    world.set_alarm();
    world.start_hazard_at_ignition();
    for _ in 0..1500 {
        world.tick();
    }
    assert!(world.evacuated_count() > 0);
    assert!(world.hazard().is_active());

    let world = world.reset(config).unwrap();

    assert!(!world.alarm_on());
    assert!(!world.hazard().is_active());
    assert!(world.hazard().cells().is_empty());
    assert_eq!(world.agents().len(), 20);
    assert_eq!(world.evacuated_count(), 0);
    assert!(world.agents().iter().all(|a| a.panic() == 0.0));
}

#[test]
fn test_reset_draws_fresh_agents() {
    let config = SimConfig::default();
    let world = World::seeded(config.clone(), 5).unwrap();
    let before: Vec<Point2D> = world.agents().iter().map(|a| a.position()).collect();
    let world = world.reset(config).unwrap();
    let after: Vec<Point2D> = world.agents().iter().map(|a| a.position()).collect();
    assert_ne!(before, after);
}

#[test]
fn test_reset_with_invalid_config_fails() {
    let world = World::seeded(SimConfig::default(), 5).unwrap();
    let mut bad = SimConfig::default();
    bad.arena.exits.clear();
    assert!(world.reset(bad).is_err());
}

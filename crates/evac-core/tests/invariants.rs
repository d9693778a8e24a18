//! Properties that must hold on every tick of a drill.

use evac_core::{distance, Point2D, Rect, SimConfig, World};

fn running_world(seed: u64) -> World {
    let mut world = World::seeded(SimConfig::default(), seed).unwrap();
    world.set_alarm();
    world.start_hazard_at_ignition();
    world
}

#[test]
fn test_panic_monotonic_and_bounded() {
    for seed in [1, 2, 3] {
        let mut world = running_world(seed);
        let mut previous: Vec<f64> = world.agents().iter().map(|a| a.panic()).collect();
        for _ in 0..1500 {
            world.tick();
            for (agent, before) in world.agents().iter().zip(&previous) {
                assert!(agent.panic() >= *before);
                assert!((0.0..=1.0).contains(&agent.panic()));
            }
            previous = world.agents().iter().map(|a| a.panic()).collect();
        }
    }
}

#[test]
fn test_evacuated_agents_stay_put() {
    let mut world = running_world(8);
    let mut frozen: Vec<Option<Point2D>> = vec![None; world.agents().len()];
    for _ in 0..2000 {
        world.tick();
        for (i, agent) in world.agents().iter().enumerate() {
            match frozen[i] {
                Some(at) => {
                    assert!(agent.is_evacuated());
                    assert_eq!(agent.position(), at);
                }
                None if agent.is_evacuated() => frozen[i] = Some(agent.position()),
                None => {}
            }
        }
    }
    assert!(frozen.iter().any(Option::is_some));
}

#[test]
fn test_hazard_never_shrinks() {
    let mut world = running_world(13);
    let mut count = world.active_hazard_cell_count();
    for _ in 0..1000 {
        world.tick();
        assert!(world.hazard().is_active());
        assert!(world.active_hazard_cell_count() >= count);
        count = world.active_hazard_cell_count();
    }
    assert_eq!(count, 51);
}

#[test]
fn test_nothing_moves_without_alarm() {
    let mut world = World::seeded(SimConfig::default(), 4).unwrap();
    world.start_hazard_at_ignition();
    let before: Vec<_> = world
        .agents()
        .iter()
        .map(|a| (a.position(), a.panic(), a.is_evacuated()))
        .collect();
    for _ in 0..500 {
        let report = world.tick();
        assert_eq!(report.steps.idle, world.agents().len());
    }
    let after: Vec<_> = world
        .agents()
        .iter()
        .map(|a| (a.position(), a.panic(), a.is_evacuated()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_moves_never_enter_obstacles() {
    let mut world = running_world(21);
    let size = world.tuning().collision_box_size;
    for _ in 0..1500 {
        let before: Vec<Point2D> = world.agents().iter().map(|a| a.position()).collect();
        world.tick();
        for (agent, old) in world.agents().iter().zip(&before) {
            if agent.position() != *old {
                let area = Rect::centered(agent.position(), size);
                assert!(world.obstacles().iter().all(|o| !o.intersects(&area)));
            }
        }
    }
}

#[test]
fn test_evacuation_only_near_an_exit() {
    let mut world = running_world(34);
    let radius = world.tuning().arrival_radius;
    let mut already: Vec<bool> = vec![false; world.agents().len()];
    for _ in 0..2000 {
        world.tick();
        for (i, agent) in world.agents().iter().enumerate() {
            if agent.is_evacuated() && !already[i] {
                let nearest = world
                    .exits()
                    .iter()
                    .map(|e| distance(agent.position(), *e))
                    .fold(f64::INFINITY, f64::min);
                assert!(nearest < radius);
                already[i] = true;
            }
        }
    }
}

#[test]
fn test_repeated_commands_are_idempotent() {
    let config = SimConfig::default();
    let mut once = World::seeded(config.clone(), 99).unwrap();
    let mut twice = World::seeded(config, 99).unwrap();

    once.set_alarm();
    once.start_hazard(Point2D::new(450.0, 300.0));
    twice.set_alarm();
    twice.set_alarm();
    twice.start_hazard(Point2D::new(450.0, 300.0));
    twice.start_hazard(Point2D::new(450.0, 300.0));

    for _ in 0..300 {
        let a = once.tick();
        let b = twice.tick();
        assert_eq!(a.events, b.events);
    }
    let (a, b) = (once.snapshot(), twice.snapshot());
    assert_eq!(a.agents, b.agents);
    assert_eq!(a.hazard, b.hazard);
    assert_eq!(a.alarm_on, b.alarm_on);
}

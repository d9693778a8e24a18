//! Statistics Output
//!
//! Collects evacuation statistics from tick reports for the end-of-run summary.

use evac_events::{EventKind, SimEvent};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::rng::RandomSource;
use crate::world::{TickReport, World};

/// Summary of one drill session
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSummary {
    pub total_ticks: u64,
    pub agent_count: usize,
    pub evacuated: usize,
    pub remaining: usize,
    pub first_evacuation_tick: Option<u64>,
    pub full_evacuation_tick: Option<u64>,
    pub mean_evacuation_tick: Option<f64>,
    pub alarm_tick: Option<u64>,
    pub ignition_tick: Option<u64>,
    pub peak_hazard_cells: usize,
    pub blocked_moves: usize,
    pub mean_panic: f64,
    pub max_panic: f64,
    pub events_by_kind: BTreeMap<String, usize>,
}

/// Accumulates statistics during a session. Start a new one after a reset.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    agent_count: usize,
    total_ticks: u64,
    evacuation_ticks: BTreeMap<u32, u64>,
    alarm_tick: Option<u64>,
    ignition_tick: Option<u64>,
    peak_hazard_cells: usize,
    blocked_moves: usize,
    events_by_kind: BTreeMap<String, usize>,
}

impl StatsCollector {
    pub fn new(agent_count: usize) -> Self {
        Self {
            agent_count,
            ..Self::default()
        }
    }

    /// Record one tick. `hazard_cells` is the cell count after the tick.
    pub fn record_tick(&mut self, report: &TickReport, hazard_cells: usize) {
        self.total_ticks = report.timestamp.tick;
        self.blocked_moves += report.steps.blocked;
        self.peak_hazard_cells = self.peak_hazard_cells.max(hazard_cells);

        for event in &report.events {
            *self
                .events_by_kind
                .entry(event.kind().as_str().to_string())
                .or_insert(0) += 1;

            match event {
                SimEvent::AlarmRaised { at } => {
                    self.alarm_tick.get_or_insert(at.tick);
                }
                SimEvent::HazardIgnited { at, .. } => {
                    self.ignition_tick.get_or_insert(at.tick);
                }
                SimEvent::AgentEvacuated { at, agent_id, .. } => {
                    self.evacuation_ticks.entry(*agent_id).or_insert(at.tick);
                }
                SimEvent::HazardSpread { .. } => {}
            }
        }
    }

    pub fn evacuated(&self) -> usize {
        self.evacuation_ticks.len()
    }

    pub fn evacuation_tick(&self, agent_id: u32) -> Option<u64> {
        self.evacuation_ticks.get(&agent_id).copied()
    }

    pub fn events_of(&self, kind: EventKind) -> usize {
        self.events_by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Build the summary, reading final panic levels from `world`
    pub fn summarize<R: RandomSource>(&self, world: &World<R>) -> SessionSummary {
        let ticks: Vec<u64> = self.evacuation_ticks.values().copied().collect();
        let first_evacuation_tick = ticks.iter().min().copied();
        let full_evacuation_tick = if self.agent_count > 0 && ticks.len() == self.agent_count {
            ticks.iter().max().copied()
        } else {
            None
        };
        let mean_evacuation_tick = if ticks.is_empty() {
            None
        } else {
            Some(ticks.iter().sum::<u64>() as f64 / ticks.len() as f64)
        };

        let panics: Vec<f64> = world.agents().iter().map(|a| a.panic()).collect();
        let mean_panic = if panics.is_empty() {
            0.0
        } else {
            panics.iter().sum::<f64>() / panics.len() as f64
        };
        let max_panic = panics.iter().copied().fold(0.0, f64::max);

        SessionSummary {
            total_ticks: self.total_ticks,
            agent_count: self.agent_count,
            evacuated: self.evacuated(),
            remaining: self.agent_count.saturating_sub(self.evacuated()),
            first_evacuation_tick,
            full_evacuation_tick,
            mean_evacuation_tick,
            alarm_tick: self.alarm_tick,
            ignition_tick: self.ignition_tick,
            peak_hazard_cells: self.peak_hazard_cells,
            blocked_moves: self.blocked_moves,
            mean_panic,
            max_panic,
            events_by_kind: self.events_by_kind.clone(),
        }
    }
}

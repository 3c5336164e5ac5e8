//! Fixed timestep simulation tick
//!
//! Core loop that advances the procedure deterministically. Step order:
//! commands, movement, targeting, work, stage transitions, particle aging.

use glam::Vec2;

use super::actor::integrate_movement;
use super::autopilot;
use super::resolver::{Lock, Target, resolve_target};
use super::stage::{Stage, StageKind, SubPhase};
use super::state::SimState;
use super::tools::ToolId;
use super::work::{
    WorkMode, WorkSignal, age_particles, apply_heat, apply_work, spawn_debris,
    spawn_work_particles, sweep_debris, work_rate,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement vector, keyboard and pointer contributions summed (not renormalized)
    pub movement: Vec2,
    /// Action control held this tick
    pub action_held: bool,
    /// Select a tool by catalog index
    pub select_tool: Option<usize>,
    /// Start the procedure (Intro only)
    pub start: bool,
    /// Abandon the run and return to Intro
    pub reset: bool,
    /// Demo mode - the autopilot drives
    pub autopilot: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    // Reset wins over everything and consumes the tick
    if input.reset {
        state.reset();
        return;
    }

    let input = if input.autopilot {
        autopilot::drive(state, dt)
    } else {
        input.clone()
    };

    if input.start && state.stage.kind() == StageKind::Intro {
        state.start();
        return;
    }

    if let Some(index) = input.select_tool {
        state.select_tool(index);
    }

    state.age_notification();

    if !state.stage.kind().is_interactive() {
        state.lock = Lock::NONE;
        age_particles(&mut state.particles, dt);
        return;
    }

    state.stats.elapsed_ticks += 1;
    state.stats.stage_ticks += 1;

    state.actor = integrate_movement(state.actor, input.movement, dt);

    // Targeting runs against the segments and debris left by the previous tick
    let lock = resolve_target(&state.stage, state.tool, state.actor.pos, &state.debris);
    state.lock = lock;

    if input.action_held {
        let rate = work_rate(true);
        if lock.locked {
            apply_locked_work(state, lock, rate);
            let origin = state.actor.pos;
            spawn_work_particles(
                &mut state.particles,
                origin,
                &mut state.rng,
                state.max_particles,
            );
        }

        // The vacuum sweeps whatever is close, lock or not
        if state.stage.kind() == StageKind::Clean && state.tool == ToolId::Vacuum {
            let removed = sweep_debris(&mut state.debris, state.actor.pos, CLEAN_PICKUP_RADIUS);
            if removed > 0 {
                log::debug!("Swept {} debris, {} left", removed, state.debris.len());
            }
        }
    }

    state.advance_stage();

    age_particles(&mut state.particles, dt);
}

/// Apply one tick of work to whatever the resolver locked onto
fn apply_locked_work(state: &mut SimState, lock: Lock, rate: f32) {
    match &mut state.stage {
        Stage::Demolish { wedges } => {
            let Some(Target::Segment(id)) = lock.target else {
                return;
            };
            let Some(wedge) = wedges.get_mut(id) else {
                return;
            };
            if apply_work(wedge, WorkMode::Demolish, rate) == Some(WorkSignal::SpawnDebris) {
                let band = wedge.band;
                log::info!("Wedge {} broken", id);
                let first_id = state.next_entity_id();
                let debris = spawn_debris(&band, &mut state.rng, first_id);
                // First id came from the allocator; reserve the rest
                for _ in 1..debris.len() {
                    state.next_entity_id();
                }
                state.debris.extend(debris);
            }
        }

        Stage::Construct {
            rings,
            layer,
            sub_phase,
        } => {
            let Some(ring) = rings.get_mut(*layer) else {
                return;
            };
            let mode = WorkMode::Construct {
                sub_phase: *sub_phase,
                layer: *layer,
            };
            let Some(signal) = apply_work(ring, mode, rate) else {
                return;
            };
            let message = match signal {
                WorkSignal::Advance(next) => {
                    log::debug!("Layer {} {:?} -> {:?}", *layer + 1, *sub_phase, next);
                    *sub_phase = next;
                    next_step_message(next, *layer)
                }
                WorkSignal::NextLayer => {
                    *layer += 1;
                    *sub_phase = SubPhase::Mold;
                    log::info!("Layer {} cast", *layer);
                    next_step_message(*sub_phase, *layer)
                }
                // Stage transition check takes it from here
                WorkSignal::LayersComplete | WorkSignal::SpawnDebris => return,
            };
            state.notify(message);
        }

        Stage::Heat { temperature, .. } => {
            *temperature = apply_heat(*temperature, rate);
        }

        // Cleaning has no segment work; the sweep runs separately
        Stage::Clean { .. } | Stage::Intro | Stage::Victory { .. } => {}
    }
}

/// Advisory text for the next construction step (layers shown 1-based)
fn next_step_message(sub_phase: SubPhase, layer: usize) -> String {
    let n = layer + 1;
    match sub_phase {
        SubPhase::Mold => format!("Set the form for layer {n} with the manipulator"),
        SubPhase::Pour => format!("Form is set. Pour layer {n} with the injector"),
        SubPhase::Demold => format!("Layer {n} poured. Strip the form with the manipulator"),
    }
}

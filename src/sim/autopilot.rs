//! Demo mode: derive a tick's input from the current state
//!
//! Picks the tool the stage asks for, steers toward the current work area and
//! holds the action control. Long moves are broken into 45° hops around the
//! site so the straight-line path never cuts through the inner travel bound.

use glam::Vec2;

use super::stage::Stage;
use super::state::SimState;
use super::tick::TickInput;
use crate::consts::*;
use crate::{angle_to_point, point_to_polar};

/// Largest bearing change attempted in one straight hop
const MAX_HOP_DEG: f32 = 45.0;

/// Build the input the autopilot would give this tick
pub fn drive(state: &SimState, dt: f32) -> TickInput {
    let mut input = TickInput::default();

    match state.stage {
        Stage::Intro => {
            input.start = true;
            return input;
        }
        Stage::Victory { .. } => return input,
        _ => {}
    }

    match state.suggested_tool() {
        Some(tool) if tool != state.tool => input.select_tool = Some(tool.index()),
        _ => {}
    }

    if let Some(goal) = work_point(state) {
        input.movement = steer(state.actor.pos, goal, dt);
    }
    input.action_held = true;
    input
}

/// Where the actor should stand to make progress
fn work_point(state: &SimState) -> Option<Vec2> {
    let bearing = state.actor.site_angle();
    match &state.stage {
        Stage::Demolish { wedges } => wedges
            .iter()
            .find(|w| !w.is_broken())
            .map(|w| angle_to_point(w.band.mid_radius(), w.band.mid_angle())),
        Stage::Clean { .. } => state
            .debris
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance(state.actor.pos)
                    .total_cmp(&b.pos.distance(state.actor.pos))
            })
            .map(|d| d.pos),
        Stage::Construct { rings, layer, .. } => rings
            .get(*layer)
            .map(|ring| angle_to_point(ring.band.mid_radius(), bearing)),
        Stage::Heat { .. } => Some(angle_to_point(WALL_MID_RADIUS, bearing)),
        Stage::Intro | Stage::Victory { .. } => None,
    }
}

/// Movement vector toward `goal`, hopping around the site for large bearing changes
fn steer(pos: Vec2, goal: Vec2, dt: f32) -> Vec2 {
    let (_, from_deg) = point_to_polar(pos);
    let (goal_radius, goal_deg) = point_to_polar(goal);

    // Signed bearing difference in (-180, 180]
    let mut diff = goal_deg - from_deg;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }

    let waypoint = if diff.abs() > MAX_HOP_DEG {
        angle_to_point(goal_radius, from_deg + MAX_HOP_DEG * diff.signum())
    } else {
        goal
    };

    // Scale so the final step lands exactly on the waypoint
    let step = ACTOR_SPEED * dt;
    ((waypoint - pos) / step).clamp_length_max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tools::ToolId;

    #[test]
    fn test_intro_presses_start() {
        let state = SimState::new(1);
        let input = drive(&state, SIM_DT);
        assert!(input.start);
    }

    #[test]
    fn test_picks_suggested_tool() {
        let mut state = SimState::new(1);
        state.start();
        state.tool = ToolId::Heater;
        let input = drive(&state, SIM_DT);
        assert_eq!(input.select_tool, Some(ToolId::Breaker.index()));
        assert!(input.action_held);
    }

    #[test]
    fn test_steer_lands_on_goal() {
        let pos = angle_to_point(400.0, 10.0);
        let goal = pos + Vec2::new(2.0, 0.0);
        let mv = steer(pos, goal, SIM_DT);
        let landed = pos + mv * ACTOR_SPEED * SIM_DT;
        assert!((landed - goal).length() < 0.001);
    }

    #[test]
    fn test_steer_hops_around_center() {
        // Goal straight across the site: first hop stays on the far side of the hub
        let pos = angle_to_point(400.0, 0.0);
        let goal = angle_to_point(400.0, 180.0);
        let mv = steer(pos, goal, SIM_DT);
        assert!((mv.length() - 1.0).abs() < 0.001);
        let next = pos + mv * 10.0;
        assert!((next - SITE_CENTER).length() > TRAVEL_INNER_RADIUS);
    }
}

//! Device input buffering
//!
//! Collects key and pointer events between ticks and turns them into one
//! `TickInput`. Held keys and the pointer vector persist; commands fire once.

use glam::Vec2;

use crate::consts::MAX_DRAG_RADIUS;
use crate::sim::tick::TickInput;
use crate::sim::tools::TOOLS;

/// A movement key direction (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.code` to a direction (WASD and arrows)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Direction::Up),
            "KeyS" | "ArrowDown" => Some(Direction::Down),
            "KeyA" | "ArrowLeft" => Some(Direction::Left),
            "KeyD" | "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Unit contribution of this key
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Tool hotkey: `Digit1`..`Digit5` select catalog entries 0..4
fn tool_hotkey(code: &str) -> Option<usize> {
    let digit: usize = code.strip_prefix("Digit")?.parse().ok()?;
    (1..=TOOLS.len()).contains(&digit).then(|| digit - 1)
}

/// Input state accumulated between ticks
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    held: [bool; 4],
    /// Latest pointer drag offset from where the drag began (px)
    drag: Option<Vec2>,
    action_key: bool,
    action_pointer: bool,
    /// Persistent demo-mode toggle
    pub autopilot: bool,
    select_tool: Option<usize>,
    start: bool,
    reset: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press by `KeyboardEvent.code`. Returns whether it was used.
    pub fn key_down(&mut self, code: &str) -> bool {
        if let Some(dir) = Direction::from_key_code(code) {
            self.held[dir.index()] = true;
            return true;
        }
        if let Some(index) = tool_hotkey(code) {
            self.select_tool = Some(index);
            return true;
        }
        match code {
            "Space" => self.action_key = true,
            "Enter" => self.start = true,
            "Escape" | "KeyR" => self.reset = true,
            "KeyI" => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            _ => return false,
        }
        true
    }

    /// Handle a key release
    pub fn key_up(&mut self, code: &str) {
        if let Some(dir) = Direction::from_key_code(code) {
            self.held[dir.index()] = false;
        } else if code == "Space" {
            self.action_key = false;
        }
    }

    /// Pointer dragged `offset` px from where the drag started (latest wins)
    pub fn pointer_drag(&mut self, offset: Vec2) {
        self.drag = Some(offset);
    }

    pub fn pointer_release(&mut self) {
        self.drag = None;
    }

    /// Pointer-driven action control (e.g. an on-screen button)
    pub fn set_action(&mut self, held: bool) {
        self.action_pointer = held;
    }

    pub fn select_tool(&mut self, index: usize) {
        self.select_tool = Some(index);
    }

    pub fn start(&mut self) {
        self.start = true;
    }

    pub fn reset(&mut self) {
        self.reset = true;
    }

    /// Clear everything held, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held = [false; 4];
        self.drag = None;
        self.action_key = false;
        self.action_pointer = false;
    }

    /// Keyboard and pointer contributions summed. Not renormalized, so both
    /// together can exceed unit length.
    pub fn movement(&self) -> Vec2 {
        let keys: Vec2 = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter(|d| self.held[d.index()])
        .map(Direction::vector)
        .sum();

        let pointer = self
            .drag
            .map(|offset| (offset / MAX_DRAG_RADIUS).clamp_length_max(1.0))
            .unwrap_or(Vec2::ZERO);

        keys + pointer
    }

    pub fn action_held(&self) -> bool {
        self.action_key || self.action_pointer
    }

    /// Build this tick's input and drain the one-shot commands
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            movement: self.movement(),
            action_held: self.action_held(),
            select_tool: self.select_tool.take(),
            start: std::mem::take(&mut self.start),
            reset: std::mem::take(&mut self.reset),
            autopilot: self.autopilot,
        }
    }
}

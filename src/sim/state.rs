//! Simulation state and world entities
//!
//! Everything a tick reads or writes lives in `SimState`. It is passed to the
//! tick driver explicitly; there is no global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::resolver::Lock;
use super::stage::{Stage, StageKind};
use super::tools::ToolId;
use crate::Settings;
use crate::consts::SIM_DT;

/// Rubble left behind by a broken wedge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub id: u32,
    pub pos: Vec2,
    /// Cosmetic
    pub size: f32,
    /// Cosmetic (degrees)
    pub rotation: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, decreases every tick
    pub life: f32,
}

/// Advisory text shown to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    /// Ticks until it disappears
    pub ticks_left: u32,
}

/// Elapsed-time counters for the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Ticks since the run started
    pub elapsed_ticks: u64,
    /// Ticks since the current stage was entered
    pub stage_ticks: u64,
}

/// Default number of particles kept alive
pub const DEFAULT_MAX_PARTICLES: usize = 128;
/// Default notification lifetime (4 seconds, rounded like `Settings::notification_ticks`)
pub const DEFAULT_NOTIFICATION_TICKS: u32 = (4.0 / SIM_DT + 0.5) as u32;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for debris scatter and particles
    pub rng: Pcg32,
    pub stage: Stage,
    pub actor: Actor,
    /// Selected tool, persists until changed
    pub tool: ToolId,
    pub debris: Vec<Debris>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub notification: Option<Notification>,
    /// Resolver result from the latest tick
    pub lock: Lock,
    pub stats: RunStats,
    /// Particle cap from settings
    pub max_particles: usize,
    /// Notification lifetime from settings
    pub notification_ticks: u32,
    next_id: u32,
}

impl SimState {
    /// Create a state in the Intro stage with default settings
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            stage: Stage::Intro,
            actor: Actor::default(),
            tool: ToolId::Breaker,
            debris: Vec::new(),
            particles: Vec::new(),
            notification: None,
            lock: Lock::NONE,
            stats: RunStats::default(),
            max_particles: DEFAULT_MAX_PARTICLES,
            notification_ticks: DEFAULT_NOTIFICATION_TICKS,
            next_id: 1,
        }
    }

    /// Create a state honoring the player's settings
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::new(seed);
        state.max_particles = settings.max_particles();
        state.notification_ticks = settings.notification_ticks();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the current notification
    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("Notification: {}", text);
        self.notification = Some(Notification {
            text,
            ticks_left: self.notification_ticks.max(1),
        });
    }

    /// Count down the notification, dropping it when it expires
    pub fn age_notification(&mut self) {
        if let Some(note) = &mut self.notification {
            note.ticks_left = note.ticks_left.saturating_sub(1);
            if note.ticks_left == 0 {
                self.notification = None;
            }
        }
    }

    /// Drop everything back to the Intro stage.
    ///
    /// Replaces all world state at once; settings and seed are kept, and the
    /// random stream and entity ids restart so the run replays like a fresh one.
    pub fn reset(&mut self) {
        log::info!("Reset from {}", self.stage.kind().as_str());
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.stage = Stage::Intro;
        self.actor = Actor::default();
        self.tool = ToolId::Breaker;
        self.debris.clear();
        self.particles.clear();
        self.notification = None;
        self.lock = Lock::NONE;
        self.stats = RunStats::default();
    }

    /// Begin demolition. Only valid from Intro; ignored anywhere else.
    pub fn start(&mut self) -> bool {
        if self.stage.kind() != StageKind::Intro {
            log::warn!("Start ignored during {}", self.stage.kind().as_str());
            return false;
        }
        self.stage = Stage::demolish();
        self.actor = Actor::default();
        self.tool = ToolId::Breaker;
        self.debris.clear();
        self.particles.clear();
        self.lock = Lock::NONE;
        self.stats = RunStats::default();
        log::info!("Procedure started (seed {})", self.seed);
        self.notify("Select the breaker and knock out the worn lining");
        true
    }

    /// Select a tool by catalog index. Out-of-range indices are ignored.
    pub fn select_tool(&mut self, index: usize) -> bool {
        match ToolId::from_index(index) {
            Some(tool) => {
                if tool != self.tool {
                    log::debug!("Tool: {}", tool.name());
                }
                self.tool = tool;
                true
            }
            None => {
                log::warn!("Ignoring tool index {}", index);
                false
            }
        }
    }

    /// Tool the current stage calls for (derived, never stored)
    pub fn suggested_tool(&self) -> Option<ToolId> {
        self.stage.current_task().map(ToolId::for_task)
    }

    /// Take at most one automatic stage transition and run its side effects
    pub fn advance_stage(&mut self) -> bool {
        let from = self.stage.kind();
        if !self.stage.try_advance(self.debris.is_empty()) {
            return false;
        }
        let to = self.stage.kind();
        log::info!(
            "Stage {} -> {} after {} ticks",
            from.as_str(),
            to.as_str(),
            self.stats.stage_ticks
        );
        self.stats.stage_ticks = 0;

        match to {
            StageKind::Clean => {
                self.tool = ToolId::Vacuum;
                self.notify("Lining is out. Vacuum up the debris");
            }
            StageKind::Construct => {
                self.tool = ToolId::Manipulator;
                self.notify("Site is clear. Set the form for layer 1 with the manipulator");
            }
            StageKind::Heat => {
                self.tool = ToolId::Heater;
                self.notify("All layers cast. Cure the lining with the burner lance");
            }
            StageKind::Victory => {
                self.notify("Relining complete. The furnace is back in service");
            }
            StageKind::Intro | StageKind::Demolish => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::segment::SegmentState;

    #[test]
    fn test_new_state_is_intro() {
        let state = SimState::new(7);
        assert_eq!(state.stage.kind(), StageKind::Intro);
        assert!(state.stage.segments().is_empty());
        assert_eq!(state.suggested_tool(), None);
    }

    #[test]
    fn test_start_only_from_intro() {
        let mut state = SimState::new(7);
        assert!(state.start());
        assert_eq!(state.stage.kind(), StageKind::Demolish);
        assert_eq!(state.stage.segments().len(), 4);
        assert!(state.notification.is_some());
        assert!(!state.start());
    }

    #[test]
    fn test_out_of_range_tool_ignored() {
        let mut state = SimState::new(7);
        assert!(state.select_tool(3));
        assert_eq!(state.tool, ToolId::Injector);
        assert!(!state.select_tool(5));
        assert!(!state.select_tool(usize::MAX));
        assert_eq!(state.tool, ToolId::Injector);
    }

    #[test]
    fn test_reset_clears_world() {
        let mut state = SimState::new(7);
        state.start();
        state.actor.pos += Vec2::new(30.0, 0.0);
        state.debris.push(Debris {
            id: 1,
            pos: Vec2::ZERO,
            size: 10.0,
            rotation: 0.0,
        });
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 1.0,
            life: 1.0,
        });
        state.reset();
        assert_eq!(state.stage, Stage::Intro);
        assert!(state.debris.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.actor, Actor::default());
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_demolish_to_clean_switches_tool() {
        let mut state = SimState::new(7);
        state.start();
        if let Stage::Demolish { wedges } = &mut state.stage {
            for w in wedges.iter_mut() {
                w.progress = 0.0;
                w.state = SegmentState::Broken;
            }
        }
        state.select_tool(0);
        assert!(state.advance_stage());
        assert_eq!(state.stage.kind(), StageKind::Clean);
        assert_eq!(state.tool, ToolId::Vacuum);
        // Empty debris moves straight on, but only on the next check
        assert!(state.advance_stage());
        assert_eq!(state.stage.kind(), StageKind::Construct);
        assert_eq!(state.tool, ToolId::Manipulator);
    }

    #[test]
    fn test_reset_restarts_rng_and_ids() {
        let mut fresh = SimState::new(7);
        let mut state = SimState::new(7);
        state.next_entity_id();
        let _: u32 = rand::Rng::random(&mut state.rng);
        state.reset();

        assert_eq!(state.next_entity_id(), 1);
        let a: u32 = rand::Rng::random(&mut state.rng);
        let b: u32 = rand::Rng::random(&mut fresh.rng);
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_notification_matches_settings() {
        let state = SimState::new(1);
        let configured = SimState::with_settings(1, &Settings::default());
        assert_eq!(state.notification_ticks, configured.notification_ticks);
        assert_eq!(DEFAULT_NOTIFICATION_TICKS, 240);
    }

    #[test]
    fn test_notification_expires() {
        let mut state = SimState::new(7);
        state.notification_ticks = 2;
        state.notify("hello");
        state.age_notification();
        assert!(state.notification.is_some());
        state.age_notification();
        assert!(state.notification.is_none());
    }
}

//! Tool catalog
//!
//! Five fixed tools, selected by index. Each is valid for one or more tasks.

use serde::{Deserialize, Serialize};

/// Identifies one of the five tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolId {
    Breaker,
    Vacuum,
    Manipulator,
    Injector,
    Heater,
}

/// A unit of work the procedure asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    Demolish,
    Clean,
    Mold,
    Pour,
    Demold,
    Heat,
}

/// Static description of a tool
#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    pub id: ToolId,
    /// Display label (opaque to the simulation)
    pub name: &'static str,
    pub valid_for: &'static [Task],
}

/// Selection order as presented to the player
pub const TOOLS: [ToolDef; 5] = [
    ToolDef {
        id: ToolId::Breaker,
        name: "Hydraulic breaker",
        valid_for: &[Task::Demolish],
    },
    ToolDef {
        id: ToolId::Vacuum,
        name: "Debris vacuum",
        valid_for: &[Task::Clean],
    },
    ToolDef {
        id: ToolId::Manipulator,
        name: "Form manipulator",
        valid_for: &[Task::Mold, Task::Demold],
    },
    ToolDef {
        id: ToolId::Injector,
        name: "Castable injector",
        valid_for: &[Task::Pour],
    },
    ToolDef {
        id: ToolId::Heater,
        name: "Burner lance",
        valid_for: &[Task::Heat],
    },
];

impl ToolId {
    /// Look up a tool by selection index. Out-of-range indices yield `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        TOOLS.get(index).map(|def| def.id)
    }

    pub fn index(self) -> usize {
        match self {
            ToolId::Breaker => 0,
            ToolId::Vacuum => 1,
            ToolId::Manipulator => 2,
            ToolId::Injector => 3,
            ToolId::Heater => 4,
        }
    }

    pub fn def(self) -> &'static ToolDef {
        &TOOLS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn handles(self, task: Task) -> bool {
        self.def().valid_for.contains(&task)
    }

    /// The tool that performs a task
    pub fn for_task(task: Task) -> Self {
        match task {
            Task::Demolish => ToolId::Breaker,
            Task::Clean => ToolId::Vacuum,
            Task::Mold | Task::Demold => ToolId::Manipulator,
            Task::Pour => ToolId::Injector,
            Task::Heat => ToolId::Heater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_matches_catalog() {
        for (i, def) in TOOLS.iter().enumerate() {
            assert_eq!(def.id.index(), i);
            assert_eq!(ToolId::from_index(i), Some(def.id));
        }
        assert_eq!(ToolId::from_index(5), None);
    }

    #[test]
    fn test_for_task_agrees_with_catalog() {
        for task in [
            Task::Demolish,
            Task::Clean,
            Task::Mold,
            Task::Pour,
            Task::Demold,
            Task::Heat,
        ] {
            assert!(ToolId::for_task(task).handles(task));
        }
        assert!(!ToolId::Injector.handles(Task::Mold));
    }
}

//! Trigger lifecycle state machine
//!
//! ```text
//! [Idle] ──trigger──→ [LocatingPosition] ──position──→ [ResolvingFacility]
//!                            │                                │
//!                          abort                          resolved
//!                            │                                ↓
//!                            ↓                          [Dispatching] ──abort──→ [Failed]
//!                        [Failed]                             │
//!                                                         finished
//!                                                             ↓
//!                                                        [Completed]
//! ```
//!
//! `Completed` and `Failed` are terminal for one trigger; the next trigger
//! starts again from either of them. Transitions not drawn above leave the
//! stage unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the current (or last) emergency trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyStage {
    #[default]
    Idle,
    LocatingPosition,
    ResolvingFacility,
    Dispatching,
    Completed,
    Failed,
}

impl EmergencyStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::LocatingPosition => "locating_position",
            Self::ResolvingFacility => "resolving_facility",
            Self::Dispatching => "dispatching",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// A trigger is running in this stage.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::LocatingPosition | Self::ResolvingFacility | Self::Dispatching
        )
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for EmergencyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs that move the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageEvent {
    Triggered,
    PositionAcquired,
    FacilityResolved,
    DispatchFinished,
    Aborted,
}

/// Deterministic stage tracker.
#[derive(Debug, Default)]
pub struct StageMachine {
    stage: EmergencyStage,
    transitions: u64,
}

impl StageMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> EmergencyStage {
        self.stage
    }

    /// Number of transitions that changed the stage.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Apply `event`, returning the resulting stage.
    pub fn process_event(&mut self, event: StageEvent) -> EmergencyStage {
        let next = Self::next_stage(self.stage, event);
        if next != self.stage {
            self.transitions += 1;
            self.stage = next;
        }
        next
    }

    /// Pure transition function.
    pub fn next_stage(current: EmergencyStage, event: StageEvent) -> EmergencyStage {
        use EmergencyStage::*;

        match (current, event) {
            (Idle | Completed | Failed, StageEvent::Triggered) => LocatingPosition,
            (LocatingPosition, StageEvent::PositionAcquired) => ResolvingFacility,
            (ResolvingFacility, StageEvent::FacilityResolved) => Dispatching,
            (Dispatching, StageEvent::DispatchFinished) => Completed,
            (stage, StageEvent::Aborted) if stage.is_active() => Failed,
            (stage, _) => stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut machine = StageMachine::new();
        assert_eq!(machine.stage(), EmergencyStage::Idle);

        assert_eq!(
            machine.process_event(StageEvent::Triggered),
            EmergencyStage::LocatingPosition
        );
        assert_eq!(
            machine.process_event(StageEvent::PositionAcquired),
            EmergencyStage::ResolvingFacility
        );
        assert_eq!(
            machine.process_event(StageEvent::FacilityResolved),
            EmergencyStage::Dispatching
        );
        assert_eq!(
            machine.process_event(StageEvent::DispatchFinished),
            EmergencyStage::Completed
        );
        assert_eq!(machine.transitions(), 4);
    }

    #[test]
    fn test_abort_from_every_active_stage() {
        for stage in [
            EmergencyStage::LocatingPosition,
            EmergencyStage::ResolvingFacility,
            EmergencyStage::Dispatching,
        ] {
            assert_eq!(
                StageMachine::next_stage(stage, StageEvent::Aborted),
                EmergencyStage::Failed
            );
        }
        assert_eq!(
            StageMachine::next_stage(EmergencyStage::Idle, StageEvent::Aborted),
            EmergencyStage::Idle
        );
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut machine = StageMachine::new();
        machine.process_event(StageEvent::DispatchFinished);
        assert_eq!(machine.stage(), EmergencyStage::Idle);

        machine.process_event(StageEvent::Triggered);
        machine.process_event(StageEvent::Triggered);
        assert_eq!(machine.stage(), EmergencyStage::LocatingPosition);
        assert_eq!(machine.transitions(), 1);
    }

    #[test]
    fn test_terminal_stages_can_retrigger() {
        for stage in [EmergencyStage::Completed, EmergencyStage::Failed] {
            assert!(stage.is_terminal());
            assert_eq!(
                StageMachine::next_stage(stage, StageEvent::Triggered),
                EmergencyStage::LocatingPosition
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(EmergencyStage::ResolvingFacility.to_string(), "resolving_facility");
        assert!(!EmergencyStage::Idle.is_active());
    }
}

//! Domain layer: stage machine, alert composition and trigger results.

pub mod message;
pub mod report;
pub mod stage;

pub use message::compose_alert;
pub use report::{EmergencyReport, EmergencyResult};
pub use stage::{EmergencyStage, StageEvent, StageMachine};

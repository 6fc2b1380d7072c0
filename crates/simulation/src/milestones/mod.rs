//! Milestone card visibility.
//!
//! Each landmark becomes visible a fixed buffer before the elevator reaches
//! it, and is placed on screen proportionally to its altitude. Landmarks that
//! project outside the screen are never shown.

mod calculations;
mod systems;
mod types;

pub use calculations::{milestone_status, screen_position, visibility};
pub use systems::{update_milestones, MilestonesPlugin};
pub use types::{
    default_milestones, Milestone, MilestoneBoard, MilestoneId, MilestoneStatus, Side,
    VisibilityMap,
};

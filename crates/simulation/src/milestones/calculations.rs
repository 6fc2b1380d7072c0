use super::types::{Milestone, MilestoneStatus, VisibilityMap};

/// Vertical position of a milestone card as a percentage from the top.
///
/// Returns `None` when the position falls outside `[0, 100]`, i.e. the
/// milestone sits beyond the displayable range of the shaft.
pub fn screen_position(milestone_altitude: f64, max_altitude: f64) -> Option<f64> {
    if !(max_altitude > 0.0) {
        return None;
    }
    let position = 100.0 - (milestone_altitude / max_altitude) * 100.0;
    (0.0..=100.0).contains(&position).then_some(position)
}

/// Visibility of a single milestone.
///
/// A milestone shows once the elevator is within `buffer` meters of it. A
/// milestone without a screen position never shows.
pub fn milestone_status(
    altitude: f64,
    milestone: &Milestone,
    buffer: f64,
    max_altitude: f64,
) -> MilestoneStatus {
    let screen_position = screen_position(milestone.altitude, max_altitude);
    let visible = screen_position.is_some() && altitude >= milestone.altitude - buffer;
    MilestoneStatus {
        visible,
        screen_position,
    }
}

/// Visibility of every milestone in `milestones`. Entries are independent.
pub fn visibility(
    altitude: f64,
    milestones: &[Milestone],
    buffer: f64,
    max_altitude: f64,
) -> VisibilityMap {
    milestones
        .iter()
        .map(|m| (m.id(), milestone_status(altitude, m, buffer, max_altitude)))
        .collect()
}

use bevy::prelude::*;

use crate::altitude::Altitude;
use crate::params::ElevatorParams;

use super::calculations::visibility;
use super::types::MilestoneBoard;

/// Refreshes milestone visibility whenever the altitude changes.
pub fn update_milestones(
    altitude: Res<Altitude>,
    params: Res<ElevatorParams>,
    mut board: ResMut<MilestoneBoard>,
) {
    if !altitude.is_changed() && !params.is_changed() {
        return;
    }

    let statuses = visibility(
        altitude.meters,
        &params.milestones.table,
        params.milestones.buffer,
        params.shaft.max_altitude,
    );

    let mut newly_visible = Vec::new();
    let mut newly_hidden = Vec::new();
    for (id, status) in &statuses {
        let was_visible = board.is_visible(*id);
        if status.visible && !was_visible {
            newly_visible.push(*id);
        } else if !status.visible && was_visible {
            newly_hidden.push(*id);
        }
    }

    if !newly_visible.is_empty() || !newly_hidden.is_empty() {
        debug!(
            "Milestones at {} m: +{:?} -{:?}",
            altitude.whole_meters(),
            newly_visible,
            newly_hidden
        );
    }

    board.statuses = statuses;
    board.newly_visible = newly_visible;
    board.newly_hidden = newly_hidden;
}

pub struct MilestonesPlugin;

impl Plugin for MilestonesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MilestoneBoard>().add_systems(
            Update,
            update_milestones.in_set(crate::ElevatorSet::Derive),
        );
    }
}

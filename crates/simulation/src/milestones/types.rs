use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which side of the shaft a milestone card is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Identifies a milestone by its altitude in whole meters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MilestoneId(pub u64);

/// A named landmark on the way up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub description: String,
    /// Altitude in meters.
    pub altitude: f64,
    pub side: Side,
}

impl Milestone {
    pub fn new(name: &str, description: &str, altitude: f64, side: Side) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            altitude,
            side,
        }
    }

    pub fn id(&self) -> MilestoneId {
        MilestoneId(self.altitude as u64)
    }
}

/// Display state of one milestone at the current altitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MilestoneStatus {
    pub visible: bool,
    /// Percentage from the top of the screen, `None` when off the displayable range.
    pub screen_position: Option<f64>,
}

/// Per-milestone visibility, keyed by id.
pub type VisibilityMap = BTreeMap<MilestoneId, MilestoneStatus>;

/// Latest milestone visibility for the card layer.
#[derive(Resource, Debug, Clone, Default)]
pub struct MilestoneBoard {
    pub statuses: VisibilityMap,
    /// Milestones that became visible on the last refresh.
    pub newly_visible: Vec<MilestoneId>,
    /// Milestones that were hidden on the last refresh.
    pub newly_hidden: Vec<MilestoneId>,
}

impl MilestoneBoard {
    pub fn is_visible(&self, id: MilestoneId) -> bool {
        self.statuses.get(&id).is_some_and(|s| s.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.statuses.values().filter(|s| s.visible).count()
    }
}

/// The 17 landmarks of the default ascent, in their display order.
pub fn default_milestones() -> Vec<Milestone> {
    use Side::{Left, Right};
    vec![
        Milestone::new("Hummingbird", "Low altitude flyer", 5.0, Left),
        Milestone::new("Fireworks", "Typical maximum height", 150.0, Right),
        Milestone::new("Hot Air Balloon", "Typical cruising altitude", 1_000.0, Right),
        Milestone::new("Mallard", "Migration altitude", 2_000.0, Left),
        Milestone::new("Bar-headed Goose", "Highest flying bird", 8_000.0, Left),
        Milestone::new("Mount Everest Peak", "Earth's highest point", 8_849.0, Right),
        Milestone::new("Commercial Airliner", "Cruising altitude", 10_000.0, Right),
        Milestone::new("Rüppell's Griffon Vulture", "Highest flying bird", 11_300.0, Right),
        Milestone::new("Vega 5b", "Amelia Earhart's plane", 12_200.0, Left),
        Milestone::new("SR-71 Blackbird", "Altitude record for jet aircraft", 25_900.0, Right),
        Milestone::new("Weather Balloon", "Maximum altitude", 40_000.0, Left),
        Milestone::new("Felix Baumgartner Jump", "Red Bull Stratos", 39_045.0, Right),
        Milestone::new("Space Shuttle", "Typical orbital altitude", 400_000.0, Left),
        Milestone::new("International Space Station", "Orbital altitude", 420_000.0, Right),
        Milestone::new("Hubble Space Telescope", "Orbital altitude", 540_000.0, Left),
        Milestone::new("GOES Weather Satellites", "Geostationary orbit", 35_786_000.0, Right),
        Milestone::new("Moon", "Average distance from Earth", 384_400_000.0, Left),
    ]
}

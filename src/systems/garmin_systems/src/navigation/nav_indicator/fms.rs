use systems::navigation::{ApproachType, LegType};

/// The view of the flight management system the nav indicator needs to follow the active
/// flight plan.
pub trait FlightManagement {
    fn active_plan_index(&self) -> usize;

    /// Number of legs in the active flight plan, or `None` when there is no active plan.
    fn active_plan_length(&self) -> Option<usize>;

    /// Global index of the leg LNAV currently tracks in the active flight plan.
    fn active_lateral_leg(&self) -> usize;

    fn leg_type(&self, global_leg_index: usize) -> Option<LegType>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApproachDetails {
    pub approach_type: ApproachType,
    pub is_circling: bool,
    /// The approach is flown as vectors to final.
    pub is_vtf: bool,
}

impl Default for ApproachDetails {
    fn default() -> Self {
        Self {
            approach_type: ApproachType::Unknown,
            is_circling: false,
            is_vtf: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FmsFlightPhase {
    pub is_approach_active: bool,
}

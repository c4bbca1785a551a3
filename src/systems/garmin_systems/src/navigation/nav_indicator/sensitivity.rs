use super::{NavIndicatorController, NavSensitivity};
use systems::navigation::{NavSourceId, NavSourceType};
use tracing::debug;

impl NavIndicatorController {
    /// Derives the sensitivity of the active source. When `updated_source` is given, nothing
    /// happens unless it is the active source.
    pub(super) fn update_sensitivity(&mut self, updated_source: Option<NavSourceId>) {
        let relevant = updated_source.map_or(true, |source| self.is_active(source));
        if !relevant && !self.first_run {
            return;
        }

        let active = self.active_source();
        let sensitivity = match active.id().source_type() {
            NavSourceType::Gps => self.gps_sensitivity(),
            _ if active.is_localizer() => NavSensitivity::Ils,
            _ => NavSensitivity::Vor,
        };

        if sensitivity != self.active_sensitivity {
            debug!("nav sensitivity {} -> {}", self.active_sensitivity, sensitivity);
            self.active_sensitivity = sensitivity;
        }

        self.update_components_display(None);
    }

    /// Maps the GPS CDI scale label to a sensitivity and latches whether the missed approach
    /// is being flown.
    fn gps_sensitivity(&mut self) -> NavSensitivity {
        let sensitivity =
            NavSensitivity::from_scale_label(self.active_source().deviation_scale_label());

        let missed_approach_active = sensitivity == NavSensitivity::Mapr;
        if missed_approach_active != self.missed_approach_active {
            debug!("missed approach active: {}", missed_approach_active);
            self.missed_approach_active = missed_approach_active;
        }

        sensitivity
    }
}

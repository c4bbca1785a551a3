use super::{NavIndicatorController, ViewSlot, ViewUpdate};
use systems::navigation::NavSourceId;
use tracing::debug;

impl NavIndicatorController {
    /// Updates concerning a specific source only reach the views when that source is displayed.
    /// The very first update always does.
    fn is_relevant(&self, updated_source: Option<NavSourceId>) -> bool {
        self.first_run || updated_source.map_or(true, |source| self.is_active(source))
    }

    /// Course and deviation readouts changed.
    pub(super) fn update_components_data(&mut self, updated_source: Option<NavSourceId>) {
        if !self.is_relevant(updated_source) {
            return;
        }

        self.emit_view(ViewSlot::DtkBox, ViewUpdate::Data);
        if self.hsi_map_active {
            self.emit_view(ViewSlot::HsiMap, ViewUpdate::Data);
            self.emit_view(ViewSlot::HsiMapDeviation, ViewUpdate::Data);
        } else {
            self.emit_view(ViewSlot::HsiRose, ViewUpdate::Data);
        }

        self.first_run = false;
    }

    /// Scales, colours and flags changed. Readouts are refreshed as well.
    pub(super) fn update_components_display(&mut self, updated_source: Option<NavSourceId>) {
        if !self.is_relevant(updated_source) {
            return;
        }

        self.emit_view(ViewSlot::HsiRose, ViewUpdate::SourceSensitivity);
        if self.hsi_map_active {
            self.emit_view(ViewSlot::HsiMap, ViewUpdate::SourceSensitivity);
            self.emit_view(ViewSlot::HsiMapDeviation, ViewUpdate::SourceSensitivity);
        }

        self.update_components_data(updated_source);
    }

    pub(super) fn on_format_change(&mut self, map: bool) {
        debug!("HSI format: {}", if map { "map" } else { "rose" });
        self.hsi_map_active = map;

        if map {
            self.emit_view(ViewSlot::HsiRose, ViewUpdate::Visible(false));
            self.emit_view(ViewSlot::HsiMap, ViewUpdate::Visible(true));
        } else {
            self.emit_view(ViewSlot::HsiMap, ViewUpdate::Visible(false));
            self.emit_view(ViewSlot::HsiRose, ViewUpdate::Visible(true));
        }

        self.update_components_display(None);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test::{degrees, test_bed};
    use super::super::NavIndicatorEffect;
    use super::*;
    use systems::navigation::VorToFrom;

    fn view(slot: ViewSlot, update: ViewUpdate) -> NavIndicatorEffect {
        NavIndicatorEffect::View(slot, update)
    }

    #[test]
    fn first_update_reaches_the_views_for_any_source() {
        let mut test_bed = test_bed().obs(2, degrees(120.));

        assert_eq!(
            test_bed.take_effects(),
            vec![
                view(ViewSlot::DtkBox, ViewUpdate::Data),
                view(ViewSlot::HsiRose, ViewUpdate::Data)
            ]
        );

        let mut test_bed = test_bed.obs(2, degrees(125.));
        assert!(test_bed.take_effects().is_empty());
    }

    #[test]
    fn updates_of_the_active_source_reach_the_views() {
        let mut test_bed = test_bed().obs(2, degrees(120.)).and().obs(1, degrees(45.));

        assert_eq!(
            test_bed.take_effects(),
            vec![
                view(ViewSlot::DtkBox, ViewUpdate::Data),
                view(ViewSlot::HsiRose, ViewUpdate::Data),
                view(ViewSlot::DtkBox, ViewUpdate::Data),
                view(ViewSlot::HsiRose, ViewUpdate::Data)
            ]
        );
        assert_eq!(test_bed.controller().active_source().dtk_obs(), Some(degrees(45.)));
    }

    #[test]
    fn map_format_redirects_readouts_to_the_map() {
        let mut test_bed = test_bed().hsi_format(true);

        assert_eq!(
            test_bed.take_effects(),
            vec![
                view(ViewSlot::HsiRose, ViewUpdate::Visible(false)),
                view(ViewSlot::HsiMap, ViewUpdate::Visible(true)),
                view(ViewSlot::HsiRose, ViewUpdate::SourceSensitivity),
                view(ViewSlot::HsiMap, ViewUpdate::SourceSensitivity),
                view(ViewSlot::HsiMapDeviation, ViewUpdate::SourceSensitivity),
                view(ViewSlot::DtkBox, ViewUpdate::Data),
                view(ViewSlot::HsiMap, ViewUpdate::Data),
                view(ViewSlot::HsiMapDeviation, ViewUpdate::Data),
            ]
        );
        assert!(test_bed.controller().is_hsi_map_active());
    }

    #[test]
    fn rose_format_hides_the_map() {
        let mut test_bed = test_bed().hsi_format(true).and().hsi_format(false);
        let effects = test_bed.take_effects();

        assert!(effects.ends_with(&[
            view(ViewSlot::HsiMap, ViewUpdate::Visible(false)),
            view(ViewSlot::HsiRose, ViewUpdate::Visible(true)),
            view(ViewSlot::HsiRose, ViewUpdate::SourceSensitivity),
            view(ViewSlot::DtkBox, ViewUpdate::Data),
            view(ViewSlot::HsiRose, ViewUpdate::Data),
        ]));
    }

    #[test]
    fn to_from_of_an_inactive_receiver_is_not_redrawn() {
        let mut test_bed = test_bed().obs(1, degrees(0.));
        test_bed.take_effects();

        let mut test_bed = test_bed.vor_to_from(2, VorToFrom::To);
        assert!(test_bed.take_effects().is_empty());
        assert_eq!(test_bed.controller().sources().get(1).to_from(), VorToFrom::To);

        let mut test_bed = test_bed.vor_to_from(1, VorToFrom::To);
        assert_eq!(
            test_bed.take_effects(),
            vec![
                view(ViewSlot::HsiRose, ViewUpdate::SourceSensitivity),
                view(ViewSlot::DtkBox, ViewUpdate::Data),
                view(ViewSlot::HsiRose, ViewUpdate::Data)
            ]
        );
    }
}

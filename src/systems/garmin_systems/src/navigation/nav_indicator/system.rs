use super::{
    FlightManagement, NavIndicatorController, NavIndicatorEffect, NavIndicatorEvent,
    NavIndicatorSubscriptions, NavPublication, ViewRegistry,
};
use crate::config::NavIndicatorConfig;
use std::time::Duration;
use systems::simulation::{key_event_code, SimulatorWriter, VariableIdentifier, Write};
use uom::si::{angle::degree, length::nautical_mile};

/// Hosts a nav indicator controller: filters bus events the way the controller subscribes to
/// them, applies the resulting view updates and writes published values to the simulator.
pub struct NavIndicatorSystem {
    subscriptions: NavIndicatorSubscriptions,
    controller: NavIndicatorController,
    views: ViewRegistry,

    vnav_path_display_id: VariableIdentifier,
    selected_dme_distance_id: VariableIdentifier,
    lnav_calculating_id: VariableIdentifier,
    vnav_display_mode_id: VariableIdentifier,
    gp_display_mode_id: VariableIdentifier,
}

impl NavIndicatorSystem {
    pub fn new(config: NavIndicatorConfig) -> Self {
        Self {
            subscriptions: NavIndicatorSubscriptions::new(&config),
            controller: NavIndicatorController::new(config),
            views: ViewRegistry::new(),

            vnav_path_display_id: VariableIdentifier::new("VNAV_PATH_DISPLAY"),
            selected_dme_distance_id: VariableIdentifier::new("NAV_DME_DISTANCE_SELECTED"),
            lnav_calculating_id: VariableIdentifier::new("LNAV_IS_CALCULATING"),
            vnav_display_mode_id: VariableIdentifier::new("VNAV_DISPLAY_MODE"),
            gp_display_mode_id: VariableIdentifier::new("GP_DISPLAY_MODE"),
        }
    }

    pub fn controller(&self) -> &NavIndicatorController {
        &self.controller
    }

    pub fn views(&mut self) -> &mut ViewRegistry {
        &mut self.views
    }

    pub fn receive(
        &mut self,
        now: Duration,
        event: NavIndicatorEvent,
        fms: &impl FlightManagement,
        writer: &mut impl SimulatorWriter,
    ) {
        if let Some(event) = self.subscriptions.accept(now, event) {
            for effect in self.controller.handle(&event, fms) {
                self.apply(effect, writer);
            }
        }
    }

    fn apply(&mut self, effect: NavIndicatorEffect, writer: &mut impl SimulatorWriter) {
        match effect {
            NavIndicatorEffect::View(slot, update) => self.views.apply(slot, update),
            NavIndicatorEffect::Publish(publication) => self.write(publication, writer),
            NavIndicatorEffect::SlewObs { receiver, course } => writer.execute_calculator_code(
                &key_event_code(
                    &format!("VOR{}_SET", receiver),
                    course.get::<degree>().round(),
                ),
            ),
        }
    }

    fn write(&self, publication: NavPublication, writer: &mut impl SimulatorWriter) {
        match publication {
            NavPublication::VNavPathDisplay(display) => {
                writer.write(&self.vnav_path_display_id, display)
            }
            NavPublication::SelectedDmeDistance(distance) => writer.write(
                &self.selected_dme_distance_id,
                distance.map_or(-1., |distance| distance.get::<nautical_mile>()),
            ),
            NavPublication::LNavCalculating(calculating) => {
                writer.write(&self.lnav_calculating_id, calculating)
            }
            NavPublication::VNavDisplayMode(mode) => {
                writer.write(&self.vnav_display_mode_id, mode as u8)
            }
            NavPublication::GpDisplayMode(mode) => {
                writer.write(&self.gp_display_mode_id, mode as u8)
            }
        }
    }
}

impl Default for NavIndicatorSystem {
    fn default() -> Self {
        Self::new(NavIndicatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test::TestFms, NavIndicatorView, ViewSlot};
    use super::*;
    use std::{cell::RefCell, rc::Rc};
    use systems::{
        navigation::{NavSourceId, VNavPathMode},
        simulation::RecordingSimulatorWriter,
    };
    use uom::si::f64::*;

    #[derive(Default)]
    struct ViewLog {
        data: usize,
        sensitivity: usize,
    }

    struct LoggingView(Rc<RefCell<ViewLog>>);

    impl NavIndicatorView for LoggingView {
        fn update_data(&mut self) {
            self.0.borrow_mut().data += 1;
        }

        fn update_source_sensitivity(&mut self) {
            self.0.borrow_mut().sensitivity += 1;
        }
    }

    fn at(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn published_values_are_written_to_the_simulator() {
        let mut system = NavIndicatorSystem::default();
        let mut writer = RecordingSimulatorWriter::new();
        let fms = TestFms::default();

        system.receive(
            at(0),
            NavIndicatorEvent::VNavPathMode(VNavPathMode::PathActive),
            &fms,
            &mut writer,
        );

        assert_eq!(writer.variable("VNAV_PATH_DISPLAY"), Some(1.));
        assert_eq!(writer.variable("VNAV_DISPLAY_MODE"), Some(1.));
        assert_eq!(writer.variable("GP_DISPLAY_MODE"), None);
    }

    #[test]
    fn localizer_capture_sets_the_course_of_the_receiver() {
        let mut system = NavIndicatorSystem::default();
        let mut writer = RecordingSimulatorWriter::new();
        let fms = TestFms::default();

        system.receive(
            at(0),
            NavIndicatorEvent::IsLocalizerFrequency(super::super::LocalizerFrequency {
                source: NavSourceId::nav(1),
                is_localizer: true,
            }),
            &fms,
            &mut writer,
        );
        system.receive(
            at(10),
            NavIndicatorEvent::Localizer(super::super::Localizer {
                source: NavSourceId::nav(1),
                is_valid: true,
                course: Angle::new::<degree>(274.),
            }),
            &fms,
            &mut writer,
        );

        assert_eq!(writer.calculator_code(), &["274 (>K:VOR1_SET)".to_owned()]);
    }

    #[test]
    fn selected_dme_distance_is_written_with_a_negative_placeholder() {
        let mut system = NavIndicatorSystem::default();
        let mut writer = RecordingSimulatorWriter::new();
        let fms = TestFms::default();

        system.receive(
            at(0),
            NavIndicatorEvent::DmeState(super::super::DmeState {
                source: NavSourceId::nav(1),
                has_dme: true,
                distance: Some(Length::new::<nautical_mile>(12.5)),
            }),
            &fms,
            &mut writer,
        );
        assert_eq!(writer.variable("NAV_DME_DISTANCE_SELECTED"), Some(12.5));

        system.receive(
            at(10),
            NavIndicatorEvent::DmeState(super::super::DmeState {
                source: NavSourceId::nav(1),
                has_dme: false,
                distance: Some(Length::new::<nautical_mile>(12.5)),
            }),
            &fms,
            &mut writer,
        );
        assert_eq!(writer.variable("NAV_DME_DISTANCE_SELECTED"), Some(-1.));
    }

    #[test]
    fn attached_views_are_updated() {
        let log = Rc::new(RefCell::new(ViewLog::default()));
        let mut system = NavIndicatorSystem::default();
        let mut writer = RecordingSimulatorWriter::new();
        let fms = TestFms::default();
        system
            .views()
            .attach(ViewSlot::HsiRose, Box::new(LoggingView(log.clone())));

        system.receive(
            at(0),
            NavIndicatorEvent::CdiSelect(NavSourceId::gps(1)),
            &fms,
            &mut writer,
        );

        assert_eq!(log.borrow().sensitivity, 1);
        assert_eq!(log.borrow().data, 1);
    }

    #[test]
    fn filtered_events_do_not_reach_the_controller() {
        let mut system = NavIndicatorSystem::default();
        let mut writer = RecordingSimulatorWriter::new();
        let fms = TestFms::default();

        system.receive(
            at(0),
            NavIndicatorEvent::Heading(Angle::new::<degree>(90.)),
            &fms,
            &mut writer,
        );
        system.receive(
            at(10),
            NavIndicatorEvent::LNavDtk(Angle::new::<degree>(45.)),
            &fms,
            &mut writer,
        );

        let dtk = system
            .controller()
            .sources()
            .get(super::super::GPS_SOURCE)
            .dtk_obs()
            .unwrap();
        assert!((dtk.get::<degree>() - 90.).abs() < 1e-9);
    }
}

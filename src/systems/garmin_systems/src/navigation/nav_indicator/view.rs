use super::effects::{ViewSlot, ViewUpdate};
use uom::si::f64::*;

/// What a display component has to offer to be driven by the nav indicator controller.
pub trait NavIndicatorView {
    fn update_data(&mut self);
    fn update_source_sensitivity(&mut self);

    fn update_deviation(&mut self) {}
    fn set_visible(&mut self, _visible: bool) {}
    fn set_circle_visible(&mut self, _visible: bool) {}
    fn set_bearing_pointer_visible(&mut self, _index: usize, _visible: bool) {}
    fn set_bearing_pointer_rotation(&mut self, _index: usize, _rotation: Angle) {}
}

#[derive(Default)]
pub struct ViewRegistry {
    views: [Option<Box<dyn NavIndicatorView>>; ViewSlot::COUNT],
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a view to a slot and returns the view previously attached there.
    pub fn attach(
        &mut self,
        slot: ViewSlot,
        view: Box<dyn NavIndicatorView>,
    ) -> Option<Box<dyn NavIndicatorView>> {
        self.views[slot as usize].replace(view)
    }

    pub fn apply(&mut self, slot: ViewSlot, update: ViewUpdate) {
        if let Some(view) = self.views[slot as usize].as_mut() {
            match update {
                ViewUpdate::Data => view.update_data(),
                ViewUpdate::SourceSensitivity => view.update_source_sensitivity(),
                ViewUpdate::Deviation => view.update_deviation(),
                ViewUpdate::Visible(visible) => view.set_visible(visible),
                ViewUpdate::CircleVisible(visible) => view.set_circle_visible(visible),
                ViewUpdate::BearingPointerVisible { index, visible } => {
                    view.set_bearing_pointer_visible(index, visible)
                }
                ViewUpdate::BearingPointerRotation { index, rotation } => {
                    view.set_bearing_pointer_rotation(index, rotation)
                }
            }
        }
    }
}

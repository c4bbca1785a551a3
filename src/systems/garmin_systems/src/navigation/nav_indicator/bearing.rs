use super::{
    sources::GPS_SOURCE, BearingSource, BearingValidity, NavIndicatorController, ViewSlot,
    ViewUpdate,
};
use systems::navigation::{normalize_heading, NavSourceId, NavSourceType};
use tracing::warn;
use uom::si::{angle::degree, f64::*};

/// The state of one of the two bearing pointers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BearingPointer {
    status: bool,
    adf: bool,
    direction: Option<Angle>,
    source: Option<NavSourceId>,
    source_index: Option<usize>,
    valid: bool,
}

impl BearingPointer {
    /// Whether a source is assigned to the pointer.
    pub fn is_active(&self) -> bool {
        self.status
    }

    /// ADF bearings are relative to the aircraft heading.
    pub fn is_adf(&self) -> bool {
        self.adf
    }

    /// The last received direction, as received.
    pub fn direction(&self) -> Option<Angle> {
        self.direction
    }

    pub fn source(&self) -> Option<NavSourceId> {
        self.source
    }

    /// Registry slot of the source, if it is one of the tracked sources.
    pub fn source_index(&self) -> Option<usize> {
        self.source_index
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl NavIndicatorController {
    pub(super) fn update_bearing_source(&mut self, data: &BearingSource) {
        if data.index >= self.bearing_pointers.len() {
            warn!("bearing pointer {} does not exist", data.index);
            return;
        }

        let source_index = data.source.and_then(|source| self.sources.index_of(source));
        let pointer = &mut self.bearing_pointers[data.index];
        pointer.source = data.source;
        match data.source {
            Some(source) => {
                pointer.status = true;
                pointer.adf = source.source_type() == NavSourceType::Adf;
                pointer.source_index = source_index;
            }
            None => {
                pointer.status = false;
                pointer.adf = false;
                pointer.source_index = None;
            }
        }

        if let Some(direction) = pointer.direction {
            self.update_bearing_direction(data.index, Some(direction));
        }

        let circle_visible = self.bearing_pointers.iter().any(|pointer| pointer.status);
        self.emit_view(ViewSlot::HsiRose, ViewUpdate::CircleVisible(circle_visible));

        self.update_bearing_pointer_visibility(data.index);
    }

    pub(super) fn update_bearing_validity(&mut self, data: &BearingValidity) {
        match self.bearing_pointers.get_mut(data.index) {
            Some(pointer) => pointer.valid = data.valid,
            None => {
                warn!("bearing pointer {} does not exist", data.index);
                return;
            }
        }

        self.update_bearing_pointer_visibility(data.index);
    }

    /// Rotates the pointer on both the rose and the map, whether or not it is visible.
    pub(super) fn update_bearing_direction(&mut self, index: usize, direction: Option<Angle>) {
        let heading = self.current_heading;
        let pointer = match self.bearing_pointers.get_mut(index) {
            Some(pointer) => pointer,
            None => {
                warn!("bearing pointer {} does not exist", index);
                return;
            }
        };

        pointer.direction = direction;
        let direction = if pointer.adf {
            direction.map(|relative| normalize_heading(relative + heading))
        } else {
            direction
        };

        if let Some(direction) = direction {
            let rotation = Angle::new::<degree>((direction.get::<degree>() * 100.).round() / 100.);
            for slot in [ViewSlot::HsiRose, ViewSlot::HsiMap] {
                self.emit_view(slot, ViewUpdate::BearingPointerRotation { index, rotation });
            }
        }
    }

    /// Rechecks the visibility of every pointer showing the given registry slot, whose
    /// localizer state may have changed underneath it.
    pub(super) fn update_bearing_pointers_on(&mut self, source_index: usize) {
        for index in 0..self.bearing_pointers.len() {
            if self.bearing_pointers[index].source_index == Some(source_index) {
                self.update_bearing_pointer_visibility(index);
            }
        }
    }

    /// A pointer is hidden without a valid signal and never points at a localizer.
    fn is_bearing_pointer_visible(&self, index: usize) -> bool {
        let pointer = &self.bearing_pointers[index];
        let points_at_localizer = pointer
            .source_index
            .filter(|source_index| *source_index < GPS_SOURCE)
            .map_or(false, |source_index| {
                self.sources.get(source_index).is_localizer()
            });

        pointer.source.is_some() && pointer.valid && !points_at_localizer
    }

    fn update_bearing_pointer_visibility(&mut self, index: usize) {
        let visible = self.is_bearing_pointer_visible(index);
        for slot in [ViewSlot::HsiRose, ViewSlot::HsiMap] {
            self.emit_view(slot, ViewUpdate::BearingPointerVisible { index, visible });
        }
    }
}

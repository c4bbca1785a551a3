use super::modes::{GpDisplayMode, VNavDisplayMode};
use uom::si::f64::*;

/// The views a nav indicator controller can drive. Each slot is optional on a given display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewSlot {
    HsiRose = 0,
    HsiMap = 1,
    HsiMapDeviation = 2,
    Vdi = 3,
    DtkBox = 4,
}

impl ViewSlot {
    pub const COUNT: usize = 5;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewUpdate {
    /// Course and deviation readouts changed.
    Data,
    /// Scale markers, colours and annunciations changed.
    SourceSensitivity,
    /// Vertical deviation changed.
    Deviation,
    Visible(bool),
    CircleVisible(bool),
    BearingPointerVisible { index: usize, visible: bool },
    BearingPointerRotation { index: usize, rotation: Angle },
}

/// Values the controller publishes for other instruments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavPublication {
    VNavDisplayMode(VNavDisplayMode),
    GpDisplayMode(GpDisplayMode),
    VNavPathDisplay(bool),
    /// `None` when the selected source has no usable DME.
    SelectedDmeDistance(Option<Length>),
    LNavCalculating(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavIndicatorEffect {
    View(ViewSlot, ViewUpdate),
    Publish(NavPublication),
    /// Turn the OBS of receiver `receiver` (1 or 2) to `course`, in whole degrees.
    SlewObs { receiver: u8, course: Angle },
}

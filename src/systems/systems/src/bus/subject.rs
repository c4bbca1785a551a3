/// A value which tells its owner whether a newly set value actually changed it. Subscribers of
/// a subject are only notified of changes, never of identical values being set again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subject<T> {
    value: T,
}

impl<T: Copy + PartialEq> Subject<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Sets the value and returns true when it differs from the previous value.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            false
        } else {
            self.value = value;
            true
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for Subject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// The "when changed" subscription filter for discrete values such as modes and flags.
#[derive(Clone, Copy, Debug)]
pub struct WhenChangedDiscrete<T> {
    last: Option<T>,
}

impl<T: Copy + PartialEq> WhenChangedDiscrete<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn accept(&mut self, value: T) -> bool {
        if self.last == Some(value) {
            false
        } else {
            self.last = Some(value);
            true
        }
    }
}

impl<T: Copy + PartialEq> Default for WhenChangedDiscrete<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Consumers of the simulator event bus rarely want every update of a value. High rate
//! streams are downsampled when a consumer subscribes, either by waiting for a change, by
//! quantizing the value or by limiting the update frequency.

use enum_dispatch::enum_dispatch;
use std::time::Duration;

mod subject;

pub use subject::{Subject, WhenChangedDiscrete};

#[enum_dispatch]
pub trait ConsumerFilter {
    /// Returns the value to hand to the handler, or `None` when the update is filtered out.
    fn filter(&mut self, now: Duration, value: f64) -> Option<f64>;
}

#[enum_dispatch(ConsumerFilter)]
#[derive(Clone, Debug)]
pub enum NumericFilter {
    Unfiltered(Unfiltered),
    WhenChanged(WhenChanged),
    WithPrecision(WithPrecision),
    WhenChangedBy(WhenChangedBy),
    AtFrequency(AtFrequency),
}

impl Default for NumericFilter {
    fn default() -> Self {
        unfiltered()
    }
}

pub fn unfiltered() -> NumericFilter {
    Unfiltered.into()
}

pub fn when_changed() -> NumericFilter {
    WhenChanged { last: None }.into()
}

/// Rounds values to `precision` decimal places and only passes on a change of the rounded
/// value.
pub fn with_precision(precision: i32) -> NumericFilter {
    WithPrecision {
        factor: 10_f64.powi(precision),
        last: None,
    }
    .into()
}

/// Passes a value on once it differs from the last passed value by at least `amount`.
pub fn when_changed_by(amount: f64) -> NumericFilter {
    WhenChangedBy {
        amount: amount.abs(),
        last: None,
    }
    .into()
}

/// Passes at most `frequency` values per second.
pub fn at_frequency(frequency: f64) -> NumericFilter {
    let period = if frequency > 0. {
        Duration::from_secs_f64(1. / frequency)
    } else {
        Duration::ZERO
    };

    AtFrequency {
        period,
        last_passed: None,
    }
    .into()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Unfiltered;

impl ConsumerFilter for Unfiltered {
    fn filter(&mut self, _: Duration, value: f64) -> Option<f64> {
        Some(value)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WhenChanged {
    last: Option<f64>,
}

impl ConsumerFilter for WhenChanged {
    fn filter(&mut self, _: Duration, value: f64) -> Option<f64> {
        if self.last == Some(value) {
            None
        } else {
            self.last = Some(value);
            Some(value)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WithPrecision {
    factor: f64,
    last: Option<f64>,
}

impl ConsumerFilter for WithPrecision {
    fn filter(&mut self, _: Duration, value: f64) -> Option<f64> {
        let rounded = (value * self.factor).round() / self.factor;
        if self.last == Some(rounded) {
            None
        } else {
            self.last = Some(rounded);
            Some(rounded)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WhenChangedBy {
    amount: f64,
    last: Option<f64>,
}

impl ConsumerFilter for WhenChangedBy {
    fn filter(&mut self, _: Duration, value: f64) -> Option<f64> {
        match self.last {
            Some(last) if (value - last).abs() < self.amount => None,
            _ => {
                self.last = Some(value);
                Some(value)
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AtFrequency {
    period: Duration,
    last_passed: Option<Duration>,
}

impl ConsumerFilter for AtFrequency {
    fn filter(&mut self, now: Duration, value: f64) -> Option<f64> {
        match self.last_passed {
            Some(last) if now.saturating_sub(last) < self.period => None,
            _ => {
                self.last_passed = Some(now);
                Some(value)
            }
        }
    }
}

use fxhash::FxHashMap;
use std::fmt::{Display, Formatter};

/// Names a simulator variable which systems read from or write to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableIdentifier(String);

impl VariableIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for VariableIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outbound edge towards the simulator: named variables and key events.
pub trait SimulatorWriter {
    fn write_f64(&mut self, identifier: &VariableIdentifier, value: f64);

    /// Executes a snippet of reverse polish calculator code, e.g. `274 (>K:VOR1_SET)`.
    fn execute_calculator_code(&mut self, code: &str);
}

pub trait Write<T> {
    fn write(&mut self, identifier: &VariableIdentifier, value: T);
}

impl<W: SimulatorWriter + ?Sized> Write<f64> for W {
    fn write(&mut self, identifier: &VariableIdentifier, value: f64) {
        self.write_f64(identifier, value);
    }
}

impl<W: SimulatorWriter + ?Sized> Write<bool> for W {
    fn write(&mut self, identifier: &VariableIdentifier, value: bool) {
        self.write_f64(identifier, if value { 1. } else { 0. });
    }
}

impl<W: SimulatorWriter + ?Sized> Write<u8> for W {
    fn write(&mut self, identifier: &VariableIdentifier, value: u8) {
        self.write_f64(identifier, value as f64);
    }
}

/// Builds the calculator code which transmits a key event with a single parameter.
pub fn key_event_code(event: &str, value: f64) -> String {
    format!("{} (>K:{})", value, event)
}

/// Keeps everything written to it. Used by hosts without a simulator attached and in tests.
#[derive(Default)]
pub struct RecordingSimulatorWriter {
    variables: FxHashMap<VariableIdentifier, f64>,
    calculator_code: Vec<String>,
}

impl RecordingSimulatorWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables
            .get(&VariableIdentifier::new(name))
            .copied()
    }

    pub fn calculator_code(&self) -> &[String] {
        &self.calculator_code
    }
}

impl SimulatorWriter for RecordingSimulatorWriter {
    fn write_f64(&mut self, identifier: &VariableIdentifier, value: f64) {
        self.variables.insert(identifier.clone(), value);
    }

    fn execute_calculator_code(&mut self, code: &str) {
        self.calculator_code.push(code.to_owned());
    }
}

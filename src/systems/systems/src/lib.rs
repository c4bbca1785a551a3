pub mod bus;
pub mod navigation;
pub mod simulation;

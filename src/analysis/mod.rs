//! Consumers of the engine's public state: energy, periods, alignment, transfers

pub mod alignment;
pub mod energy;
pub mod hohmann;
pub mod orbit;

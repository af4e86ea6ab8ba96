//! Service layer
//!
//! - [`SimulationService`] - calculator, history and planning scenarios
//! - [`ClientService`] - managed clients and weekly ad metrics

pub mod clients;
pub mod simulation;

pub use clients::ClientService;
pub use simulation::{Calculation, SimulationService};

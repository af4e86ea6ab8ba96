//! GPS Calc - marketplace fee and margin engine
//!
//! # Overview
//!
//! Given a product's cost structure and a marketplace's fee rule, computes
//! every deduction (commission, fixed fee, tax, marketing, shipping), the
//! resulting profit, margin and ROI, and solves for the sale price that hits
//! a target margin. All platforms can be ranked side by side and per-unit
//! economics projected over a sales volume.
//!
//! # Module Layout
//!
//! ```text
//! fee-engine/src/
//! ├── pricing/     # pure fee engine (calculator, solver, comparator, projection)
//! ├── catalog/     # marketplace fee rules
//! ├── storage/     # redb list store (history, scenarios, clients, metrics)
//! ├── services/    # catalog + store + engine operations
//! ├── metrics/     # ad performance rollups
//! ├── core/        # configuration and process setup
//! ├── utils/       # logging and validation
//! └── cli/         # gps-calc command line
//! ```

pub mod catalog;
pub mod cli;
pub mod core;
pub mod metrics;
pub mod pricing;
pub mod services;
pub mod storage;
pub mod utils;

pub use catalog::PlatformCatalog;
pub use core::{Config, load_dotenv, setup_environment};
pub use pricing::{
    ComparisonRow, ShippingTreatment, TargetPlan, compare_all_platforms, compute_result,
    plan_for_target, project_scenario, solve_price_for_margin,
};
pub use services::{ClientService, SimulationService};
pub use storage::{SimulationStore, StorageError, StorageResult};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

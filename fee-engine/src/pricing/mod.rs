//! Marketplace fee engine
//!
//! Pure functions over a [`PlatformRule`](shared::models::PlatformRule) and a
//! resolved [`CostInput`](shared::models::CostInput). Nothing here touches
//! storage or global state; the catalog is always passed in.
//!
//! - [`compute_result`]: deductions, profit, margin, ROI, break-even
//! - [`solve_price_for_margin`]: sale price for a target margin
//! - [`compare_all_platforms`]: every platform ranked by profit
//! - [`project_scenario`]: per-unit economics scaled to a volume

pub mod calculator;
pub mod comparator;
pub mod money;
pub mod projection;
pub mod shipping;
pub mod solver;

pub use calculator::{commission_rate, compute_result};
pub use comparator::{ComparisonRow, compare_all_platforms};
pub use money::round_money;
pub use projection::project_scenario;
pub use shipping::{ShippingTreatment, effective_shipping, is_shipping_locked, shipping_treatment};
pub use solver::{TargetPlan, plan_for_target, solve_price_for_margin};

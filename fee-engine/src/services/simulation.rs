//! Simulation Service - calculator operations over the catalog and the store
//!
//! The engine functions in [`crate::pricing`] are pure; this service resolves
//! platform ids against the catalog, turns form state into engine input and
//! persists history and planning scenarios.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{
    CalculationResult, CalculatorState, PlanningScenario, PlatformRule, SavedSimulation,
    ScenarioProjection,
};

use crate::catalog::PlatformCatalog;
use crate::pricing::{
    ComparisonRow, ShippingTreatment, TargetPlan, commission_rate, compare_all_platforms,
    compute_result, plan_for_target, project_scenario, shipping_treatment,
};
use crate::storage::{SCENARIOS_KEY, SimulationStore};
use crate::utils::validation::{validate_state, validate_target_margin, validate_volume};

/// Forward calculation with the context a form displays next to it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub platform: PlatformRule,
    /// Commission rate applied (%)
    pub commission_rate: f64,
    pub shipping: ShippingTreatment,
    pub shipping_label: &'static str,
    pub result: CalculationResult,
}

/// Calculator, history and planning operations
#[derive(Clone)]
pub struct SimulationService {
    catalog: Arc<PlatformCatalog>,
    store: SimulationStore,
}

impl fmt::Debug for SimulationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationService")
            .field("platforms", &self.catalog.rules().len())
            .finish()
    }
}

impl SimulationService {
    pub fn new(catalog: Arc<PlatformCatalog>, store: SimulationStore) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &PlatformCatalog {
        &self.catalog
    }

    // ========== Engine ==========

    /// Forward calculation for one platform
    pub fn calculate(&self, platform_id: &str, state: &CalculatorState) -> AppResult<Calculation> {
        validate_state(state)?;
        let rule = self.catalog.get(platform_id)?;
        let input = state.resolve();
        let shipping = shipping_treatment(rule, input.sale_price);

        Ok(Calculation {
            platform: rule.clone(),
            commission_rate: commission_rate(rule, &input),
            shipping,
            shipping_label: shipping.label(),
            result: compute_result(rule, &input),
        })
    }

    /// Every platform, most profitable first
    pub fn compare(&self, state: &CalculatorState) -> AppResult<Vec<ComparisonRow>> {
        validate_state(state)?;
        Ok(compare_all_platforms(self.catalog.rules(), &state.resolve()))
    }

    /// Break-even and target prices for a margin, projected over a volume
    pub fn plan(
        &self,
        platform_id: &str,
        state: &CalculatorState,
        target_margin: f64,
        volume: u32,
    ) -> AppResult<TargetPlan> {
        validate_state(state)?;
        validate_target_margin(target_margin)?;
        validate_volume(volume)?;
        let rule = self.catalog.get(platform_id)?;
        Ok(plan_for_target(rule, &state.resolve(), target_margin, volume))
    }

    /// Current per-unit economics scaled to a volume
    pub fn project(
        &self,
        platform_id: &str,
        state: &CalculatorState,
        units: u32,
    ) -> AppResult<ScenarioProjection> {
        validate_state(state)?;
        validate_volume(units)?;
        let rule = self.catalog.get(platform_id)?;
        Ok(project_scenario(rule, &state.resolve(), units))
    }

    // ========== History ==========

    /// Save the current form to history (newest first)
    pub fn save_simulation(
        &self,
        product_name: &str,
        platform_id: &str,
        state: &CalculatorState,
    ) -> AppResult<SavedSimulation> {
        validate_state(state)?;
        let rule = self.catalog.get(platform_id)?;
        let summary = compute_result(rule, &state.resolve()).summary();

        let simulation = SavedSimulation::new(product_name, &rule.id, state.clone(), summary)?;
        self.store.save_simulation(&simulation)?;

        tracing::info!(
            id = %simulation.id,
            product = %simulation.product_name,
            platform = %simulation.platform_id,
            "Simulation saved"
        );
        Ok(simulation)
    }

    pub fn history(&self) -> AppResult<Vec<SavedSimulation>> {
        Ok(self.store.load_history()?)
    }

    /// Look up a saved simulation to restore its form
    pub fn load_simulation(&self, id: &str) -> AppResult<SavedSimulation> {
        self.store
            .load_history()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::simulation_not_found(id))
    }

    pub fn delete_simulation(&self, id: &str) -> AppResult<()> {
        if !self.store.delete_simulation(id)? {
            return Err(AppError::simulation_not_found(id));
        }
        tracing::info!(id, "Simulation deleted");
        Ok(())
    }

    // ========== Planning Scenarios ==========

    /// Save a planning scenario from the current form
    pub fn save_scenario(
        &self,
        product_name: &str,
        platform_id: &str,
        state: &CalculatorState,
        target_units: Option<u32>,
    ) -> AppResult<PlanningScenario> {
        validate_state(state)?;
        validate_volume(target_units.unwrap_or(0))?;
        let rule = self.catalog.get(platform_id)?;
        let projection = project_scenario(rule, &state.resolve(), target_units.unwrap_or(0));

        let scenario = PlanningScenario::new(
            product_name,
            &rule.id,
            target_units,
            state.clone(),
            projection,
        )?;
        self.store.save_scenario(&scenario)?;

        tracing::info!(
            id = %scenario.id,
            product = %scenario.product_name,
            platform = %scenario.platform_id,
            units = scenario.units(),
            "Planning scenario saved"
        );
        Ok(scenario)
    }

    pub fn scenarios(&self) -> AppResult<Vec<PlanningScenario>> {
        Ok(self.store.load_scenarios()?)
    }

    /// Change target units and recompute the projection
    ///
    /// `None` keeps the field empty and projects zero units.
    pub fn set_scenario_units(
        &self,
        id: &str,
        target_units: Option<u32>,
    ) -> AppResult<PlanningScenario> {
        validate_volume(target_units.unwrap_or(0))?;
        self.update_scenario(id, |scenario| {
            scenario.target_units = target_units;
            Ok(())
        })
    }

    /// Move a scenario to another platform and recompute the projection
    pub fn set_scenario_platform(&self, id: &str, platform_id: &str) -> AppResult<PlanningScenario> {
        let rule = self.catalog.get(platform_id)?;
        self.update_scenario(id, |scenario| {
            scenario.platform_id = rule.id.clone();
            Ok(())
        })
    }

    pub fn delete_scenario(&self, id: &str) -> AppResult<()> {
        if !self.store.delete_scenario(id)? {
            return Err(AppError::scenario_not_found(id));
        }
        tracing::info!(id, "Planning scenario deleted");
        Ok(())
    }

    /// Apply `edit`, then recompute `current_results` from the saved inputs
    fn update_scenario<F>(&self, id: &str, edit: F) -> AppResult<PlanningScenario>
    where
        F: FnOnce(&mut PlanningScenario) -> AppResult<()>,
    {
        let catalog = &self.catalog;
        self.store
            .update_list(SCENARIOS_KEY, |scenarios: &mut Vec<PlanningScenario>| {
                let scenario = scenarios
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(|| AppError::scenario_not_found(id))?;

                edit(scenario)?;

                let rule = catalog.get(&scenario.platform_id)?;
                scenario.current_results = project_scenario(
                    rule,
                    &scenario.saved_inputs.resolve(),
                    scenario.units(),
                );

                tracing::debug!(
                    id,
                    platform = %scenario.platform_id,
                    units = scenario.units(),
                    "Planning scenario recomputed"
                );
                Ok(scenario.clone())
            })
    }
}

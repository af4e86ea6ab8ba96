//! Client Service - sellers under management and their weekly ad metrics

use std::sync::Arc;

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Client, MetricValues, WeeklyMetric};

use crate::catalog::PlatformCatalog;
use crate::metrics::{
    AdStats, ClientSummary, MetricsFilter, WeeklyComparison, client_summaries, overview,
    weekly_comparison,
};
use crate::storage::SimulationStore;

#[derive(Clone)]
pub struct ClientService {
    catalog: Arc<PlatformCatalog>,
    store: SimulationStore,
}

impl ClientService {
    pub fn new(catalog: Arc<PlatformCatalog>, store: SimulationStore) -> Self {
        Self { catalog, store }
    }

    pub fn clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.store.load_clients()?)
    }

    fn find_client(&self, id: &str) -> AppResult<Client> {
        self.store
            .load_clients()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                AppError::new(ErrorCode::ClientNotFound).with_detail("client_id", id)
            })
    }

    fn check_platforms(&self, platforms: &[String]) -> AppResult<()> {
        for id in platforms {
            self.catalog.get(id)?;
        }
        Ok(())
    }

    pub fn create_client(
        &self,
        name: &str,
        platforms: Vec<String>,
        is_active: bool,
    ) -> AppResult<Client> {
        self.check_platforms(&platforms)?;
        let client = Client::create(name, platforms, is_active)?;
        self.store.save_client(&client)?;
        tracing::info!(id = %client.id, name = %client.name, "Client created");
        Ok(client)
    }

    pub fn update_client(
        &self,
        id: &str,
        name: &str,
        platforms: Vec<String>,
        is_active: bool,
    ) -> AppResult<Client> {
        self.check_platforms(&platforms)?;
        let client = self.find_client(id)?.update(name, platforms, is_active)?;
        self.store.save_client(&client)?;
        tracing::info!(id = %client.id, active = client.is_active, "Client updated");
        Ok(client)
    }

    /// Remove a client and every metric recorded for it
    pub fn delete_client(&self, id: &str) -> AppResult<()> {
        if !self.store.delete_client(id)? {
            return Err(AppError::new(ErrorCode::ClientNotFound).with_detail("client_id", id));
        }
        tracing::info!(id, "Client deleted");
        Ok(())
    }

    /// Record one week of numbers for a client on a platform
    pub fn record_metric(
        &self,
        client_id: &str,
        platform_id: &str,
        week_start: NaiveDate,
        values: MetricValues,
    ) -> AppResult<WeeklyMetric> {
        self.find_client(client_id)?;
        self.catalog.get(platform_id)?;

        let metric = WeeklyMetric::new(client_id, platform_id, week_start, values)?;
        self.store.save_metric(&metric)?;
        tracing::info!(
            client = client_id,
            platform = platform_id,
            week = %week_start,
            "Weekly metric recorded"
        );
        Ok(metric)
    }

    pub fn delete_metric(&self, id: &str) -> AppResult<()> {
        if !self.store.delete_metric(id)? {
            return Err(AppError::not_found(format!("Weekly metric {id}")));
        }
        Ok(())
    }

    /// Totals across active clients
    pub fn overview(&self, filter: &MetricsFilter) -> AppResult<AdStats> {
        let clients = self.store.load_clients()?;
        let metrics = self.store.load_metrics()?;
        Ok(overview(&clients, &metrics, filter, &self.catalog))
    }

    /// Active clients with sales, highest revenue first
    pub fn summaries(&self, filter: &MetricsFilter) -> AppResult<Vec<ClientSummary>> {
        let clients = self.store.load_clients()?;
        let metrics = self.store.load_metrics()?;
        Ok(client_summaries(&clients, &metrics, filter, &self.catalog))
    }

    /// Latest week against the previous one for a client
    pub fn weekly_comparison(&self, client_id: &str) -> AppResult<WeeklyComparison> {
        self.find_client(client_id)?;
        let metrics = self.store.load_metrics()?;
        Ok(weekly_comparison(client_id, &metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ClientService {
        ClientService::new(
            Arc::new(PlatformCatalog::builtin()),
            SimulationStore::open_in_memory().unwrap(),
        )
    }

    fn week(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn values(revenue: f64) -> MetricValues {
        MetricValues {
            revenue,
            ad_spend: revenue / 5.0,
            impressions: 2000,
            clicks: 40,
            orders: 4,
        }
    }

    #[test]
    fn test_client_lifecycle() {
        let service = service();
        let client = service
            .create_client("Loja X", vec!["shopee_std".to_string()], true)
            .unwrap();

        let edited = service
            .update_client(&client.id, "Loja X2", vec![], false)
            .unwrap();
        assert_eq!(edited.id, client.id);
        assert_eq!(service.clients().unwrap(), vec![edited]);

        service.delete_client(&client.id).unwrap();
        assert!(service.clients().unwrap().is_empty());
        let err = service.delete_client(&client.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::ClientNotFound);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let service = service();
        let err = service
            .create_client("Loja", vec!["ebay".to_string()], true)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PlatformNotFound);
    }

    #[test]
    fn test_metrics_rollup() {
        let service = service();
        let a = service.create_client("A", vec![], true).unwrap();
        let b = service.create_client("B", vec![], true).unwrap();

        service.record_metric(&a.id, "amazon", week(4), values(100.0)).unwrap();
        service.record_metric(&a.id, "amazon", week(11), values(300.0)).unwrap();
        service.record_metric(&b.id, "magalu", week(11), values(1000.0)).unwrap();

        let totals = service.overview(&MetricsFilter::default()).unwrap();
        assert_eq!(totals.revenue, 1400.0);
        assert_eq!(totals.roas, 5.0);

        let rows = service.summaries(&MetricsFilter::default()).unwrap();
        assert_eq!(rows[0].client.id, b.id);

        let comparison = service.weekly_comparison(&a.id).unwrap();
        assert_eq!(comparison.current.unwrap().stats.revenue, 300.0);
        assert_eq!(comparison.previous.unwrap().stats.revenue, 100.0);
    }

    #[test]
    fn test_record_metric_checks_references() {
        let service = service();
        let err = service
            .record_metric("ghost", "amazon", week(4), values(10.0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ClientNotFound);

        let client = service.create_client("A", vec![], true).unwrap();
        let err = service
            .record_metric(&client.id, "ebay", week(4), values(10.0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PlatformNotFound);
    }
}

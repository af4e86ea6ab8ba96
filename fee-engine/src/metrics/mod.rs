//! Advertising performance rollups
//!
//! Sums manually entered [`WeeklyMetric`]s and derives ROAS, CTR and
//! conversion rate. Only active clients count towards the overview and the
//! per-client ranking; the week-over-week view covers one client regardless.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::{Client, WeeklyMetric};

use crate::catalog::PlatformCatalog;
use crate::pricing::money::{ratio_percent, to_decimal, to_f64};

/// Totals and derived ratios for a set of metric entries
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdStats {
    pub revenue: f64,
    pub ad_spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub orders: u64,
    /// revenue / ad spend
    pub roas: f64,
    /// clicks / impressions (%)
    pub ctr: f64,
    /// orders / clicks (%)
    pub conversion: f64,
}

impl AdStats {
    pub fn from_metrics<'a>(metrics: impl IntoIterator<Item = &'a WeeklyMetric>) -> Self {
        let mut revenue = Decimal::ZERO;
        let mut ad_spend = Decimal::ZERO;
        let mut impressions = 0u64;
        let mut clicks = 0u64;
        let mut orders = 0u64;

        for m in metrics {
            revenue = revenue.saturating_add(to_decimal(m.revenue));
            ad_spend = ad_spend.saturating_add(to_decimal(m.ad_spend));
            impressions = impressions.saturating_add(m.impressions);
            clicks = clicks.saturating_add(m.clicks);
            orders = orders.saturating_add(m.orders);
        }

        let roas = if ad_spend > Decimal::ZERO {
            revenue.checked_div(ad_spend).unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        };

        Self {
            revenue: to_f64(revenue),
            ad_spend: to_f64(ad_spend),
            impressions,
            clicks,
            orders,
            roas: to_f64(roas),
            ctr: to_f64(ratio_percent(Decimal::from(clicks), Decimal::from(impressions))),
            conversion: to_f64(ratio_percent(Decimal::from(orders), Decimal::from(clicks))),
        }
    }

    /// Nothing sold and nothing earned
    pub fn is_empty(&self) -> bool {
        self.revenue <= 0.0 && self.orders == 0
    }
}

/// Narrow the dashboard to one client and/or one marketplace
#[derive(Debug, Clone, Default)]
pub struct MetricsFilter {
    pub client_id: Option<String>,
    /// Marketplace name ("Shopee"), matching every tier of it
    pub marketplace: Option<String>,
}

impl MetricsFilter {
    fn matches_platform(&self, metric: &WeeklyMetric, catalog: &PlatformCatalog) -> bool {
        match &self.marketplace {
            Some(name) => catalog
                .find(&metric.platform_id)
                .is_some_and(|rule| &rule.name == name),
            None => true,
        }
    }

    fn matches_client(&self, client_id: &str) -> bool {
        self.client_id.as_deref().is_none_or(|id| id == client_id)
    }
}

/// One row of the client ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub client: Client,
    pub stats: AdStats,
}

/// Totals across active clients
pub fn overview(
    clients: &[Client],
    metrics: &[WeeklyMetric],
    filter: &MetricsFilter,
    catalog: &PlatformCatalog,
) -> AdStats {
    let active: Vec<&str> = clients
        .iter()
        .filter(|c| c.is_active)
        .map(|c| c.id.as_str())
        .collect();

    AdStats::from_metrics(metrics.iter().filter(|m| {
        active.contains(&m.client_id.as_str())
            && filter.matches_client(&m.client_id)
            && filter.matches_platform(m, catalog)
    }))
}

/// Active clients with sales, highest revenue first
pub fn client_summaries(
    clients: &[Client],
    metrics: &[WeeklyMetric],
    filter: &MetricsFilter,
    catalog: &PlatformCatalog,
) -> Vec<ClientSummary> {
    let mut rows: Vec<ClientSummary> = clients
        .iter()
        .filter(|c| c.is_active && filter.matches_client(&c.id))
        .map(|client| ClientSummary {
            client: client.clone(),
            stats: AdStats::from_metrics(metrics.iter().filter(|m| {
                m.client_id == client.id && filter.matches_platform(m, catalog)
            })),
        })
        .filter(|row| !row.stats.is_empty())
        .collect();

    rows.sort_by(|a, b| b.stats.revenue.total_cmp(&a.stats.revenue));
    rows
}

/// One week's totals for a client
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStats {
    pub week_start: NaiveDate,
    pub stats: AdStats,
}

/// Latest week against the one before it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyComparison {
    pub current: Option<WeekStats>,
    pub previous: Option<WeekStats>,
}

/// Per-week totals for a client, newest week first
pub fn weekly_totals(client_id: &str, metrics: &[WeeklyMetric]) -> Vec<WeekStats> {
    let mut weeks: BTreeMap<NaiveDate, Vec<&WeeklyMetric>> = BTreeMap::new();
    for m in metrics.iter().filter(|m| m.client_id == client_id) {
        weeks.entry(m.week_start).or_default().push(m);
    }

    weeks
        .into_iter()
        .rev()
        .map(|(week_start, entries)| WeekStats {
            week_start,
            stats: AdStats::from_metrics(entries),
        })
        .collect()
}

/// The two most recent weeks with data for a client
pub fn weekly_comparison(client_id: &str, metrics: &[WeeklyMetric]) -> WeeklyComparison {
    let mut weeks = weekly_totals(client_id, metrics).into_iter();
    WeeklyComparison {
        current: weeks.next(),
        previous: weeks.next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, active: bool) -> Client {
        Client {
            id: id.to_string(),
            name: format!("Cliente {id}"),
            platforms: vec![],
            created_at: 0,
            is_active: active,
        }
    }

    fn metric(client_id: &str, platform_id: &str, day: u32, revenue: f64, orders: u64) -> WeeklyMetric {
        WeeklyMetric {
            id: format!("{client_id}-{platform_id}-{day}"),
            client_id: client_id.to_string(),
            platform_id: platform_id.to_string(),
            week_start: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            revenue,
            ad_spend: revenue / 4.0,
            impressions: 1000,
            clicks: 50,
            orders,
        }
    }

    #[test]
    fn test_ad_stats_ratios() {
        let metrics = [
            metric("c1", "amazon", 4, 800.0, 5),
            metric("c1", "shopee_std", 4, 400.0, 5),
        ];
        let stats = AdStats::from_metrics(&metrics);
        assert_eq!(stats.revenue, 1200.0);
        assert_eq!(stats.ad_spend, 300.0);
        assert_eq!(stats.roas, 4.0);
        assert_eq!(stats.ctr, 5.0);
        assert_eq!(stats.conversion, 10.0);
    }

    #[test]
    fn test_ad_stats_zero_guards() {
        let stats = AdStats::from_metrics(std::iter::empty::<&WeeklyMetric>());
        assert_eq!(stats, AdStats::default());
        assert!(stats.is_empty());
    }

    #[test]
    fn test_client_summaries() {
        let catalog = PlatformCatalog::builtin();
        let clients = [client("a", true), client("b", true), client("c", false), client("d", true)];
        let metrics = [
            metric("a", "amazon", 4, 100.0, 1),
            metric("b", "amazon", 4, 900.0, 9),
            metric("c", "amazon", 4, 5000.0, 50),
            metric("d", "amazon", 4, 0.0, 0),
        ];

        let rows = client_summaries(&clients, &metrics, &MetricsFilter::default(), &catalog);
        let ids: Vec<_> = rows.iter().map(|r| r.client.id.as_str()).collect();
        // Inactive and empty clients are left out
        assert_eq!(ids, vec!["b", "a"]);

        let totals = overview(&clients, &metrics, &MetricsFilter::default(), &catalog);
        assert_eq!(totals.revenue, 1000.0);
    }

    #[test]
    fn test_marketplace_filter_covers_all_tiers() {
        let catalog = PlatformCatalog::builtin();
        let clients = [client("a", true)];
        let metrics = [
            metric("a", "shopee_std", 4, 100.0, 1),
            metric("a", "shopee_free", 4, 200.0, 2),
            metric("a", "amazon", 4, 400.0, 4),
        ];
        let filter = MetricsFilter {
            client_id: None,
            marketplace: Some("Shopee".to_string()),
        };
        assert_eq!(overview(&clients, &metrics, &filter, &catalog).revenue, 300.0);
    }

    #[test]
    fn test_weekly_comparison_newest_first() {
        let metrics = [
            metric("a", "amazon", 4, 100.0, 1),
            metric("a", "amazon", 18, 300.0, 3),
            metric("a", "shopee_std", 11, 200.0, 2),
            metric("a", "amazon", 11, 50.0, 1),
            metric("b", "amazon", 25, 999.0, 9),
        ];
        let comparison = weekly_comparison("a", &metrics);

        let current = comparison.current.unwrap();
        let previous = comparison.previous.unwrap();
        assert_eq!(current.week_start, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert_eq!(previous.week_start, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(previous.stats.revenue, 250.0);
        assert_eq!(weekly_totals("a", &metrics).len(), 3);
    }

    #[test]
    fn test_weekly_comparison_without_data() {
        let comparison = weekly_comparison("nobody", &[]);
        assert!(comparison.current.is_none());
        assert!(comparison.previous.is_none());
    }
}

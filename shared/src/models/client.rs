//! Seller clients and their weekly marketplace metrics

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::{new_record_id, now_millis};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest accepted client name
pub const MAX_CLIENT_NAME_LEN: usize = 200;

/// Managed seller account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Marketplaces enabled for this client
    #[serde(default)]
    pub platforms: Vec<String>,
    pub created_at: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Client {
    /// New active-or-paused client with a fresh id
    pub fn create(name: &str, platforms: Vec<String>, is_active: bool) -> AppResult<Self> {
        Ok(Self {
            id: new_record_id(),
            name: validate_client_name(name)?,
            platforms,
            created_at: now_millis(),
            is_active,
        })
    }

    /// Edited copy; id and creation time are kept
    pub fn update(&self, name: &str, platforms: Vec<String>, is_active: bool) -> AppResult<Self> {
        Ok(Self {
            id: self.id.clone(),
            name: validate_client_name(name)?,
            platforms,
            created_at: self.created_at,
            is_active,
        })
    }
}

fn validate_client_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::ClientNameRequired));
    }
    if name.chars().count() > MAX_CLIENT_NAME_LEN {
        return Err(AppError::validation(format!(
            "Client name is too long (max {MAX_CLIENT_NAME_LEN})"
        ))
        .with_detail("field", "name"));
    }
    Ok(name.to_string())
}

/// Manually entered advertising/sales numbers for one client, platform and week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMetric {
    pub id: String,
    pub client_id: String,
    pub platform_id: String,
    /// First day of the week (YYYY-MM-DD)
    pub week_start: NaiveDate,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub ad_spend: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub orders: u64,
}

/// Numbers typed into the weekly data entry form
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricValues {
    pub revenue: f64,
    pub ad_spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub orders: u64,
}

impl WeeklyMetric {
    /// New metric entry with a fresh id
    ///
    /// Client and platform ids are required; amounts must be finite and not
    /// negative. Whether the ids exist is checked by the caller.
    pub fn new(
        client_id: &str,
        platform_id: &str,
        week_start: NaiveDate,
        values: MetricValues,
    ) -> AppResult<Self> {
        if client_id.trim().is_empty() {
            return Err(
                AppError::new(ErrorCode::RequiredField).with_detail("field", "clientId")
            );
        }
        if platform_id.trim().is_empty() {
            return Err(
                AppError::new(ErrorCode::RequiredField).with_detail("field", "platformId")
            );
        }
        for (field, value) in [("revenue", values.revenue), ("adSpend", values.ad_spend)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::with_message(
                    ErrorCode::MetricInvalid,
                    format!("{field} must be a non-negative number"),
                )
                .with_detail("field", field));
            }
        }

        Ok(Self {
            id: new_record_id(),
            client_id: client_id.to_string(),
            platform_id: platform_id.to_string(),
            week_start,
            revenue: values.revenue,
            ad_spend: values.ad_spend,
            impressions: values.impressions,
            clicks: values.clicks,
            orders: values.orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_week_start_is_iso_date() {
        let json = r#"{
            "id": "m1", "clientId": "c1", "platformId": "shopee_std",
            "weekStart": "2024-03-04", "revenue": 1200.5, "adSpend": 300,
            "impressions": 10000, "clicks": 250, "orders": 12
        }"#;
        let metric: WeeklyMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.week_start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(metric.clicks, 250);

        let back = serde_json::to_value(&metric).unwrap();
        assert_eq!(back["weekStart"], "2024-03-04");
    }

    #[test]
    fn test_client_defaults_to_active() {
        let client: Client =
            serde_json::from_str(r#"{"id": "c1", "name": "Loja X", "createdAt": 0}"#).unwrap();
        assert!(client.is_active);
        assert!(client.platforms.is_empty());
    }

    #[test]
    fn test_create_and_update_client() {
        let client = Client::create("  Loja X ", vec!["amazon".to_string()], true).unwrap();
        assert_eq!(client.name, "Loja X");
        assert_eq!(client.id.len(), 36);

        let edited = client.update("Loja Y", vec![], false).unwrap();
        assert_eq!(edited.id, client.id);
        assert_eq!(edited.created_at, client.created_at);
        assert!(!edited.is_active);

        let err = Client::create("   ", vec![], true).unwrap_err();
        assert_eq!(err.code, ErrorCode::ClientNameRequired);
    }

    #[test]
    fn test_new_metric_validation() {
        let week = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let values = MetricValues {
            revenue: 500.0,
            ad_spend: 100.0,
            impressions: 4000,
            clicks: 80,
            orders: 4,
        };

        let metric = WeeklyMetric::new("c1", "shopee_std", week, values).unwrap();
        assert_eq!(metric.clicks, 80);

        let err = WeeklyMetric::new("", "shopee_std", week, values).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let negative = MetricValues {
            ad_spend: -1.0,
            ..values
        };
        let err = WeeklyMetric::new("c1", "shopee_std", week, negative).unwrap_err();
        assert_eq!(err.code, ErrorCode::MetricInvalid);
    }
}

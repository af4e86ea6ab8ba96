//! Marketplace fee rules (one entry per marketplace tier)

use serde::{Deserialize, Serialize};

/// Who carries the shipping cost on a marketplace tier
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShippingPolicy {
    /// Buyer pays shipping below the price threshold; at or above it the
    /// listing ships free to the customer and the seller pays.
    BuyerPaysBelowThreshold { threshold: f64 },
    /// Shipping is already covered by the commission rate.
    IncludedInCommission,
    /// Seller always pays the entered shipping cost.
    #[default]
    SellerPays,
}

/// Fee rule for a marketplace tier
///
/// Several tiers may share a `name` (e.g. Mercado Livre Clássico/Premium).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRule {
    pub id: String,
    pub name: String,
    /// Tier label ("Clássico", "Premium", "Padrão", ...)
    #[serde(rename = "type")]
    pub tier: String,
    /// Percentage of the sale price kept by the platform
    pub default_commission: f64,
    /// Flat amount charged per sale
    pub default_fixed_fee: f64,
    /// Sale price below which the fixed fee is charged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Charge the fixed fee regardless of price (wins over `threshold`)
    #[serde(default)]
    pub always_apply_fixed: bool,
    #[serde(default)]
    pub shipping_policy: ShippingPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl PlatformRule {
    /// Display name with tier, e.g. "Mercado Livre Premium"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.tier)
    }

    /// Whether the fixed fee is charged at the given sale price
    pub fn fixed_fee_applies(&self, sale_price: f64) -> bool {
        if self.always_apply_fixed {
            return true;
        }
        matches!(self.threshold, Some(threshold) if sale_price < threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(threshold: Option<f64>, always: bool) -> PlatformRule {
        PlatformRule {
            id: "test".to_string(),
            name: "Test".to_string(),
            tier: "Padrão".to_string(),
            default_commission: 10.0,
            default_fixed_fee: 5.0,
            threshold,
            always_apply_fixed: always,
            shipping_policy: ShippingPolicy::SellerPays,
            color: None,
            logo_url: None,
        }
    }

    #[test]
    fn test_fixed_fee_threshold() {
        let r = rule(Some(79.0), false);
        assert!(r.fixed_fee_applies(78.99));
        assert!(!r.fixed_fee_applies(79.0));
        assert!(!r.fixed_fee_applies(120.0));
    }

    #[test]
    fn test_always_apply_wins_over_threshold() {
        let r = rule(Some(79.0), true);
        assert!(r.fixed_fee_applies(500.0));
    }

    #[test]
    fn test_no_threshold_no_fee() {
        let r = rule(None, false);
        assert!(!r.fixed_fee_applies(0.0));
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": "ml_classic",
            "name": "Mercado Livre",
            "type": "Clássico",
            "defaultCommission": 14,
            "defaultFixedFee": 6.75,
            "threshold": 79,
            "alwaysApplyFixed": false,
            "shippingPolicy": { "kind": "buyer_pays_below_threshold", "threshold": 79 }
        }"#;
        let r: PlatformRule = serde_json::from_str(json).unwrap();
        assert_eq!(r.tier, "Clássico");
        assert_eq!(r.threshold, Some(79.0));
        assert_eq!(
            r.shipping_policy,
            ShippingPolicy::BuyerPaysBelowThreshold { threshold: 79.0 }
        );
        assert_eq!(r.display_name(), "Mercado Livre Clássico");
    }

    #[test]
    fn test_shipping_policy_defaults_to_seller_pays() {
        let json = r#"{
            "id": "amazon", "name": "Amazon", "type": "Padrão",
            "defaultCommission": 14, "defaultFixedFee": 0, "alwaysApplyFixed": true
        }"#;
        let r: PlatformRule = serde_json::from_str(json).unwrap();
        assert_eq!(r.shipping_policy, ShippingPolicy::SellerPays);
        assert_eq!(ShippingPolicy::default(), ShippingPolicy::SellerPays);
    }
}

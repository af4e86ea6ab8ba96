//! Shipping treatment per marketplace policy
//!
//! The same branch decides both the shipping amount charged to the seller
//! and the label the form shows next to the shipping field.

use serde::{Deserialize, Serialize};
use shared::models::{PlatformRule, ShippingPolicy};

/// How shipping is handled for one sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingTreatment {
    /// Covered by the commission (e.g. Shopee free-shipping tier)
    IncludedInCommission,
    /// Buyer pays (e.g. Mercado Livre below R$ 79)
    PaidByBuyer,
    /// Free for the customer, seller pays (e.g. Mercado Livre from R$ 79)
    FreeForCustomer,
    /// Seller pays the entered shipping cost
    PaidBySeller,
}

impl ShippingTreatment {
    /// Label shown on the shipping input
    pub fn label(&self) -> &'static str {
        match self {
            Self::IncludedInCommission => "Frete (Incluso na comissão)",
            Self::PaidByBuyer => "Frete (Pago pelo Comprador)",
            Self::FreeForCustomer => "Frete (Grátis p/ Cliente)",
            Self::PaidBySeller => "Frete (Pago por você)",
        }
    }

    /// Whether the seller's shipping input is ignored (forced to zero)
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::IncludedInCommission | Self::PaidByBuyer)
    }
}

/// Resolve the shipping treatment for a rule at a given sale price
pub fn shipping_treatment(rule: &PlatformRule, sale_price: f64) -> ShippingTreatment {
    match rule.shipping_policy {
        ShippingPolicy::IncludedInCommission => ShippingTreatment::IncludedInCommission,
        ShippingPolicy::BuyerPaysBelowThreshold { threshold } if sale_price < threshold => {
            ShippingTreatment::PaidByBuyer
        }
        ShippingPolicy::BuyerPaysBelowThreshold { .. } => ShippingTreatment::FreeForCustomer,
        ShippingPolicy::SellerPays => ShippingTreatment::PaidBySeller,
    }
}

/// Whether the shipping input should be disabled on the form
pub fn is_shipping_locked(rule: &PlatformRule, sale_price: f64) -> bool {
    shipping_treatment(rule, sale_price).is_locked()
}

/// Shipping amount the seller pays
pub fn effective_shipping(rule: &PlatformRule, sale_price: f64, shipping_input: f64) -> f64 {
    if is_shipping_locked(rule, sale_price) {
        0.0
    } else {
        shipping_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlatformCatalog;

    #[test]
    fn test_mercado_livre_threshold() {
        let catalog = PlatformCatalog::builtin();
        let ml = catalog.get("ml_classic").unwrap();

        let below = shipping_treatment(ml, 78.9);
        assert_eq!(below, ShippingTreatment::PaidByBuyer);
        assert_eq!(below.label(), "Frete (Pago pelo Comprador)");
        assert_eq!(effective_shipping(ml, 78.9, 20.0), 0.0);

        let at = shipping_treatment(ml, 79.0);
        assert_eq!(at, ShippingTreatment::FreeForCustomer);
        assert_eq!(at.label(), "Frete (Grátis p/ Cliente)");
        assert_eq!(effective_shipping(ml, 79.0, 20.0), 20.0);
    }

    #[test]
    fn test_shopee_free_shipping_tier() {
        let catalog = PlatformCatalog::builtin();
        let shopee_free = catalog.get("shopee_free").unwrap();
        let treatment = shipping_treatment(shopee_free, 500.0);
        assert_eq!(treatment, ShippingTreatment::IncludedInCommission);
        assert!(treatment.is_locked());
        assert_eq!(effective_shipping(shopee_free, 500.0, 12.0), 0.0);
    }

    #[test]
    fn test_seller_pays_everywhere_else() {
        let catalog = PlatformCatalog::builtin();
        for id in ["shopee_std", "amazon", "magalu", "tiktok"] {
            let rule = catalog.get(id).unwrap();
            let treatment = shipping_treatment(rule, 10.0);
            assert_eq!(treatment, ShippingTreatment::PaidBySeller, "{id}");
            assert_eq!(treatment.label(), "Frete (Pago por você)");
            assert_eq!(effective_shipping(rule, 10.0, 8.5), 8.5);
        }
    }
}

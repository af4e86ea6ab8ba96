//! Marketplace fee catalog
//!
//! An immutable table of [`PlatformRule`]s, built in or loaded from a JSON
//! file once at startup and then passed to every calculation.

use std::collections::HashSet;
use std::path::Path;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PlatformRule, ShippingPolicy};

/// Mercado Livre charges its fixed fee and leaves shipping to the buyer below this price
const ML_THRESHOLD: f64 = 79.0;

/// Ordered, validated set of platform rules
#[derive(Debug, Clone)]
pub struct PlatformCatalog {
    rules: Vec<PlatformRule>,
}

impl PlatformCatalog {
    /// Marketplace rates shipped with the calculator
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Validate and wrap a rule list
    ///
    /// Rejects an empty list, duplicate ids and negative or non-finite amounts.
    pub fn from_rules(rules: Vec<PlatformRule>) -> AppResult<Self> {
        if rules.is_empty() {
            return Err(AppError::new(ErrorCode::CatalogEmpty));
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.trim().is_empty() {
                return Err(AppError::with_message(
                    ErrorCode::CatalogInvalid,
                    "Platform id must not be empty",
                ));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(
                    AppError::new(ErrorCode::DuplicatePlatform).with_detail("platform_id", rule.id.clone())
                );
            }
            validate_rule(rule)?;
        }

        Ok(Self { rules })
    }

    /// Load a catalog from a JSON array of rules
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        let rules: Vec<PlatformRule> = serde_json::from_str(&raw).map_err(|e| {
            AppError::with_message(
                ErrorCode::CatalogInvalid,
                format!("Invalid catalog {}: {e}", path.display()),
            )
        })?;

        let catalog = Self::from_rules(rules)?;
        tracing::info!(
            path = %path.display(),
            platforms = catalog.rules.len(),
            "Platform catalog loaded"
        );
        Ok(catalog)
    }

    /// All rules in catalog order
    pub fn rules(&self) -> &[PlatformRule] {
        &self.rules
    }

    pub fn find(&self, id: &str) -> Option<&PlatformRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Look up a rule, failing with `PlatformNotFound`
    pub fn get(&self, id: &str) -> AppResult<&PlatformRule> {
        self.find(id).ok_or_else(|| AppError::platform_not_found(id))
    }
}

fn validate_rule(rule: &PlatformRule) -> AppResult<()> {
    let amounts = [
        ("defaultCommission", rule.default_commission),
        ("defaultFixedFee", rule.default_fixed_fee),
        ("threshold", rule.threshold.unwrap_or(0.0)),
    ];
    for (field, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::with_message(
                ErrorCode::CatalogInvalid,
                format!("{field} of platform {} must be a non-negative number", rule.id),
            )
            .with_detail("platform_id", rule.id.clone()));
        }
    }
    Ok(())
}

fn rule(
    id: &str,
    name: &str,
    tier: &str,
    commission: f64,
    fixed_fee: f64,
    color: &str,
) -> PlatformRule {
    PlatformRule {
        id: id.to_string(),
        name: name.to_string(),
        tier: tier.to_string(),
        default_commission: commission,
        default_fixed_fee: fixed_fee,
        threshold: None,
        always_apply_fixed: true,
        shipping_policy: ShippingPolicy::SellerPays,
        color: Some(color.to_string()),
        logo_url: None,
    }
}

fn mercado_livre(id: &str, tier: &str, commission: f64) -> PlatformRule {
    PlatformRule {
        threshold: Some(ML_THRESHOLD),
        always_apply_fixed: false,
        shipping_policy: ShippingPolicy::BuyerPaysBelowThreshold {
            threshold: ML_THRESHOLD,
        },
        ..rule(id, "Mercado Livre", tier, commission, 6.75, "#FFE600")
    }
}

fn builtin_rules() -> Vec<PlatformRule> {
    vec![
        mercado_livre("ml_classic", "Clássico", 14.0),
        mercado_livre("ml_premium", "Premium", 19.0),
        rule("shopee_std", "Shopee", "Padrão", 14.0, 4.0, "#EE4D2D"),
        PlatformRule {
            shipping_policy: ShippingPolicy::IncludedInCommission,
            ..rule("shopee_free", "Shopee", "Frete Grátis", 20.0, 4.0, "#EE4D2D")
        },
        rule("amazon", "Amazon", "Padrão", 14.0, 0.0, "#FF9900"),
        rule("magalu", "Magalu", "Padrão", 20.0, 5.0, "#0086FF"),
        rule("tiktok", "Tik Tok", "Shop", 6.0, 2.0, "#000000"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PlatformCatalog::builtin();
        assert_eq!(catalog.rules().len(), 7);
        assert_eq!(catalog.rules()[0].id, "ml_classic");

        let ml = catalog.get("ml_premium").unwrap();
        assert_eq!(ml.default_commission, 19.0);
        assert_eq!(ml.threshold, Some(79.0));
        assert!(!ml.always_apply_fixed);

        let shopee = catalog.get("shopee_free").unwrap();
        assert_eq!(shopee.shipping_policy, ShippingPolicy::IncludedInCommission);
        assert!(shopee.always_apply_fixed);
    }

    #[test]
    fn test_unknown_platform() {
        let catalog = PlatformCatalog::builtin();
        assert!(catalog.find("ebay").is_none());
        let err = catalog.get("ebay").unwrap_err();
        assert_eq!(err.code, ErrorCode::PlatformNotFound);
    }

    #[test]
    fn test_from_rules_validation() {
        assert_eq!(
            PlatformCatalog::from_rules(vec![]).unwrap_err().code,
            ErrorCode::CatalogEmpty
        );

        let amazon = PlatformCatalog::builtin().get("amazon").unwrap().clone();
        let err = PlatformCatalog::from_rules(vec![amazon.clone(), amazon.clone()]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicatePlatform);

        let negative = PlatformRule {
            default_commission: -1.0,
            ..amazon.clone()
        };
        let err = PlatformCatalog::from_rules(vec![negative]).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogInvalid);

        let nan_fee = PlatformRule {
            default_fixed_fee: f64::NAN,
            ..amazon
        };
        assert!(PlatformCatalog::from_rules(vec![nan_fee]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "id": "olist", "name": "Olist", "type": "Padrão",
                "defaultCommission": 19, "defaultFixedFee": 5,
                "alwaysApplyFixed": true
            }}]"#
        )
        .unwrap();

        let catalog = PlatformCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.rules().len(), 1);
        assert_eq!(catalog.get("olist").unwrap().default_fixed_fee, 5.0);
    }

    #[test]
    fn test_load_errors() {
        let err = PlatformCatalog::load("/nonexistent/catalog.json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = PlatformCatalog::load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogInvalid);
    }
}

//! Decoded receipt types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One decoded App Store receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Bundle identifier of the app the receipt belongs to.
    pub bundle_identifier: String,
    /// App version the receipt was issued for.
    pub app_version: String,
    /// Version of the app that was originally purchased.
    pub original_app_version: String,
    /// When the receipt was created.
    pub creation_date: Option<DateTime<Utc>>,
    /// When the receipt expires (volume purchase program only).
    pub expiration_date: Option<DateTime<Utc>>,
    /// Original purchase date (pre-orders).
    pub original_purchase_date: Option<DateTime<Utc>>,
    /// Opaque value used for hash computation.
    pub opaque_value: Vec<u8>,
    /// SHA-1 hash used to validate the receipt.
    pub hash: Vec<u8>,
    /// Age rating of the app.
    pub age_rating: String,
    /// Base64 encoding of the raw receipt file.
    pub base64: String,
    /// In-app purchases in receipt order.
    pub purchases: Vec<PurchaseRecord>,
}

impl ReceiptRecord {
    /// Whether the receipt lists any in-app purchase.
    pub fn has_purchases(&self) -> bool {
        !self.purchases.is_empty()
    }

    /// Number of auto-renewable subscriptions active at `now`.
    pub fn active_subscription_count(&self, now: DateTime<Utc>) -> usize {
        self.purchases
            .iter()
            .filter(|p| p.is_active_auto_renewable_subscription(now))
            .count()
    }
}

/// One in-app purchase entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub quantity: i64,
    pub product_identifier: String,
    pub transaction_identifier: String,
    pub original_transaction_identifier: String,
    pub purchase_date: DateTime<Utc>,
    pub original_purchase_date: Option<DateTime<Utc>>,
    pub subscription_expiration_date: Option<DateTime<Utc>>,
    pub cancellation_date: Option<DateTime<Utc>>,
    pub subscription_trial_period: bool,
    pub subscription_introductory_price_period: bool,
    pub product_type: ProductType,
    pub web_order_line_item_id: Option<i64>,
    pub promotional_offer_identifier: Option<String>,
}

impl PurchaseRecord {
    /// A single-quantity purchase with every optional field absent.
    pub fn new(
        product_identifier: impl Into<String>,
        transaction_identifier: impl Into<String>,
        purchase_date: DateTime<Utc>,
    ) -> Self {
        let transaction_identifier = transaction_identifier.into();
        Self {
            quantity: 1,
            product_identifier: product_identifier.into(),
            original_transaction_identifier: transaction_identifier.clone(),
            transaction_identifier,
            purchase_date,
            original_purchase_date: None,
            subscription_expiration_date: None,
            cancellation_date: None,
            subscription_trial_period: false,
            subscription_introductory_price_period: false,
            product_type: ProductType::Unknown,
            web_order_line_item_id: None,
            promotional_offer_identifier: None,
        }
    }

    /// Subscriptions carry an expiration date; nothing else does.
    pub fn is_renewable_subscription(&self) -> bool {
        self.subscription_expiration_date.is_some()
    }

    /// Active means not cancelled and `purchase_date <= now < expiration`.
    pub fn is_active_auto_renewable_subscription(&self, now: DateTime<Utc>) -> bool {
        if self.cancellation_date.is_some() {
            return false;
        }
        match self.subscription_expiration_date {
            Some(expires) => self.purchase_date <= now && now < expires,
            None => false,
        }
    }
}

/// Product type as recorded in the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductType {
    #[default]
    Unknown,
    NonConsumable,
    Consumable,
    NonRenewingSubscription,
    AutoRenewableSubscription,
}

impl ProductType {
    /// Map the raw attribute value; out-of-range values are `Unknown`.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => ProductType::NonConsumable,
            1 => ProductType::Consumable,
            2 => ProductType::NonRenewingSubscription,
            3 => ProductType::AutoRenewableSubscription,
            _ => ProductType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Unknown => "unknown",
            ProductType::NonConsumable => "nonConsumable",
            ProductType::Consumable => "consumable",
            ProductType::NonRenewingSubscription => "nonRenewingSubscription",
            ProductType::AutoRenewableSubscription => "autoRenewableSubscription",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

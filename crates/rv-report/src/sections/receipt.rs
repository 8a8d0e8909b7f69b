//! Receipt and in-app purchase rows.

use super::table::{CellValue, TableRow};
use chrono::{DateTime, Utc};
use rv_receipt::{PurchaseRecord, ReceiptRecord};

/// Title of the extra row shown for renewable subscriptions.
pub const ACTIVE_SUBSCRIPTION_TITLE: &str = "Is Active Auto Renewable Subscription";

/// Top-level receipt fields in display order.
pub fn receipt_rows(receipt: &ReceiptRecord) -> Vec<TableRow<'_>> {
    vec![
        TableRow::new("bundleIdentifier", CellValue::Text(&receipt.bundle_identifier)),
        TableRow::new("appVersion", CellValue::Text(&receipt.app_version)),
        TableRow::new(
            "originalAppVersion",
            CellValue::Text(&receipt.original_app_version),
        ),
        TableRow::new("creationDate", CellValue::OptionalDate(receipt.creation_date)),
        TableRow::new(
            "expirationDate",
            CellValue::OptionalDate(receipt.expiration_date),
        ),
        TableRow::new("opaqueValue", CellValue::Bytes(&receipt.opaque_value)),
        TableRow::new("hash", CellValue::Bytes(&receipt.hash)),
        TableRow::new("ageRating", CellValue::Text(&receipt.age_rating)),
        TableRow::new("base64", CellValue::Text(&receipt.base64)),
    ]
}

/// Rows for one purchase. Renewable subscriptions get an activity row
/// evaluated at `now`.
pub fn purchase_rows(purchase: &PurchaseRecord, now: DateTime<Utc>) -> Vec<TableRow<'_>> {
    let mut rows = vec![
        TableRow::new("quantity", CellValue::Integer(purchase.quantity)),
        TableRow::new(
            "productIdentifier",
            CellValue::Text(&purchase.product_identifier),
        ),
        TableRow::new(
            "transactionIdentifier",
            CellValue::Text(&purchase.transaction_identifier),
        ),
        TableRow::new(
            "originalTransactionIdentifier",
            CellValue::Text(&purchase.original_transaction_identifier),
        ),
        TableRow::new("purchaseDate", CellValue::Date(purchase.purchase_date)),
        TableRow::new(
            "originalPurchaseDate",
            CellValue::OptionalDate(purchase.original_purchase_date),
        ),
        TableRow::new(
            "subscriptionExpirationDate",
            CellValue::OptionalDate(purchase.subscription_expiration_date),
        ),
        TableRow::new(
            "subscriptionTrialPeriod",
            CellValue::Bool(purchase.subscription_trial_period),
        ),
        TableRow::new(
            "subscriptionIntroductoryPricePeriod",
            CellValue::Bool(purchase.subscription_introductory_price_period),
        ),
        TableRow::new(
            "cancellationDate",
            CellValue::OptionalDate(purchase.cancellation_date),
        ),
        TableRow::new("productType", CellValue::Text(purchase.product_type.as_str())),
        TableRow::new(
            "webOrderLineItemID",
            CellValue::OptionalInteger(purchase.web_order_line_item_id),
        ),
        TableRow::new(
            "promotionalOfferIdentifier",
            CellValue::OptionalText(purchase.promotional_offer_identifier.as_deref()),
        ),
    ];

    if purchase.is_renewable_subscription() {
        rows.push(TableRow::new(
            ACTIVE_SUBSCRIPTION_TITLE,
            CellValue::Bool(purchase.is_active_auto_renewable_subscription(now)),
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_receipt_row_order() {
        let receipt = ReceiptRecord::default();
        let rows = receipt_rows(&receipt);
        let titles: Vec<&str> = rows.iter().map(|r| r.title).collect();
        assert_eq!(
            titles,
            [
                "bundleIdentifier",
                "appVersion",
                "originalAppVersion",
                "creationDate",
                "expirationDate",
                "opaqueValue",
                "hash",
                "ageRating",
                "base64",
            ]
        );
    }

    #[test]
    fn test_consumable_has_no_activity_row() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let purchase = PurchaseRecord::new("com.example.coins", "1", now);
        let rows = purchase_rows(&purchase, now);
        assert_eq!(rows.len(), 13);
        assert!(rows.iter().all(|r| r.title != ACTIVE_SUBSCRIPTION_TITLE));
    }

    #[test]
    fn test_subscription_activity_row() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut purchase = PurchaseRecord::new("com.example.monthly", "2", start);
        purchase.subscription_expiration_date = Some(start + Duration::days(30));

        let rows = purchase_rows(&purchase, start + Duration::days(1));
        let last = rows.last().unwrap();
        assert_eq!(last.title, ACTIVE_SUBSCRIPTION_TITLE);
        assert_eq!(last.value, CellValue::Bool(true));

        let rows = purchase_rows(&purchase, start + Duration::days(31));
        assert_eq!(rows.last().unwrap().value, CellValue::Bool(false));
    }
}

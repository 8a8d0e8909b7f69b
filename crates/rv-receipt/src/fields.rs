//! Attribute type numbers found in receipt payloads.

pub const BUNDLE_IDENTIFIER: i64 = 2;
pub const APP_VERSION: i64 = 3;
pub const OPAQUE_VALUE: i64 = 4;
pub const HASH: i64 = 5;
pub const AGE_RATING: i64 = 10;
pub const CREATION_DATE: i64 = 12;
pub const IN_APP_PURCHASE: i64 = 17;
pub const ORIGINAL_PURCHASE_DATE: i64 = 18;
pub const ORIGINAL_APP_VERSION: i64 = 19;
pub const EXPIRATION_DATE: i64 = 21;

/// Attribute numbers inside an in-app purchase set.
pub mod purchase {
    pub const QUANTITY: i64 = 1701;
    pub const PRODUCT_IDENTIFIER: i64 = 1702;
    pub const TRANSACTION_IDENTIFIER: i64 = 1703;
    pub const PURCHASE_DATE: i64 = 1704;
    pub const ORIGINAL_TRANSACTION_IDENTIFIER: i64 = 1705;
    pub const ORIGINAL_PURCHASE_DATE: i64 = 1706;
    pub const SUBSCRIPTION_EXPIRATION_DATE: i64 = 1708;
    pub const WEB_ORDER_LINE_ITEM_ID: i64 = 1711;
    pub const CANCELLATION_DATE: i64 = 1712;
    pub const SUBSCRIPTION_TRIAL_PERIOD: i64 = 1713;
    pub const SUBSCRIPTION_INTRODUCTORY_PRICE_PERIOD: i64 = 1719;
    pub const PROMOTIONAL_OFFER_IDENTIFIER: i64 = 1721;
    pub const PRODUCT_TYPE: i64 = 1722;
}

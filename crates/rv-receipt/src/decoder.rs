//! Receipt decoding.

use crate::fields::{self, purchase};
use crate::model::{ProductType, PurchaseRecord, ReceiptRecord};
use crate::{ReceiptError, Result};

use base64::{prelude::BASE64_STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use cms::content_info::ContentInfo;
use cms::signed_data::SignedData;
use der::asn1::{Ia5StringRef, OctetString, Utf8StringRef};
use der::oid::ObjectIdentifier;
use der::{Any, Decode, Encode, Reader, Sequence, SliceReader, Tag, Tagged};
use std::path::Path;
use tracing::{debug, trace};

/// PKCS#7 `signedData` content type.
pub const SIGNED_DATA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");

/// PKCS#7 `data` content type of the encapsulated payload.
pub const DATA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");

/// Turns raw receipt bytes into a [`ReceiptRecord`].
pub trait ReceiptDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ReceiptRecord>;
}

impl<F> ReceiptDecoder for F
where
    F: Fn(&[u8]) -> Result<ReceiptRecord>,
{
    fn decode(&self, bytes: &[u8]) -> Result<ReceiptRecord> {
        self(bytes)
    }
}

/// Decoder for receipts stored as PKCS#7 signed-data containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerDecoder;

impl ContainerDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ReceiptDecoder for ContainerDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ReceiptRecord> {
        let payload = extract_payload(bytes)?;

        let mut record = ReceiptRecord {
            base64: BASE64_STANDARD.encode(bytes),
            ..Default::default()
        };

        for attribute in read_attributes(&payload)? {
            match attribute.field {
                fields::BUNDLE_IDENTIFIER => record.bundle_identifier = attribute.text()?,
                fields::APP_VERSION => record.app_version = attribute.text()?,
                fields::OPAQUE_VALUE => record.opaque_value = attribute.value,
                fields::HASH => record.hash = attribute.value,
                fields::AGE_RATING => record.age_rating = attribute.text()?,
                fields::CREATION_DATE => record.creation_date = attribute.date()?,
                fields::IN_APP_PURCHASE => record.purchases.push(decode_purchase(&attribute)?),
                fields::ORIGINAL_PURCHASE_DATE => {
                    record.original_purchase_date = attribute.date()?
                }
                fields::ORIGINAL_APP_VERSION => record.original_app_version = attribute.text()?,
                fields::EXPIRATION_DATE => record.expiration_date = attribute.date()?,
                other => trace!(field = other, "Skipping receipt attribute"),
            }
        }

        debug!(
            bundle_identifier = %record.bundle_identifier,
            purchases = record.purchases.len(),
            "Receipt decoded"
        );

        Ok(record)
    }
}

/// Read the receipt at `path` and decode it.
///
/// Every failure, including I/O, is reported as
/// [`ReceiptError::ReceiptUnreadable`].
pub fn decode_file<D>(decoder: &D, path: &Path) -> Result<ReceiptRecord>
where
    D: ReceiptDecoder + ?Sized,
{
    let bytes = std::fs::read(path).map_err(|e| ReceiptError::from(e).into_unreadable())?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read receipt file");
    decoder.decode(&bytes).map_err(ReceiptError::into_unreadable)
}

/// Pull the encapsulated payload out of a signed-data `ContentInfo`.
fn extract_payload(bytes: &[u8]) -> Result<Vec<u8>> {
    let info = ContentInfo::from_der(bytes)?;
    if info.content_type != SIGNED_DATA_OID {
        return Err(ReceiptError::Container(format!(
            "expected signed data, found content type {}",
            info.content_type
        )));
    }

    let signed = SignedData::from_der(&info.content.to_der()?)?;
    let encapsulated = signed.encap_content_info;
    if encapsulated.econtent_type != DATA_OID {
        return Err(ReceiptError::Container(format!(
            "expected data payload, found content type {}",
            encapsulated.econtent_type
        )));
    }

    let content = encapsulated
        .econtent
        .ok_or_else(|| ReceiptError::Container("signed data carries no payload".to_string()))?;
    let payload = OctetString::from_der(&content.to_der()?)?;
    trace!(bytes = payload.as_bytes().len(), "Extracted receipt payload");
    Ok(payload.as_bytes().to_vec())
}

/// Wire form of an attribute set entry.
#[derive(Sequence)]
struct RawAttribute {
    field: i64,
    version: i64,
    value: OctetString,
}

/// One `(type, version, value)` entry of an attribute set.
#[derive(Debug, Clone)]
struct Attribute {
    field: i64,
    value: Vec<u8>,
}

impl Attribute {
    fn invalid(&self, error: der::Error) -> ReceiptError {
        ReceiptError::attribute(self.field, error.to_string())
    }

    fn text(&self) -> Result<String> {
        let value = Any::from_der(&self.value).map_err(|e| self.invalid(e))?;
        let text = match value.tag() {
            Tag::Utf8String => Utf8StringRef::new(value.value()).map(|s| s.to_string()),
            Tag::Ia5String => Ia5StringRef::new(value.value()).map(|s| s.to_string()),
            other => {
                return Err(ReceiptError::attribute(
                    self.field,
                    format!("expected a string, found {}", other),
                ))
            }
        };
        text.map_err(|e| self.invalid(e))
    }

    fn integer(&self) -> Result<i64> {
        i64::from_der(&self.value).map_err(|e| self.invalid(e))
    }

    fn flag(&self) -> Result<bool> {
        Ok(self.integer()? != 0)
    }

    /// RFC 3339 date; an empty string means absent.
    fn date(&self) -> Result<Option<DateTime<Utc>>> {
        let text = self.text()?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        DateTime::parse_from_rfc3339(text)
            .map(|d| Some(d.with_timezone(&Utc)))
            .map_err(|e| ReceiptError::attribute(self.field, format!("bad date '{}': {}", text, e)))
    }
}

/// Read a `SET OF SEQUENCE { type, version, value }` in wire order.
///
/// Entries are not required to be in DER set order.
fn read_attributes(data: &[u8]) -> Result<Vec<Attribute>> {
    let set = Any::from_der(data)?;
    set.tag().assert_eq(Tag::Set)?;

    let mut entries = SliceReader::new(set.value())?;
    let mut attributes = Vec::new();
    while !entries.is_finished() {
        let raw = RawAttribute::decode(&mut entries)?;
        trace!(field = raw.field, version = raw.version, "Read receipt attribute");
        attributes.push(Attribute {
            field: raw.field,
            value: raw.value.as_bytes().to_vec(),
        });
    }

    Ok(attributes)
}

fn decode_purchase(attribute: &Attribute) -> Result<PurchaseRecord> {
    let entries = read_attributes(&attribute.value)
        .map_err(|e| ReceiptError::attribute(attribute.field, e.to_string()))?;

    let mut quantity = 1;
    let mut product_identifier = String::new();
    let mut transaction_identifier = String::new();
    let mut original_transaction_identifier = String::new();
    let mut purchase_date = None;
    let mut original_purchase_date = None;
    let mut subscription_expiration_date = None;
    let mut cancellation_date = None;
    let mut subscription_trial_period = false;
    let mut subscription_introductory_price_period = false;
    let mut product_type = ProductType::Unknown;
    let mut web_order_line_item_id = None;
    let mut promotional_offer_identifier = None;

    for entry in entries {
        match entry.field {
            purchase::QUANTITY => quantity = entry.integer()?,
            purchase::PRODUCT_IDENTIFIER => product_identifier = entry.text()?,
            purchase::TRANSACTION_IDENTIFIER => transaction_identifier = entry.text()?,
            purchase::PURCHASE_DATE => purchase_date = entry.date()?,
            purchase::ORIGINAL_TRANSACTION_IDENTIFIER => {
                original_transaction_identifier = entry.text()?
            }
            purchase::ORIGINAL_PURCHASE_DATE => original_purchase_date = entry.date()?,
            purchase::SUBSCRIPTION_EXPIRATION_DATE => subscription_expiration_date = entry.date()?,
            purchase::WEB_ORDER_LINE_ITEM_ID => web_order_line_item_id = Some(entry.integer()?),
            purchase::CANCELLATION_DATE => cancellation_date = entry.date()?,
            purchase::SUBSCRIPTION_TRIAL_PERIOD => subscription_trial_period = entry.flag()?,
            purchase::SUBSCRIPTION_INTRODUCTORY_PRICE_PERIOD => {
                subscription_introductory_price_period = entry.flag()?
            }
            purchase::PROMOTIONAL_OFFER_IDENTIFIER => {
                let offer = entry.text()?;
                promotional_offer_identifier = (!offer.is_empty()).then_some(offer);
            }
            purchase::PRODUCT_TYPE => product_type = ProductType::from_raw(entry.integer()?),
            other => trace!(field = other, "Skipping purchase attribute"),
        }
    }

    let purchase_date = purchase_date.ok_or_else(|| {
        ReceiptError::attribute(purchase::PURCHASE_DATE, "in-app purchase has no purchase date")
    })?;

    Ok(PurchaseRecord {
        quantity,
        product_identifier,
        transaction_identifier,
        original_transaction_identifier,
        purchase_date,
        original_purchase_date,
        subscription_expiration_date,
        cancellation_date,
        subscription_trial_period,
        subscription_introductory_price_period,
        product_type,
        web_order_line_item_id,
        promotional_offer_identifier,
    })
}

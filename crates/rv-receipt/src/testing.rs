//! Receipt fixtures for tests.
//!
//! Encodes attribute sets and wraps them in a signed-data container with
//! an empty signer list. Enabled with the `test-utils` feature.

use crate::decoder::{DATA_OID, SIGNED_DATA_OID};
use crate::fields::{self, purchase};

/// Universal tag numbers used by the fixtures.
mod universal {
    pub const INTEGER: u8 = 0x02;
    pub const OCTET_STRING: u8 = 0x04;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const UTF8_STRING: u8 = 0x0c;
    pub const IA5_STRING: u8 = 0x16;
}

fn encode_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

/// Definite-length element with a single-byte identifier.
pub fn tlv(identifier: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![identifier];
    encode_length(content.len(), &mut out);
    out.extend_from_slice(content);
    out
}

pub fn integer(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    tlv(universal::INTEGER, &bytes[start..])
}

pub fn utf8(text: &str) -> Vec<u8> {
    tlv(universal::UTF8_STRING, text.as_bytes())
}

pub fn ia5(text: &str) -> Vec<u8> {
    tlv(universal::IA5_STRING, text.as_bytes())
}

pub fn octets(bytes: &[u8]) -> Vec<u8> {
    tlv(universal::OCTET_STRING, bytes)
}

pub fn oid(content: &[u8]) -> Vec<u8> {
    tlv(universal::OBJECT_IDENTIFIER, content)
}

pub fn sequence(parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(0x30, &parts.concat())
}

pub fn set(parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(0x31, &parts.concat())
}

/// `[0] EXPLICIT`
pub fn explicit0(inner: Vec<u8>) -> Vec<u8> {
    tlv(0xa0, &inner)
}

/// Wrap a payload in a DER signed-data container.
pub fn signed_data(payload: &[u8]) -> Vec<u8> {
    let encapsulated = sequence(&[oid(DATA_OID.as_bytes()), explicit0(octets(payload))]);
    let signed = sequence(&[integer(1), set(&[]), encapsulated, set(&[])]);
    sequence(&[oid(SIGNED_DATA_OID.as_bytes()), explicit0(signed)])
}

fn attribute(field: i64, value: Vec<u8>) -> Vec<u8> {
    sequence(&[integer(field), integer(1), octets(&value)])
}

/// Builder for an in-app purchase attribute set.
#[derive(Debug, Clone, Default)]
pub struct PurchaseBuilder {
    attributes: Vec<(i64, Vec<u8>)>,
}

impl PurchaseBuilder {
    pub fn new(product_identifier: &str, transaction_identifier: &str, purchase_date: &str) -> Self {
        Self::default()
            .text(purchase::PRODUCT_IDENTIFIER, product_identifier)
            .text(purchase::TRANSACTION_IDENTIFIER, transaction_identifier)
            .date(purchase::PURCHASE_DATE, purchase_date)
    }

    fn text(mut self, field: i64, value: &str) -> Self {
        self.attributes.push((field, utf8(value)));
        self
    }

    fn date(mut self, field: i64, value: &str) -> Self {
        self.attributes.push((field, ia5(value)));
        self
    }

    fn int(mut self, field: i64, value: i64) -> Self {
        self.attributes.push((field, integer(value)));
        self
    }

    /// Drop the purchase date added by [`PurchaseBuilder::new`].
    pub fn without_purchase_date(mut self) -> Self {
        self.attributes
            .retain(|(field, _)| *field != purchase::PURCHASE_DATE);
        self
    }

    pub fn quantity(self, quantity: i64) -> Self {
        self.int(purchase::QUANTITY, quantity)
    }

    pub fn original_transaction_identifier(self, value: &str) -> Self {
        self.text(purchase::ORIGINAL_TRANSACTION_IDENTIFIER, value)
    }

    pub fn original_purchase_date(self, value: &str) -> Self {
        self.date(purchase::ORIGINAL_PURCHASE_DATE, value)
    }

    pub fn subscription_expiration_date(self, value: &str) -> Self {
        self.date(purchase::SUBSCRIPTION_EXPIRATION_DATE, value)
    }

    pub fn cancellation_date(self, value: &str) -> Self {
        self.date(purchase::CANCELLATION_DATE, value)
    }

    pub fn web_order_line_item_id(self, value: i64) -> Self {
        self.int(purchase::WEB_ORDER_LINE_ITEM_ID, value)
    }

    pub fn trial_period(self, value: bool) -> Self {
        self.int(purchase::SUBSCRIPTION_TRIAL_PERIOD, i64::from(value))
    }

    pub fn introductory_price_period(self, value: bool) -> Self {
        self.int(purchase::SUBSCRIPTION_INTRODUCTORY_PRICE_PERIOD, i64::from(value))
    }

    pub fn promotional_offer_identifier(self, value: &str) -> Self {
        self.text(purchase::PROMOTIONAL_OFFER_IDENTIFIER, value)
    }

    pub fn product_type(self, raw: i64) -> Self {
        self.int(purchase::PRODUCT_TYPE, raw)
    }

    fn encode(&self) -> Vec<u8> {
        let encoded: Vec<Vec<u8>> = self
            .attributes
            .iter()
            .map(|(field, value)| attribute(*field, value.clone()))
            .collect();
        set(&encoded)
    }
}

/// Builder for a complete receipt.
#[derive(Debug, Clone, Default)]
pub struct ReceiptBuilder {
    attributes: Vec<Vec<u8>>,
}

impl ReceiptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn text(mut self, field: i64, value: &str) -> Self {
        self.attributes.push(attribute(field, utf8(value)));
        self
    }

    fn date(mut self, field: i64, value: &str) -> Self {
        self.attributes.push(attribute(field, ia5(value)));
        self
    }

    fn bytes(mut self, field: i64, value: &[u8]) -> Self {
        self.attributes.push(attribute(field, value.to_vec()));
        self
    }

    pub fn bundle_identifier(self, value: &str) -> Self {
        self.text(fields::BUNDLE_IDENTIFIER, value)
    }

    pub fn app_version(self, value: &str) -> Self {
        self.text(fields::APP_VERSION, value)
    }

    pub fn original_app_version(self, value: &str) -> Self {
        self.text(fields::ORIGINAL_APP_VERSION, value)
    }

    pub fn creation_date(self, value: &str) -> Self {
        self.date(fields::CREATION_DATE, value)
    }

    pub fn expiration_date(self, value: &str) -> Self {
        self.date(fields::EXPIRATION_DATE, value)
    }

    pub fn original_purchase_date(self, value: &str) -> Self {
        self.date(fields::ORIGINAL_PURCHASE_DATE, value)
    }

    pub fn opaque_value(self, value: &[u8]) -> Self {
        self.bytes(fields::OPAQUE_VALUE, value)
    }

    pub fn hash(self, value: &[u8]) -> Self {
        self.bytes(fields::HASH, value)
    }

    pub fn age_rating(self, value: &str) -> Self {
        self.text(fields::AGE_RATING, value)
    }

    /// Attribute the decoder does not interpret.
    pub fn raw_text_attribute(self, field: i64, value: &str) -> Self {
        self.text(field, value)
    }

    pub fn purchase(mut self, purchase: PurchaseBuilder) -> Self {
        self.attributes
            .push(attribute(fields::IN_APP_PURCHASE, purchase.encode()));
        self
    }

    /// The attribute set alone.
    pub fn payload(&self) -> Vec<u8> {
        set(&self.attributes)
    }

    /// DER container.
    pub fn build(&self) -> Vec<u8> {
        signed_data(&self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::OctetString;
    use der::Decode;

    #[test]
    fn test_integer_encoding_is_minimal() {
        assert_eq!(integer(0), vec![0x02, 0x01, 0x00]);
        assert_eq!(integer(127), vec![0x02, 0x01, 0x7f]);
        assert_eq!(integer(128), vec![0x02, 0x02, 0x00, 0x80]);
        assert_eq!(integer(-1), vec![0x02, 0x01, 0xff]);
        assert_eq!(integer(1701), vec![0x02, 0x02, 0x06, 0xa5]);
    }

    #[test]
    fn test_long_length_encoding() {
        let encoded = octets(&[0u8; 300]);
        assert_eq!(&encoded[..4], &[0x04, 0x82, 0x01, 0x2c]);
        let decoded = OctetString::from_der(&encoded).unwrap();
        assert_eq!(decoded.as_bytes().len(), 300);
    }
}

//! App Store receipt decoding for the receipt viewer.
//!
//! Receipts are PKCS#7 signed-data containers whose payload is a set of
//! `(type, version, value)` attributes. The container and the attribute
//! set are decoded with the `cms` and `der` crates; this crate maps the
//! attributes it knows about onto a [`ReceiptRecord`]. Signatures are not
//! checked.
//!
//! The rest of the workspace talks to decoding through the
//! [`ReceiptDecoder`] trait, so any decoder (or a closure in tests) can be
//! plugged in.
//!
//! # Example
//!
//! ```no_run
//! use rv_receipt::{decode_file, ContainerDecoder};
//! use std::path::Path;
//!
//! let receipt = decode_file(
//!     &ContainerDecoder::new(),
//!     Path::new("Example.app/Contents/_MASReceipt/receipt"),
//! )
//! .unwrap();
//! println!("{} purchases", receipt.purchases.len());
//! ```

pub mod decoder;
pub mod error;
pub mod fields;
pub mod model;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use decoder::{decode_file, ContainerDecoder, ReceiptDecoder};
pub use error::{ReceiptError, Result};
pub use model::{ProductType, PurchaseRecord, ReceiptRecord};

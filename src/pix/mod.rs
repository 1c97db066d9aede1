//! Pix "Copia e Cola" payload encoding.
//!
//! Everything in here is pure and synchronous: text in, text out.

pub mod crc;
pub mod key;
pub mod payload;
pub mod text;
pub mod tlv;

use thiserror::Error;

pub use crc::crc16;
pub use key::{KeyType, normalize_key};
pub use payload::{PixPayload, TransactionRequest, generate_payload};
pub use tlv::decode_fields;

/// Domain identifier of the Pix arrangement inside the merchant account block
pub const PIX_GUI: &str = "br.gov.bcb.pix";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixError {
    #[error("value for tag {tag} is {len} characters long (max 99)")]
    ValueTooLong { tag: String, len: usize },

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error("malformed payload: {0}")]
    Malformed(String),
}

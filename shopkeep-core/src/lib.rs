//! Core domain rules for shopkeep.
//!
//! Pure, filesystem- and network-free logic: SKU parsing, image filename
//! classification, price-string conversion, and expiry-stamp handling on
//! catalog item names. Everything here is deterministic and exhaustively
//! unit tested; the operational crates build on top of it.

pub mod expiry;
pub mod price;
pub mod sku;

pub use expiry::{EXPIRY_STAMP_LEN, append_expiry, strip_expiry};
pub use price::{PriceError, parse_price_cents};
pub use sku::{ALLOWED_EXTENSIONS, ImageClass, MAX_IMAGE_BYTES, Sku, classify, is_ignored};

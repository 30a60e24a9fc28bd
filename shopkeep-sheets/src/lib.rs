//! Purchase-order template retrieval and parsing.
//!
//! Purchase orders are maintained as spreadsheets in a shared drive
//! folder; each run fetches the sheet whose title carries the purchase
//! order id, downloads its CSV export, and parses the SKU / Expiry Date /
//! Price columns into rows the cleansing pass consumes.

pub mod drive;
pub mod error;
pub mod template;

pub use drive::{DriveClient, DriveFile};
pub use error::SheetsError;
pub use template::{PurchaseOrderRow, parse_rows};

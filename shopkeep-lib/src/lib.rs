//! Operations shared by the shopkeep frontends.
//!
//! Each module is one pass of the catalog-upkeep workflow: route image
//! files by classification, correlate SKUs against the remote catalog,
//! upload images, rewrite catalog items from purchase-order rows, pair
//! off sold-out batches, and report re-uploaded files. The CLI sequences
//! these passes and owns every confirmation prompt; nothing in here asks
//! a question or prints outside the `log` facade.

pub mod cleanse;
pub mod correlate;
pub mod dedupe;
pub mod layout;
pub mod router;
pub mod settings;
pub mod stockout;
pub mod upload;

pub use cleanse::{
    CleanseAction, CleanseCandidate, CleanseError, CleanseProgress, CleanseSweep, ExpiryAttribute,
    cleanse_item, sweep_rows,
};
pub use correlate::{CatalogMatch, CorrelateProgress, CorrelationReport, SearchFailure, correlate};
pub use dedupe::{DedupeReport, find_reuploads};
pub use layout::ImageLayout;
pub use router::{
    MoveFailure, MoveFailureKind, MoveSummary, RoutePlan, ValidImage, execute_moves, plan_routes,
};
pub use settings::{
    SettingSource, Settings, SettingsError, SettingsSources, config_path, settings_sources,
};
pub use stockout::{
    BatchPair, RenewSummary, StockoutProgress, delete_depleted, find_batch_pairs,
    find_stock_out_names, renew_successor_names,
};
pub use upload::{UploadProgress, UploadSummary, upload_images};

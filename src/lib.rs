pub mod classify;
pub mod cleaner;
pub mod config;
pub mod entity;
pub mod environment;
pub mod formats;
pub mod logging;
pub mod pipeline;
pub mod workbook;

pub use classify::Classifier;
pub use cleaner::ValueCleaner;
pub use config::NormalizerConfig;
pub use entity::{CanonicalEntity, GroupType, RiskLevel};
pub use formats::FormatGroup;
pub use pipeline::{Pipeline, PreviewReport};
pub use workbook::Workbook;

pub const TARGET_PIPELINE: &str = "pipeline";
pub const TARGET_EXTRACT: &str = "extract";
pub const TARGET_ENTITY: &str = "entity";
pub const TARGET_CLASSIFY: &str = "classify";
pub const TARGET_WORKBOOK: &str = "workbook";

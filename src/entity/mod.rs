pub mod builder;
pub mod types;

pub use builder::{slugify, BuildOutcome, EntityBuilder, SkipReason};
pub use types::*;

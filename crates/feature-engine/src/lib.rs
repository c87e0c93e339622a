//! Feature Engineering Engine
//!
//! Assembles complete, model-ordered feature records from partial house
//! attributes and appends the engineered features the price model expects.

mod assembler;
mod catalog;
mod categories;
mod derived;
mod error;
mod record;
mod schema;

pub use assembler::{split_floor_areas, FeatureAssembler, MIN_FIRST_FLOOR_AREA};
pub use catalog::SchemaCatalog;
pub use categories::{CodeMapping, HOUSE_STYLES, NEIGHBORHOODS};
pub use derived::{derive, DerivedFeatures, OLD_HOUSE_AGE};
pub use error::FeatureError;
pub use record::{BaseRecord, FinalFeatureRecord};
pub use schema::{
    slots, AttributeKind, AttributeSlot, AttributeValue, StaticValue, REFERENCE_SCHEMA,
    SCHEMA_LEN, USER_SUPPLIED_SLOTS,
};

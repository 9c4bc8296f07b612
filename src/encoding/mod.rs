//! Feature encoders matching the model's training-time preprocessing

pub mod area_type;
pub mod features;
pub mod location;

pub use area_type::AreaType;
pub use features::{FeatureAssembler, FEATURE_COUNT};
pub use location::LocationEncoder;

pub mod converter;
pub mod features;
pub mod units;

pub use converter::{ConvertedPortion, convert_to_grams};
pub use features::PortionFeatures;
pub use units::{PortionUnit, parse_portion};

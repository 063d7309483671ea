// Consolidated risk scoring for leveraged BTC positions
// Category calculators, classification and consolidation

pub mod calculators;
pub mod classifier;
pub mod consolidator;
pub mod errors;
pub mod metrics;
pub mod sources;
pub mod traits;

// Re-export main types
pub use calculators::*;
pub use classifier::*;
pub use consolidator::*;
pub use errors::*;
pub use metrics::*;
pub use sources::*;
pub use traits::*;

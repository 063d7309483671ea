// Category risk calculators
pub mod financial;
pub mod macro_platform;
pub mod structural;
pub mod technical;

// Re-export all calculators
pub use financial::{FinancialInputs, FinancialRiskCalculator};
pub use macro_platform::{MacroPlatformInputs, MacroPlatformRiskCalculator};
pub use structural::{StructuralInputs, StructuralRiskCalculator};
pub use technical::{EmaAlignmentPenalties, TechnicalInputs, TechnicalRiskCalculator};

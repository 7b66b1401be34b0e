pub mod card;
pub mod price;

pub use card::*;
pub use price::*;

/// Shown in place of a price when a grade has no listing.
pub const NOT_AVAILABLE: &str = "N/A";

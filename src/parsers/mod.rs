pub mod price_table;
pub mod text;

pub use price_table::*;
pub use text::*;

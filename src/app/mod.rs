pub mod marketplace;
pub mod render;

pub use marketplace::Marketplace;

pub mod fulfillment;
pub mod pricing;
pub mod product;

pub use fulfillment::{default_fulfillment_options, select_option};
pub use pricing::{CartBreakdown, CartCalculator, PricingConfig};
pub use product::{CatalogEntry, PriceOracle, StaticCatalog};

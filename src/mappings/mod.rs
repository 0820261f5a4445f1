//! Fixed lookup tables: period codes and the product line-up

mod periods;
mod products;
pub mod loader;

pub use periods::PeriodLabels;
pub use products::{ProductGroup, ProductSources, NON_PROFIT_PRODUCT};

/// Container for all lookup tables. Immutable once built; passed by reference.
#[derive(Debug, Clone)]
pub struct Mappings {
    pub periods: PeriodLabels,
    pub products: ProductSources,
    /// Product whose sources carry escalation-percentage statistics
    pub escalation_product: String,
}

impl Mappings {
    /// Sources belonging to the escalation (NPA) family
    pub fn escalation_sources(&self) -> &[String] {
        self.products
            .sources_for(&self.escalation_product)
            .unwrap_or(&[])
    }
}

impl Default for Mappings {
    fn default() -> Self {
        Self {
            periods: PeriodLabels::default(),
            products: ProductSources::default(),
            escalation_product: NON_PROFIT_PRODUCT.to_string(),
        }
    }
}

//! Product to source-code grouping
//!
//! The declared order of products, and of sources within each product,
//! defines the canonical row order of every comparison table.

use std::collections::HashMap;

use crate::error::{MpfError, Result};

/// Product holding the non-profit annuity (NPA) sources
pub const NON_PROFIT_PRODUCT: &str = "Non-Profit";

/// A product and the source codes that make it up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGroup {
    pub product: String,
    pub sources: Vec<String>,
}

/// Ordered product→sources grouping
#[derive(Debug, Clone)]
pub struct ProductSources {
    groups: Vec<ProductGroup>,
    /// Position of each source in the flattened canonical order
    rank: HashMap<String, usize>,
}

impl ProductSources {
    /// Build from groups in declared order. A source may belong to one product only.
    pub fn new(groups: Vec<ProductGroup>) -> Result<Self> {
        let mut rank = HashMap::new();

        for (i, group) in groups.iter().enumerate() {
            if groups[..i].iter().any(|g| g.product == group.product) {
                return Err(MpfError::Mapping(format!("product {} listed twice", group.product)));
            }
            for source in &group.sources {
                let next = rank.len();
                if rank.insert(source.clone(), next).is_some() {
                    return Err(MpfError::Mapping(format!(
                        "source {} assigned to more than one product",
                        source
                    )));
                }
            }
        }

        Ok(Self { groups, rank })
    }

    /// The annuity product line-up with single, joint and triple life variants
    pub fn annuity_lineup() -> Self {
        let lineup: [(&str, &[&str]); 7] = [
            ("Index-Linked", &["C_IL_S", "C_IL_J", "C_IL_T"]),
            (
                NON_PROFIT_PRODUCT,
                &["C_NI_S", "C_NI_J", "C_NI_T", "C_NP_S", "C_NP_J", "C_NP_T"],
            ),
            ("Max Income", &["C_MX_S", "C_MX_J", "C_MX_T"]),
            ("OptiPlus", &["C_OP_S", "C_OP_J", "C_OP_T"]),
            ("Plat2003", &["C_P3_S", "C_P3_J", "C_P3_T"]),
            ("Plat1999", &["C_PL_S", "C_PL_J", "C_PL_T"]),
            ("PlatMM", &["C_PM_S", "C_PM_J", "C_PM_T"]),
        ];

        let groups = lineup
            .iter()
            .map(|(product, sources)| ProductGroup {
                product: product.to_string(),
                sources: sources.iter().map(|s| s.to_string()).collect(),
            })
            .collect::<Vec<_>>();

        let rank = groups
            .iter()
            .flat_map(|g| g.sources.iter())
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();

        Self { groups, rank }
    }

    pub fn groups(&self) -> &[ProductGroup] {
        &self.groups
    }

    /// Product names in declared order
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.product.as_str())
    }

    pub fn sources_for(&self, product: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.product == product)
            .map(|g| g.sources.as_slice())
    }

    /// Every source, flattened in canonical order
    pub fn canonical_order(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.sources.iter().map(String::as_str))
    }

    /// Position of a source in the canonical order, `None` if no product lists it
    pub fn rank(&self, source: &str) -> Option<usize> {
        self.rank.get(source).copied()
    }

    /// Expand product names to their sources, in canonical order
    pub fn expand<'a, I>(&self, products: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sources = Vec::new();

        for product in products {
            let group = self
                .sources_for(product)
                .ok_or_else(|| MpfError::UnknownProduct(product.to_string()))?;
            for source in group {
                if !sources.contains(source) {
                    sources.push(source.clone());
                }
            }
        }

        sources.sort_by_key(|s| self.rank(s));
        Ok(sources)
    }
}

impl Default for ProductSources {
    fn default() -> Self {
        Self::annuity_lineup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(product: &str, sources: &[&str]) -> ProductGroup {
        ProductGroup {
            product: product.to_string(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_canonical_order_follows_declaration() {
        let products = ProductSources::default();
        let order: Vec<&str> = products.canonical_order().collect();

        assert_eq!(order.len(), 24);
        assert_eq!(order[0], "C_IL_S");
        assert_eq!(order[3], "C_NI_S");
        assert_eq!(order[23], "C_PM_T");
        assert_eq!(products.rank("C_NP_T"), Some(8));
        assert_eq!(products.rank("C_XX_S"), None);
    }

    #[test]
    fn test_expand_selection() {
        let products = ProductSources::default();

        // Selection order does not matter, output is canonical
        let sources = products.expand(["PlatMM", "Index-Linked"]).unwrap();
        assert_eq!(sources, vec!["C_IL_S", "C_IL_J", "C_IL_T", "C_PM_S", "C_PM_J", "C_PM_T"]);

        assert!(products.expand(std::iter::empty::<&str>()).unwrap().is_empty());
        assert!(matches!(
            products.expand(["Unit-Linked"]),
            Err(MpfError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_new_rejects_shared_sources() {
        let result = ProductSources::new(vec![group("A", &["S1", "S2"]), group("B", &["S2"])]);
        assert!(result.is_err());

        let products = ProductSources::new(vec![group("B", &["S9"]), group("A", &["S1"])]).unwrap();
        assert_eq!(products.rank("S9"), Some(0));
        assert_eq!(products.rank("S1"), Some(1));
    }
}

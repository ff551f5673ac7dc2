use std::collections::HashMap;
use std::fs;
use std::path::Path;

use strsim::jaro_winkler;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Product, ProductRecord};
use crate::planner::constants::FUZZY_MATCH_THRESHOLD;
use crate::planner::nutrients::{item_key, item_label};

/// Data files in catalog order.
pub const CATALOG_FILES: [&str; 4] = ["drink-mixes.json", "drinks.json", "gels.json", "caps.json"];

/// The fixed, ordered set of products available for selection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    /// Item key to position in `products`.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from products in order.
    ///
    /// A product whose key is already present replaces the earlier one in
    /// place (last occurrence wins, first position is kept).
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Build a catalog from the four raw collections.
    pub fn from_collections(
        drink_mixes: Vec<ProductRecord>,
        drinks: Vec<ProductRecord>,
        gels: Vec<ProductRecord>,
        capsules: Vec<ProductRecord>,
    ) -> Self {
        let products = [drink_mixes, drinks, gels, capsules]
            .into_iter()
            .flatten()
            .map(Product::from)
            .collect();
        Self::new(products)
    }

    /// Load all collections from a data directory.
    ///
    /// Missing files count as empty collections.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut products = Vec::new();

        for file in CATALOG_FILES {
            let path = dir.join(file);
            if !path.exists() {
                warn!("catalog file not found: {}", path.display());
                continue;
            }
            let records = load_records(&path)?;
            debug!("loaded {} records from {}", records.len(), path.display());
            products.extend(records.into_iter().map(Product::from));
        }

        let catalog = Self::new(products);
        info!("catalog ready with {} products", catalog.len());
        Ok(catalog)
    }

    fn insert(&mut self, product: Product) {
        if !product.is_valid() {
            warn!("catalog record failed validation: {}", product.debug_string());
        }

        let key = item_key(&product);
        match self.index.get(&key) {
            Some(&pos) => {
                warn!("duplicate catalog key '{}', keeping the later record", key);
                self.products[pos] = product;
            }
            None => {
                self.index.insert(key, self.products.len());
                self.products.push(product);
            }
        }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by item key.
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.index.get(key).map(|&pos| &self.products[pos])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Find products matching a free-text query.
    ///
    /// Exact label or key matches come first; then case-insensitive substring
    /// matches in catalog order; if nothing matches, fuzzy matches ranked by
    /// similarity.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }

        let exact: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| item_label(p).to_lowercase() == query || item_key(p) == query)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let contains: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| item_label(p).to_lowercase().contains(&query))
            .collect();
        if !contains.is_empty() {
            return contains;
        }

        let mut fuzzy: Vec<(&Product, f64)> = self
            .products
            .iter()
            .map(|p| (p, jaro_winkler(&item_label(p).to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        fuzzy.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        fuzzy.into_iter().map(|(p, _)| p).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Load one JSON array of product records.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<ProductRecord>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<ProductRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

//! Initial catalog loaded from YAML.
//!
//! A seed is used only when no catalog record has been persisted yet. The
//! bundled seed ships in `data/catalog.yaml`; `FITKART_CATALOG_FILE` points
//! at a replacement.
//!
//! ```yaml
//! products:
//!   - id: p1
//!     name: Biozyme Performance Whey
//!     category: Protein
//!     price: 2499
//!     originalPrice: 3299
//!     ...
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fitkart_core::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_SEED: &str = include_str!("../../data/catalog.yaml");

/// Errors that can occur while loading a catalog seed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed is not valid YAML for a catalog.
    #[error("failed to parse seed: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The seed parsed but breaks catalog rules.
    #[error("{} validation errors: {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),
}

/// Top-level seed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub products: Vec<Product>,
}

/// Check a seed against catalog rules, collecting every problem.
///
/// Rules: ids are unique, names are non-empty, price is not negative, and
/// the original price is not below the selling price.
#[must_use]
pub fn validate_seed(products: &[Product]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for product in products {
        let id = product.id.as_str();
        if !seen.insert(id) {
            errors.push(format!("duplicate product id '{id}'"));
        }
        if product.name.trim().is_empty() {
            errors.push(format!("product '{id}' has an empty name"));
        }
        if product.price < Decimal::ZERO {
            errors.push(format!("product '{id}' has a negative price"));
        }
        if product.original_price < product.price {
            errors.push(format!(
                "product '{id}' original price {} is below price {}",
                product.original_price, product.price
            ));
        }
    }

    errors
}

/// Parse and validate a seed document.
///
/// # Errors
///
/// Returns `SeedError::Parse` for malformed YAML and `SeedError::Invalid`
/// when any catalog rule fails.
pub fn parse_seed(yaml: &str) -> Result<Vec<Product>, SeedError> {
    let seed: CatalogSeed = serde_yaml::from_str(yaml)?;

    let errors = validate_seed(&seed.products);
    if !errors.is_empty() {
        for err in &errors {
            tracing::error!("  - {err}");
        }
        return Err(SeedError::Invalid(errors));
    }

    Ok(seed.products)
}

/// Load a seed from a YAML file.
///
/// # Errors
///
/// Returns `SeedError::Io` if the file cannot be read, otherwise as
/// [`parse_seed`].
pub fn load_seed_file(path: &Path) -> Result<Vec<Product>, SeedError> {
    tracing::info!(path = %path.display(), "Loading catalog seed");
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_owned(),
        source,
    })?;
    let products = parse_seed(&content)?;
    tracing::info!(products = products.len(), "Catalog seed loaded");
    Ok(products)
}

/// The catalog bundled with the crate.
///
/// # Errors
///
/// Returns `SeedError` only if the bundled document is broken.
pub fn default_catalog() -> Result<Vec<Product>, SeedError> {
    parse_seed(BUNDLED_SEED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use fitkart_core::Category;

    use super::*;

    const MINIMAL: &str = r"
products:
  - id: p1
    name: Whey
    category: Protein
    price: 2499
    originalPrice: 3299
    image: whey.jpg
    description: Fast-absorbing whey
    rating: 4.6
    reviewsCount: 120
    brand: MuscleBlaze
    inStock: true
    nutritionFacts:
      Protein: 24g
";

    #[test]
    fn test_bundled_catalog_is_valid() {
        let products = default_catalog().unwrap();
        assert!(!products.is_empty());
        for category in Category::ALL {
            assert!(
                products.iter().any(|p| p.category == category),
                "bundled catalog has no {category} products"
            );
        }
        assert!(products.iter().any(Product::featured));
    }

    #[test]
    fn test_parse_minimal() {
        let products = parse_seed(MINIMAL).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().price, Decimal::from(2499));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let mut products = parse_seed(MINIMAL).unwrap();
        let mut dup = products.first().unwrap().clone();
        dup.name = "  ".to_owned();
        dup.original_price = Decimal::from(10);
        products.push(dup);

        let errors = validate_seed(&products);
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("duplicate")));
        assert!(errors.iter().any(|e| e.contains("empty name")));
        assert!(errors.iter().any(|e| e.contains("below price")));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let yaml = MINIMAL.replace("originalPrice: 3299", "originalPrice: 99");
        assert!(matches!(parse_seed(&yaml), Err(SeedError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let yaml = MINIMAL.replace("category: Protein", "category: Snacks");
        assert!(matches!(parse_seed(&yaml), Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_load_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let products = load_seed_file(file.path()).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_seed_file(Path::new("/nonexistent/catalog.yaml"));
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}

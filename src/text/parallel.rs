//! Batch extraction and rendering
//!
//! Each input is processed independently and results come back in input
//! order. With the `parallel` feature the batch is spread over the rayon
//! thread pool; without it the same functions run sequentially.
//!
//! ```toml
//! [dependencies]
//! tent-text = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use tent_text::text::{extract_batch, Extractor};
//!
//! let extractor = Extractor::new();
//! let results = extract_batch(&extractor, &["#one", "^two", "plain"]);
//!
//! assert_eq!(results.len(), 3);
//! assert_eq!(results[0][0].value, "one");
//! assert!(results[2].is_empty());
//! ```

use super::autolink::Autolink;
use super::entity::Entity;
use super::extractor::Extractor;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Extract all entities from every input
#[cfg(feature = "rayon")]
pub fn extract_batch(extractor: &Extractor, inputs: &[&str]) -> Vec<Vec<Entity>> {
    inputs
        .par_iter()
        .map(|input| extractor.extract_entities_with_indices(input))
        .collect()
}

/// Extract all entities from every input (sequential fallback)
#[cfg(not(feature = "rayon"))]
pub fn extract_batch(extractor: &Extractor, inputs: &[&str]) -> Vec<Vec<Entity>> {
    inputs
        .iter()
        .map(|input| extractor.extract_entities_with_indices(input))
        .collect()
}

/// Autolink every input
#[cfg(feature = "rayon")]
pub fn auto_link_batch(autolink: &Autolink, inputs: &[&str]) -> Vec<String> {
    inputs
        .par_iter()
        .map(|input| autolink.auto_link(input))
        .collect()
}

/// Autolink every input (sequential fallback)
#[cfg(not(feature = "rayon"))]
pub fn auto_link_batch(autolink: &Autolink, inputs: &[&str]) -> Vec<String> {
    inputs.iter().map(|input| autolink.auto_link(input)).collect()
}

/// Autolink owned inputs
///
/// Useful when the inputs are a `Vec<String>` rather than string slices.
#[cfg(feature = "rayon")]
pub fn auto_link_batch_owned(autolink: &Autolink, inputs: Vec<String>) -> Vec<String> {
    inputs
        .into_par_iter()
        .map(|input| autolink.auto_link(&input))
        .collect()
}

/// Autolink owned inputs (sequential fallback)
#[cfg(not(feature = "rayon"))]
pub fn auto_link_batch_owned(autolink: &Autolink, inputs: Vec<String>) -> Vec<String> {
    inputs
        .into_iter()
        .map(|input| autolink.auto_link(&input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_batch_keeps_order() {
        let extractor = Extractor::new();
        let inputs = ["#a", "no entities", "^b http://t.co/x"];
        let results = extract_batch(&extractor, &inputs);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 1);
        assert!(results[1].is_empty());
        assert_eq!(results[2].len(), 2);
    }

    #[test]
    fn test_auto_link_batch_matches_single() {
        let autolink = Autolink::new();
        let inputs = ["#a", "<b> ^c", ""];
        let batch = auto_link_batch(&autolink, &inputs);
        let owned =
            auto_link_batch_owned(&autolink, inputs.iter().map(|s| s.to_string()).collect());

        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(batch[i], autolink.auto_link(input));
            assert_eq!(owned[i], batch[i]);
        }
    }
}

//! Term-frequency cosine scoring over a fixed ingredient vocabulary.
//!
//! The vocabulary is built once from the full catalog at startup and never
//! updated; query terms outside it contribute zero weight.

use std::collections::HashMap;

use crate::catalog::Recipe;

type Float = f32;

/// Immutable term-to-index lookup built from every ingredient term in the
/// catalog, in sorted order so the mapping is deterministic.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn build(catalog: &[Recipe]) -> Self {
        let mut terms: Vec<String> = catalog
            .iter()
            .flat_map(|recipe| recipe.ingredients.iter())
            .flat_map(|ingredient| ingredient.split_whitespace())
            .map(str::to_lowercase)
            .collect();
        terms.sort();
        terms.dedup();

        let index = terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term, i))
            .collect();
        Self { index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Scores each candidate against the query bag of terms, one cosine
    /// similarity per candidate in input order.
    pub fn score(&self, query_terms: &[String], candidates: &[&Recipe]) -> Vec<Float> {
        let query = self.vectorize(query_terms.iter().map(String::as_str));
        candidates
            .iter()
            .map(|recipe| {
                let bag = self.vectorize(recipe.ingredients.iter().map(String::as_str));
                cosine_similarity(&query, &bag)
            })
            .collect()
    }

    /// Term-frequency vector over the fixed vocabulary. Multi-word
    /// ingredients contribute one count per word; unknown terms are dropped.
    fn vectorize<'a>(&self, terms: impl Iterator<Item = &'a str>) -> Vec<Float> {
        let mut vector = vec![0.0; self.index.len()];
        for term in terms.flat_map(str::split_whitespace) {
            if let Some(&i) = self.index.get(&term.to_lowercase()) {
                vector[i] += 1.0;
            }
        }
        vector
    }
}

/// Cosine similarity of two equal-length vectors; zero vectors score 0.0
/// rather than NaN.
fn cosine_similarity(a: &[Float], b: &[Float]) -> Float {
    let dot: Float = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: Float = a.iter().map(|x| x * x).sum::<Float>().sqrt();
    let norm_b: Float = b.iter().map(|x| x * x).sum::<Float>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

//! Brute-force nearest-neighbour search over cached query embeddings

use crate::domain::embedding::cosine_similarity;

/// Best qualifying candidate of a similarity scan
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMatch {
    pub key: String,
    pub similarity: f32,
}

/// Finds the cached embedding closest to a query embedding.
///
/// The scan is linear in the number of stored vectors.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatcher {
    threshold: f32,
}

impl SimilarityMatcher {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Return the most similar candidate whose similarity is at least the
    /// threshold. Only positive similarities qualify, so vectors that cannot
    /// be compared (scored 0.0) never match. Ties keep the candidate seen first.
    pub fn find_similar<'a, I>(&self, query: &[f32], candidates: I) -> Option<SimilarMatch>
    where
        I: IntoIterator<Item = (&'a str, &'a [f32])>,
    {
        let mut best: Option<SimilarMatch> = None;
        let mut best_similarity = 0.0_f32;

        for (key, vector) in candidates {
            let similarity = cosine_similarity(query, vector);

            if similarity > best_similarity && similarity >= self.threshold {
                best_similarity = similarity;
                best = Some(SimilarMatch {
                    key: key.to_string(),
                    similarity,
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(
        matcher: &SimilarityMatcher,
        query: &[f32],
        items: &[(&'static str, Vec<f32>)],
    ) -> Option<SimilarMatch> {
        matcher.find_similar(query, items.iter().map(|(k, v)| (*k, v.as_slice())))
    }

    #[test]
    fn test_exact_threshold_matches() {
        let matcher = SimilarityMatcher::new(0.6);
        let items = vec![("a", vec![3.0, 4.0])];

        let found = scan(&matcher, &[1.0, 0.0], &items).unwrap();

        assert_eq!(found.key, "a");
        assert_eq!(found.similarity, 0.6);
    }

    #[test]
    fn test_below_threshold_does_not_match() {
        let matcher = SimilarityMatcher::new(0.6);
        let items = vec![("a", vec![3.0, 4.01])];

        assert!(scan(&matcher, &[1.0, 0.0], &items).is_none());
    }

    #[test]
    fn test_picks_most_similar() {
        let matcher = SimilarityMatcher::new(0.5);
        let items = vec![
            ("low", vec![0.6, 0.8]),
            ("high", vec![0.99, 0.1]),
            ("mid", vec![0.8, 0.6]),
        ];

        let found = scan(&matcher, &[1.0, 0.0], &items).unwrap();

        assert_eq!(found.key, "high");
    }

    #[test]
    fn test_ties_keep_first() {
        let matcher = SimilarityMatcher::new(0.5);
        let items = vec![("first", vec![1.0, 0.0]), ("second", vec![2.0, 0.0])];

        assert_eq!(scan(&matcher, &[1.0, 0.0], &items).unwrap().key, "first");
    }

    #[test]
    fn test_skips_unusable_vectors() {
        let matcher = SimilarityMatcher::new(0.5);
        let items = vec![
            ("empty", vec![]),
            ("short", vec![1.0]),
            ("corrupt", vec![f32::NAN, 0.0]),
            ("good", vec![1.0, 0.1]),
        ];

        assert_eq!(scan(&matcher, &[1.0, 0.0], &items).unwrap().key, "good");
    }

    #[test]
    fn test_zero_threshold_ignores_unusable_vectors() {
        let matcher = SimilarityMatcher::new(0.0);
        let items = vec![("empty", vec![]), ("orthogonal", vec![0.0, 1.0])];

        assert!(scan(&matcher, &[1.0, 0.0], &items).is_none());
    }

    #[test]
    fn test_empty_candidates() {
        let matcher = SimilarityMatcher::new(0.0);

        assert!(scan(&matcher, &[1.0], &[]).is_none());
    }
}

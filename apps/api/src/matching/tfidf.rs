//! TF-IDF similarity ranker.
//!
//! Builds a joint vector space over one query profile and a set of job texts,
//! weights terms with smoothed IDF, L2-normalises every vector and ranks the
//! jobs by cosine similarity to the query.
//!
//! Degenerate inputs never fail: no jobs yields an empty ranking, and an empty
//! vocabulary or an empty query profile scores every job 0.0.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// A job's similarity to the query profile, before presentation rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedJob<K> {
    pub key: K,
    pub similarity: f64,
}

/// Sparse, L2-normalised document vector: term index → weight.
type SparseVector = HashMap<usize, f64>;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    // Runs of two or more word characters; single letters are dropped.
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"))
}

/// Lower-cases `text` and splits it into terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted vector space over a fixed corpus.
struct VectorSpace {
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    fn fit(documents: &[&str]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_terms: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for token in tokenize(doc) {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(token).or_insert(next);
                *counts.entry(idx).or_insert(0) += 1;
            }
            doc_terms.push(counts);
        }

        let mut doc_frequency = vec![0usize; vocabulary.len()];
        for counts in &doc_terms {
            for &idx in counts.keys() {
                doc_frequency[idx] += 1;
            }
        }

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = doc_terms
            .into_iter()
            .map(|counts| {
                let mut vector: SparseVector = counts
                    .into_iter()
                    .map(|(idx, tf)| (idx, tf as f64 * idf[idx]))
                    .collect();
                normalize(&mut vector);
                vector
            })
            .collect();

        Self { vectors }
    }
}

fn normalize(vector: &mut SparseVector) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

/// Cosine similarity of two L2-normalised vectors; 0.0 when either is empty.
fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(idx, w)| large.get(idx).map(|other| w * other))
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Ranks `jobs` by descending cosine similarity to `query`. Ties keep input
/// order.
pub fn rank_by_similarity<K: Clone>(query: &str, jobs: &[(K, String)]) -> Vec<RankedJob<K>> {
    if jobs.is_empty() {
        return Vec::new();
    }

    // Row 0 is the query, rows 1.. are the jobs.
    let corpus: Vec<&str> = std::iter::once(query)
        .chain(jobs.iter().map(|(_, text)| text.as_str()))
        .collect();
    let mut vectors = VectorSpace::fit(&corpus).vectors.into_iter();
    let query_vector = vectors.next().unwrap_or_default();

    let mut ranked: Vec<RankedJob<K>> = jobs
        .iter()
        .zip(vectors)
        .map(|((key, _), vector)| RankedJob {
            key: key.clone(),
            similarity: cosine(&query_vector, &vector),
        })
        .collect();

    // `sort_by` is stable, so equal scores keep job-list order.
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Profile text for a seeker: skills joined by spaces.
pub fn profile_text(skills: &[String]) -> String {
    skills.join(" ")
}

/// Document text for a job posting: title followed by its skills.
pub fn job_text(title: &str, skills: &[String]) -> String {
    format!("{} {}", title, skills.join(" "))
}

//! Cosine similarity ranking.
//!
//! Ranking is a stable sort by descending score, so records with equal scores
//! keep their insertion order. Selection truncates to the limit first and only
//! then drops records at or below the threshold.

use mnemo_types::memory::MemoryRecord;

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for vectors of different length, zero-norm vectors, or a
/// non-finite result.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a * norm_b);
    if score.is_finite() { score } else { 0.0 }
}

/// A record paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: MemoryRecord,
    pub score: f32,
}

/// Score every record against the query and sort best-first.
pub fn rank(query: &[f32], records: Vec<MemoryRecord>) -> Vec<ScoredRecord> {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let score = cosine_similarity(query, &record.embedding);
            ScoredRecord { record, score }
        })
        .collect();

    // `sort_by` is stable: ties keep insertion order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Keep the top `limit` entries, then drop those scoring `<= threshold`.
pub fn select(ranked: Vec<ScoredRecord>, limit: usize, threshold: f32) -> Vec<ScoredRecord> {
    ranked
        .into_iter()
        .take(limit)
        .filter(|s| s.score > threshold)
        .collect()
}

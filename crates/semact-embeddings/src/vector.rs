//! Vector math shared by every ranking path.

/// Epsilon keeping cosine defined for degenerate (all-zero) vectors,
/// which hash embedders produce for texts with no usable tokens.
const EPSILON: f32 = 1e-9;

/// Compute cosine similarity between two equal-length vectors.
///
/// Symmetric, bounded in roughly [-1, 1]; identical nonzero vectors score
/// 1. A length mismatch is a caller contract violation and scores 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    dot / (norm_a * norm_b + EPSILON)
}

/// Compute dot product between two vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 normalize a vector (unit length). Zero vectors are left untouched.
pub fn normalize_l2(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

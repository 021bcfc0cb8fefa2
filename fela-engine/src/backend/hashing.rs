//! Offline embedding backend
//!
//! Signed hashing of character uni-, bi- and trigrams with boundary markers.
//! Lexically similar windows get similar vectors, which is enough to exercise
//! the full pipeline without a model server.

use fela_core::{CoreError, EmbeddingBackend, Result};
use ndarray::Array1;

/// Default vector dimension
pub const DEFAULT_DIMENSION: usize = 256;

const BOS: char = '\u{0002}';
const EOS: char = '\u{0003}';

/// Deterministic character n-gram hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

impl HashingEmbedder {
    /// Embedder producing `dimension`-sized vectors
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(CoreError::invalid_input("embedding dimension must be positive"));
        }
        Ok(Self { dimension })
    }

    /// Output dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text into an L2-normalized vector
    pub fn embed_one(&self, text: &str) -> Array1<f32> {
        let mut v = Array1::<f32>::zeros(self.dimension);

        let lowered = text.to_lowercase();
        let mut chars: Vec<char> = Vec::with_capacity(lowered.len() + 2);
        chars.push(BOS);
        chars.extend(lowered.chars());
        chars.push(EOS);

        for n in [3usize, 2, 1] {
            if chars.len() < n {
                continue;
            }
            for gram in chars.windows(n) {
                let h = fnv1a(gram);
                let idx = (h as usize) % self.dimension;
                // High bit for the sign so it is independent of the bucket
                let sign = if h >> 31 == 0 { 1.0 } else { -1.0 };
                v[idx] += sign;
            }
        }

        let norm = v.dot(&v).sqrt();
        if norm > 0.0 {
            v /= norm;
        }
        v
    }
}

impl EmbeddingBackend for HashingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t).to_vec()).collect())
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// 32-bit FNV-1a over code points
fn fnv1a(chars: &[char]) -> u32 {
    let mut h: u32 = 0x811c_9dc5;
    for &c in chars {
        h ^= c as u32;
        h = h.wrapping_mul(0x0100_0193);
    }
    h
}

// Binary layout of the similarity store artifact.
//
// ┌──────────────────────────────────────┐
// │ Magic (4B): "CSIM"                   │
// │ Version (4B, u32 LE)                 │
// │ Item count n (8B, u64 LE)            │
// │ n*n values (8B each, f64 LE)         │
// │   row-major                          │
// └──────────────────────────────────────┘
//
// Values are stored as raw IEEE-754 bits, so a load returns exactly what
// was saved. There is no migration path: a version bump invalidates every
// older artifact and callers rebuild.

use crate::similarity::SimilarityMatrix;

pub const MAGIC: &[u8; 4] = b"CSIM";
pub const FORMAT_VERSION: u32 = 1;
pub const HEADER_LEN: usize = 16;

/// Serialize a matrix into the artifact layout.
pub fn encode(matrix: &SimilarityMatrix) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + matrix.values().len() * 8);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&(matrix.len() as u64).to_le_bytes());
    for value in matrix.values() {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Parse an artifact. `expected_items`, when given, must equal the stored
/// shape. The error string says what was wrong.
pub fn decode(bytes: &[u8], expected_items: Option<usize>) -> Result<SimilarityMatrix, String> {
    if bytes.len() < HEADER_LEN {
        return Err(format!("truncated header ({} bytes)", bytes.len()));
    }
    if &bytes[0..4] != MAGIC {
        return Err("bad magic bytes".to_string());
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != FORMAT_VERSION {
        return Err(format!(
            "unsupported format version {version} (expected {FORMAT_VERSION})"
        ));
    }

    let mut count = [0u8; 8];
    count.copy_from_slice(&bytes[8..16]);
    let n = usize::try_from(u64::from_le_bytes(count))
        .map_err(|_| "item count does not fit in memory".to_string())?;

    if let Some(expected) = expected_items {
        if n != expected {
            return Err(format!("stored for {n} items, table has {expected}"));
        }
    }

    let body = &bytes[HEADER_LEN..];
    let expected_len = n
        .checked_mul(n)
        .and_then(|cells| cells.checked_mul(8))
        .ok_or_else(|| format!("item count {n} overflows"))?;
    if body.len() != expected_len {
        return Err(format!(
            "body is {} bytes, expected {expected_len} for {n}x{n}",
            body.len()
        ));
    }

    let mut values = Vec::with_capacity(n * n);
    for chunk in body.chunks_exact(8) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        let value = f64::from_le_bytes(raw);
        if !value.is_finite() {
            return Err(format!("non-finite value at cell {}", values.len()));
        }
        values.push(value);
    }

    SimilarityMatrix::from_row_major(n, values).ok_or_else(|| "shape mismatch".to_string())
}

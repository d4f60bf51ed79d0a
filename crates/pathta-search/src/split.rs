//! Near-equal contiguous partitioning.

/// Split `items` into `parts` contiguous chunks whose sizes differ by at most one,
/// the larger chunks first.
///
/// `parts == 0` yields no chunks. When `parts` exceeds `items.len()` the trailing
/// chunks are empty.
#[must_use]
pub fn split_even<T>(items: Vec<T>, parts: usize) -> Vec<Vec<T>> {
    if parts == 0 {
        return Vec::new();
    }
    let base = items.len() / parts;
    let extra = items.len() % parts;

    let mut chunks = Vec::with_capacity(parts);
    let mut rest = items.into_iter();
    for index in 0..parts {
        let size = base + usize::from(index < extra);
        chunks.push(rest.by_ref().take(size).collect());
    }
    chunks
}

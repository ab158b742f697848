//! Weight-prefix binary split.
//!
//! Each step cuts the current rectangle across its longer side, giving the
//! shortest input prefix holding at least half the weight to the first
//! slice and the rest to the second. This keeps cells reasonably square and
//! keeps input order intact. It is NOT the Bruls/Huizing/van Wijk squarified
//! algorithm: rows are never re-evaluated for worst aspect ratio.

use super::geometry::Rect;

/// Partition `bounds` into one cell per weight.
///
/// `weights` must all be finite and > 0 (callers resolve them first). The
/// returned cells are in input order: `cells[i]` belongs to `weights[i]`.
/// Cell areas are exactly `weights[i] / total * bounds.area()` up to
/// floating-point rounding, and cells tile `bounds` without overlap.
pub(crate) fn partition(weights: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut cells = Vec::with_capacity(weights.len());
    if weights.is_empty() || bounds.is_empty() {
        return cells;
    }

    // Finite weights can still sum past f64::MAX. Dividing by the largest
    // keeps every ratio and bounds the sum by the item count.
    let scaled;
    let weights = if weights.iter().sum::<f64>().is_finite() {
        weights
    } else {
        let max = weights.iter().copied().fold(0.0, f64::max);
        tracing::debug!("Weight sum overflows, rescaling {} weights by {:e}", weights.len(), max);
        scaled = weights.iter().map(|w| w / max).collect::<Vec<f64>>();
        &scaled[..]
    };

    // Explicit stack instead of recursion: heavy skew makes the split depth O(n).
    // The first half is pushed last so leaves come out in input order.
    let mut stack = vec![(0usize, weights.len(), bounds)];
    while let Some((start, end, rect)) = stack.pop() {
        let range = &weights[start..end];
        if range.len() == 1 {
            cells.push(rect);
            continue;
        }

        // Summed per range rather than from global prefix sums, so tiny
        // trailing weights keep their precision deep in the split.
        let total: f64 = range.iter().sum();
        let (k, first_weight) = split_point(range, total);
        let ratio = first_weight / total;

        let (first, second) = if rect.width >= rect.height {
            rect.split_horizontal(ratio)
        } else {
            rect.split_vertical(ratio)
        };

        tracing::trace!(
            "split [{}..{}) at {} (ratio={:.4}) in {:.1}x{:.1}",
            start,
            end,
            start + k,
            ratio,
            rect.width,
            rect.height
        );

        stack.push((start + k, end, second));
        stack.push((start, start + k, first));
    }

    cells
}

/// Number of leading items in the first half, and their summed weight.
///
/// Returns the smallest `k` whose prefix reaches half of `total`, clamped to
/// `1..len` so neither half is empty. `weights` holds at least two items.
fn split_point(weights: &[f64], total: f64) -> (usize, f64) {
    let half = total / 2.0;
    let last = weights.len() - 1;
    let mut acc = 0.0;
    for (i, &w) in weights[..last].iter().enumerate() {
        acc += w;
        if acc >= half {
            return (i + 1, acc);
        }
    }
    (last, acc)
}

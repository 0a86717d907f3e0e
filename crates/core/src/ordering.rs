//! Float-based manual ordering for sections and work items.
//!
//! New rows are appended after the current maximum sibling order. Rows can be
//! moved by assigning any real value between two neighbours; once the gap
//! between neighbours is too small to split, the siblings are renumbered.

/// Step added to the current maximum when appending.
pub const ORDER_STEP: f64 = 0.1;

/// Smallest gap [`order_between`] will still split.
pub const MIN_ORDER_GAP: f64 = 1e-9;

/// Order for a row appended after siblings whose maximum order is `current_max`.
pub fn next_order(current_max: Option<f64>) -> f64 {
    current_max.unwrap_or(0.0) + ORDER_STEP
}

/// Order for a row placed between `before` and `after`.
///
/// `None` on either side means "open end". Returns `None` when the two
/// neighbours are too close together (or out of order) and the siblings
/// need [`renumbered`] first.
pub fn order_between(before: Option<f64>, after: Option<f64>) -> Option<f64> {
    match (before, after) {
        (None, None) => Some(ORDER_STEP),
        (Some(b), None) => Some(b + ORDER_STEP),
        (None, Some(a)) => {
            if a > MIN_ORDER_GAP {
                Some(a / 2.0)
            } else {
                None
            }
        }
        (Some(b), Some(a)) => {
            if a - b > MIN_ORDER_GAP {
                let mid = b + (a - b) / 2.0;
                (mid > b && mid < a).then_some(mid)
            } else {
                None
            }
        }
    }
}

/// Evenly spaced orders for `count` siblings: 0.1, 0.2, ...
///
/// Each value is accumulated with [`next_order`] so renumbered rows carry the
/// same values an append-only sequence would have produced.
pub fn renumbered(count: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(count);
    let mut current = None;
    for _ in 0..count {
        let order = next_order(current);
        out.push(order);
        current = Some(order);
    }
    out
}

/// Orders of the neighbours a row would sit between after moving it directly
/// behind `after_id` (or to the front when `after_id` is `None`).
///
/// `siblings` are `(id, order)` pairs sorted by order and may include the
/// moving row itself, which is skipped. Returns `None` if `after_id` is not
/// among the siblings or is the moving row.
pub fn neighbours(
    siblings: &[(i64, f64)],
    moving: i64,
    after_id: Option<i64>,
) -> Option<(Option<f64>, Option<f64>)> {
    let others: Vec<(i64, f64)> = siblings
        .iter()
        .copied()
        .filter(|(id, _)| *id != moving)
        .collect();
    match after_id {
        None => Some((None, others.first().map(|(_, o)| *o))),
        Some(target) => {
            let idx = others.iter().position(|(id, _)| *id == target)?;
            Some((Some(others[idx].1), others.get(idx + 1).map(|(_, o)| *o)))
        }
    }
}

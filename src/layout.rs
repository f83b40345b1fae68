//! Grid layout of quote cards.

use crate::types::*;
use std::sync::Arc;

/// Decorative tilt of the card at the given grid cell, in radians.
pub fn card_rotation(row: usize, col: usize) -> f64 {
    (col as f64 * 1.5).sin() * (row as f64 * 2.0).cos() * 0.05
}

/// Lays the records out on a grid, filling rows left to right.
///
/// The result depends only on the records and the viewport class, so two calls
/// with the same inputs produce identical cards.
pub fn layout(records: &[Arc<Record>], class: ViewportClass) -> Vec<Card> {
    let columns = class.columns();
    let spacing = class.spacing();
    let (width, height) = class.card_size();

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let row = index / columns;
            let col = index % columns;
            Card {
                grid_x: col as f64 * spacing,
                grid_y: row as f64 * spacing,
                rotation: card_rotation(row, col),
                width,
                height,
                record: Arc::clone(record),
            }
        })
        .collect()
}

/// Number of grid rows needed for `count` cards.
pub fn row_count(count: usize, class: ViewportClass) -> usize {
    count.div_ceil(class.columns())
}

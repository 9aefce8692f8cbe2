//! Column width solving for tables.

use crate::fonts::text_width;
use quire_idf::TableNode;
use quire_style::FontFace;

/// Space between a cell's border and its text, on each side.
pub const CELL_PADDING: f32 = 4.0;

/// Narrowest a column is squeezed to while the table still fits.
pub const MIN_COLUMN_WIDTH: f32 = 36.0;

/// Rows measured when estimating a column's preferred width.
const AUTO_LAYOUT_SAMPLE_LIMIT: usize = 100;

/// Decides how a table's columns share the available width.
pub trait GridLayout {
    /// Returns one width per column, summing to at most `available`.
    fn column_widths(&self, table: &TableNode, available: f32, face: FontFace, font_size: f32) -> Vec<f32>;
}

/// Distributes width in proportion to each column's widest unwrapped cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalGrid;

impl GridLayout for ProportionalGrid {
    fn column_widths(&self, table: &TableNode, available: f32, face: FontFace, font_size: f32) -> Vec<f32> {
        let columns = table.column_count();
        if columns == 0 {
            return Vec::new();
        }

        let mut preferred = vec![0.0f32; columns];
        let rows = std::iter::once(&table.header).chain(table.rows.iter().take(AUTO_LAYOUT_SAMPLE_LIMIT));
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                let width = text_width(cell.trim(), face, font_size) + 2.0 * CELL_PADDING;
                preferred[i] = preferred[i].max(width);
            }
        }
        distribute(&preferred, available)
    }
}

/// Scales `preferred` to exactly fill `available`, keeping every column at
/// least [`MIN_COLUMN_WIDTH`] when there is room for that.
fn distribute(preferred: &[f32], available: f32) -> Vec<f32> {
    let columns = preferred.len();
    let total: f32 = preferred.iter().sum();
    if total <= 0.0 {
        return vec![available / columns as f32; columns];
    }
    if total <= available {
        // Expand: distribute extra space proportionally
        return preferred.iter().map(|p| available * p / total).collect();
    }

    let floor = MIN_COLUMN_WIDTH.min(available / columns as f32);
    let mut widths = vec![0.0f32; columns];
    let mut pinned = vec![false; columns];
    loop {
        let pinned_width: f32 = pinned.iter().filter(|p| **p).count() as f32 * floor;
        let free_total: f32 = preferred
            .iter()
            .zip(&pinned)
            .filter(|(_, pinned)| !**pinned)
            .map(|(p, _)| *p)
            .sum();
        let factor = if free_total > 0.0 {
            (available - pinned_width) / free_total
        } else {
            0.0
        };

        let mut changed = false;
        for i in 0..columns {
            if pinned[i] {
                widths[i] = floor;
                continue;
            }
            widths[i] = preferred[i] * factor;
            if widths[i] < floor {
                pinned[i] = true;
                changed = true;
            }
        }
        if !changed {
            return widths;
        }
    }
}

//! Chart geometry: squarified treemap tiles and pie slices.
//!
//! Treemap tiles are laid out in rows along the shorter side of the remaining
//! space, adding items to a row while that keeps the worst aspect ratio from
//! getting worse (Bruls, Huizing and van Wijk). Tile area is proportional to
//! weight, and the tiles exactly cover the bounds when any weight is positive.

use crate::aggregation::IssueGroup;


/// Axis-aligned rectangle in arbitrary units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Area {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}


impl Area {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> f64 {
        self.width * self.height
    }

    /// Shrink by the given insets, never below zero size.
    pub fn inset(&self, insets: Insets) -> Area {
        Area {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.left - insets.right).max(0.0),
            height: (self.height - insets.top - insets.bottom).max(0.0),
        }
    }
}


/// Space reserved inside a parent tile before its children are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}


impl Insets {
    pub fn uniform(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}


/// An issue tile with the tiles of its sub-issues.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueTile {
    /// Index into the issue groups passed to [`layout_issue_tree`].
    pub issue: usize,
    pub area: Area,
    /// One area per sub-issue, in the group's order.
    pub children: Vec<Area>,
}


/// Lay out `weights` inside `bounds`. The result is in input order;
/// non-positive weights get an empty area at the origin of `bounds`.
pub fn squarify(weights: &[f64], bounds: Area) -> Vec<Area> {
    let mut out = vec![Area::new(bounds.x, bounds.y, 0.0, 0.0); weights.len()];

    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 || bounds.size() <= 0.0 {
        return out;
    }

    let scale = bounds.size() / total;
    let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0.0).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

    let mut remaining = bounds;
    let mut row: Vec<(usize, f64)> = Vec::new();
    let mut next = 0;

    while next < order.len() {
        let idx = order[next];
        let side = remaining.width.min(remaining.height);
        let candidate = (idx, weights[idx] * scale);

        let keep_growing = row.is_empty() || {
            let current = worst_ratio(&row, side);
            row.push(candidate);
            let grown = worst_ratio(&row, side);
            row.pop();
            grown <= current
        };

        if keep_growing {
            row.push(candidate);
            next += 1;
        } else {
            remaining = place_row(&row, remaining, &mut out);
            row.clear();
        }
    }

    if !row.is_empty() {
        place_row(&row, remaining, &mut out);
    }

    out
}


/// Two-level layout: issues inside `bounds`, sub-issues inside each issue
/// tile after removing `insets`.
pub fn layout_issue_tree(groups: &[IssueGroup], bounds: Area, insets: Insets) -> Vec<IssueTile> {
    let weights: Vec<f64> = groups.iter().map(|g| g.total as f64).collect();

    squarify(&weights, bounds)
        .into_iter()
        .enumerate()
        .filter(|(_, area)| area.size() > 0.0)
        .map(|(issue, area)| {
            let child_weights: Vec<f64> = groups[issue]
                .sub_issues
                .iter()
                .map(|s| s.count as f64)
                .collect();
            IssueTile {
                issue,
                area,
                children: squarify(&child_weights, area.inset(insets)),
            }
        })
        .collect()
}


/// Angular extent of each pie slice as `(start, end)` radians, clockwise
/// from the top. Zero counts get an empty slice.
pub fn pie_slices(counts: &[u64]) -> Vec<(f64, f64)> {
    let total: f64 = counts.iter().map(|&count| count as f64).sum();
    if total == 0.0 {
        return vec![(0.0, 0.0); counts.len()];
    }

    let mut start = 0.0;
    counts
        .iter()
        .map(|&count| {
            let sweep = count as f64 / total * std::f64::consts::TAU;
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}


/// Percentage of the full circle covered by a slice.
pub fn slice_share(start: f64, end: f64) -> f64 {
    (end - start) / std::f64::consts::TAU * 100.0
}


/// Point on a circle of `radius` around `(cx, cy)`, `angle` radians
/// clockwise from the top, in a y-up coordinate system.
pub fn polar_point(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy + radius * angle.cos())
}


/// Worst aspect ratio of a row laid along a side of length `side`.
fn worst_ratio(row: &[(usize, f64)], side: f64) -> f64 {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();
    let max = row.iter().map(|(_, a)| *a).fold(f64::MIN, f64::max);
    let min = row.iter().map(|(_, a)| *a).fold(f64::MAX, f64::min);

    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}


/// Place a finished row along the shorter side and return the leftover space.
fn place_row(row: &[(usize, f64)], remaining: Area, out: &mut [Area]) -> Area {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();

    if remaining.width >= remaining.height {
        let column_width = sum / remaining.height;
        let mut y = remaining.y;
        for &(idx, area) in row {
            let height = area / column_width;
            out[idx] = Area::new(remaining.x, y, column_width, height);
            y += height;
        }
        Area {
            x: remaining.x + column_width,
            width: (remaining.width - column_width).max(0.0),
            ..remaining
        }
    } else {
        let row_height = sum / remaining.width;
        let mut x = remaining.x;
        for &(idx, area) in row {
            let width = area / row_height;
            out[idx] = Area::new(x, remaining.y, width, row_height);
            x += width;
        }
        Area {
            y: remaining.y + row_height,
            height: (remaining.height - row_height).max(0.0),
            ..remaining
        }
    }
}

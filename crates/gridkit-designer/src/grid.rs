//! Grid generator
//!
//! Produces the stroke geometry of a square or hex lattice covering an
//! inner rectangle. Output is plain geometry in surface pixels; clipping to
//! the rectangle is left to the renderer, so strokes may extend past it.
//!
//! ## Square
//!
//! Vertical lines sit at `x = inner.x + k * cell` for every `k` with
//! `k * cell <= inner.width + 0.5`, horizontal lines likewise. The half pixel
//! of slack keeps the far boundary line when the width is a whole number of
//! cells.
//!
//! ## Hex
//!
//! A hexagon of radius `r` (center to vertex) has its vertices at
//! `60 * i - 30` degrees (pointy) or `60 * i` degrees (flat).
//!
//! ```text
//! pointy                     flat
//!   /\  /\  /\                __    __
//!  |  ||  ||  |   rows       /  \__/  \   columns
//!   \/ /\ /\ /\   1.5 r     \__/  \__/    1.5 r apart,
//!     |  ||  ||   apart,    /  \__/  \    odd columns shifted
//!      \/  \/  \/ odd rows  \__/  \__/    down by sqrt(3) r / 2
//!                 shifted right by sqrt(3) r / 2
//! ```
//!
//! Row (or column) parity is taken from the integer index counted from the
//! rectangle origin, so the lattice is anchored at the origin regardless of
//! where the rectangle sits on the page. Enumeration runs one full cell past
//! the far edges so the clipped result has no gaps.

use crate::page::InnerRect;
use gridkit_core::units::mm_to_px;
use gridkit_core::{Configuration, GridType, HexOrientation, Rgb};
use tracing::{debug, warn};

/// Slack added to the far edge when placing square grid lines (px)
pub const SQUARE_EDGE_EPSILON_PX: f64 = 0.5;

/// Cells smaller than this are refused instead of enumerated (px)
pub const MIN_CELL_PX: f64 = 0.5;

/// A point in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One stroked element of the grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridStroke {
    /// Straight line across the inner rectangle
    Line { from: Point, to: Point },
    /// Closed six-vertex outline
    Hexagon { center: Point, vertices: [Point; 6] },
}

/// Stroke appearance shared by every element of a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width_px: f64,
    pub color: Rgb,
    pub alpha: f64,
}

/// Generated grid: geometry plus style
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub grid_type: GridType,
    pub strokes: Vec<GridStroke>,
    pub style: StrokeStyle,
}

impl GridGeometry {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Vertical lines of a square grid
    pub fn vertical_lines(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.lines().filter(|(from, to)| from.x == to.x)
    }

    /// Horizontal lines of a square grid
    pub fn horizontal_lines(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.lines().filter(|(from, to)| from.y == to.y)
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.strokes.iter().filter_map(|stroke| match stroke {
            GridStroke::Line { from, to } => Some((from, to)),
            GridStroke::Hexagon { .. } => None,
        })
    }

    pub fn hexagons(&self) -> impl Iterator<Item = (&Point, &[Point; 6])> {
        self.strokes.iter().filter_map(|stroke| match stroke {
            GridStroke::Hexagon { center, vertices } => Some((center, vertices)),
            GridStroke::Line { .. } => None,
        })
    }
}

/// Generate the active grid of a configuration over `inner`.
///
/// Only the parameters of the active grid type are read.
pub fn generate(config: &Configuration, inner: &InnerRect) -> GridGeometry {
    let (strokes, style) = match config.grid.grid_type {
        GridType::Square => {
            let square = &config.square;
            let strokes = square_lines(inner, mm_to_px(square.size_mm));
            let style = StrokeStyle {
                width_px: mm_to_px(square.line_width_mm),
                color: config.grid_color(),
                alpha: square.alpha,
            };
            (strokes, style)
        }
        GridType::Hex => {
            let hex = &config.hex;
            let strokes = hex_cells(inner, mm_to_px(hex.size_mm), hex.orientation);
            let style = StrokeStyle {
                width_px: mm_to_px(hex.line_width_mm),
                color: config.grid_color(),
                alpha: hex.alpha,
            };
            (strokes, style)
        }
    };

    debug!(
        grid_type = %config.grid.grid_type,
        strokes = strokes.len(),
        "Generated grid"
    );

    GridGeometry {
        grid_type: config.grid.grid_type,
        strokes,
        style,
    }
}

fn usable_cell(inner: &InnerRect, cell_px: f64) -> bool {
    if inner.is_empty() {
        return false;
    }
    if !cell_px.is_finite() || cell_px < MIN_CELL_PX {
        warn!(cell_px, "Grid cell too small, skipping grid");
        return false;
    }
    true
}

/// Number of boundary-inclusive lines along an axis of `length` px.
pub fn square_line_count(length: f64, cell_px: f64) -> usize {
    if !(length >= 0.0) || !(cell_px > 0.0) {
        return 0;
    }
    ((length + SQUARE_EDGE_EPSILON_PX) / cell_px).floor() as usize + 1
}

/// Square lattice lines spanning the whole inner rectangle.
pub fn square_lines(inner: &InnerRect, cell_px: f64) -> Vec<GridStroke> {
    if !usable_cell(inner, cell_px) {
        return Vec::new();
    }

    let columns = square_line_count(inner.width, cell_px);
    let rows = square_line_count(inner.height, cell_px);
    let mut strokes = Vec::with_capacity(columns + rows);

    for k in 0..columns {
        let x = inner.x + k as f64 * cell_px;
        strokes.push(GridStroke::Line {
            from: Point::new(x, inner.y),
            to: Point::new(x, inner.bottom()),
        });
    }

    for k in 0..rows {
        let y = inner.y + k as f64 * cell_px;
        strokes.push(GridStroke::Line {
            from: Point::new(inner.x, y),
            to: Point::new(inner.right(), y),
        });
    }

    strokes
}

/// Vertices of one hexagon, in drawing order.
pub fn hex_vertices(center: Point, radius: f64, orientation: HexOrientation) -> [Point; 6] {
    let offset_deg = match orientation {
        HexOrientation::Pointy => -30.0,
        HexOrientation::Flat => 0.0,
    };

    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 + offset_deg).to_radians();
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}

/// Hex lattice cells covering the inner rectangle.
pub fn hex_cells(inner: &InnerRect, radius: f64, orientation: HexOrientation) -> Vec<GridStroke> {
    if !usable_cell(inner, radius) {
        return Vec::new();
    }

    let sqrt3 = 3.0_f64.sqrt();
    let centers = match orientation {
        HexOrientation::Pointy => {
            let step_x = sqrt3 * radius;
            let step_y = 1.5 * radius;
            // Extent of one hexagon: sqrt(3) r wide, 2 r tall
            let max_dx = inner.width + step_x;
            let max_dy = inner.height + 2.0 * radius;
            offset_rows(step_x, step_y, max_dx, max_dy)
        }
        HexOrientation::Flat => {
            let step_x = 1.5 * radius;
            let step_y = sqrt3 * radius;
            // Extent of one hexagon: 2 r wide, sqrt(3) r tall
            let max_dx = inner.width + 2.0 * radius;
            let max_dy = inner.height + step_y;
            offset_columns(step_x, step_y, max_dx, max_dy)
        }
    };

    centers
        .into_iter()
        .map(|(dx, dy)| {
            let center = Point::new(inner.x + dx, inner.y + dy);
            GridStroke::Hexagon {
                center,
                vertices: hex_vertices(center, radius, orientation),
            }
        })
        .collect()
}

/// Center offsets for pointy-top rows; odd rows shift right by half a step.
fn offset_rows(step_x: f64, step_y: f64, max_dx: f64, max_dy: f64) -> Vec<(f64, f64)> {
    let mut centers = Vec::new();
    let mut row = 0usize;
    loop {
        let dy = row as f64 * step_y;
        if dy > max_dy {
            break;
        }
        let shift = if row % 2 == 1 { step_x / 2.0 } else { 0.0 };
        let mut col = 0usize;
        loop {
            let dx = shift + col as f64 * step_x;
            if dx > max_dx {
                break;
            }
            centers.push((dx, dy));
            col += 1;
        }
        row += 1;
    }
    centers
}

/// Center offsets for flat-top columns; odd columns shift down by half a step.
fn offset_columns(step_x: f64, step_y: f64, max_dx: f64, max_dy: f64) -> Vec<(f64, f64)> {
    let mut centers = Vec::new();
    let mut row = 0usize;
    loop {
        let base_dy = row as f64 * step_y;
        if base_dy > max_dy {
            break;
        }
        let mut col = 0usize;
        loop {
            let dx = col as f64 * step_x;
            if dx > max_dx {
                break;
            }
            let shift = if col % 2 == 1 { step_y / 2.0 } else { 0.0 };
            centers.push((dx, base_dy + shift));
            col += 1;
        }
        row += 1;
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f64, h: f64) -> InnerRect {
        InnerRect::new(10.0, 20.0, w, h)
    }

    #[test]
    fn test_square_line_count() {
        assert_eq!(square_line_count(100.0, 10.0), 11);
        assert_eq!(square_line_count(99.0, 10.0), 10);
        assert_eq!(square_line_count(0.0, 10.0), 1);
        assert_eq!(square_line_count(5.0, 10.0), 1);
        assert_eq!(square_line_count(-1.0, 10.0), 0);
        assert_eq!(square_line_count(10.0, 0.0), 0);
    }

    #[test]
    fn test_square_lines_span_rectangle() {
        let inner = rect(100.0, 50.0);
        let strokes = square_lines(&inner, 25.0);
        assert_eq!(strokes.len(), 5 + 3);

        match &strokes[0] {
            GridStroke::Line { from, to } => {
                assert_eq!(*from, Point::new(10.0, 20.0));
                assert_eq!(*to, Point::new(10.0, 70.0));
            }
            other => panic!("unexpected stroke {:?}", other),
        }
        match &strokes[4] {
            GridStroke::Line { from, .. } => assert_eq!(from.x, 110.0),
            other => panic!("unexpected stroke {:?}", other),
        }
        match strokes.last() {
            Some(GridStroke::Line { from, to }) => {
                assert_eq!(from.y, 70.0);
                assert_eq!(to.x, 110.0);
            }
            other => panic!("unexpected stroke {:?}", other),
        }
    }

    #[test]
    fn test_empty_rect_gives_empty_grid() {
        assert!(square_lines(&rect(0.0, 50.0), 10.0).is_empty());
        assert!(square_lines(&rect(-20.0, -20.0), 10.0).is_empty());
        assert!(hex_cells(&rect(50.0, 0.0), 10.0, HexOrientation::Pointy).is_empty());
    }

    #[test]
    fn test_degenerate_cell_sizes() {
        assert!(square_lines(&rect(100.0, 100.0), 0.0).is_empty());
        assert!(square_lines(&rect(100.0, 100.0), -5.0).is_empty());
        assert!(hex_cells(&rect(100.0, 100.0), f64::NAN, HexOrientation::Flat).is_empty());
        assert!(hex_cells(&rect(100.0, 100.0), 1e-9, HexOrientation::Pointy).is_empty());
    }

    #[test]
    fn test_huge_cells_still_produce_a_cell() {
        let cells = hex_cells(&rect(50.0, 50.0), 10_000.0, HexOrientation::Pointy);
        assert!(!cells.is_empty());
        let lines = square_lines(&rect(50.0, 50.0), 10_000.0);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_pointy_vertices() {
        let v = hex_vertices(Point::new(0.0, 0.0), 10.0, HexOrientation::Pointy);
        // Vertex 0 at -30 degrees, vertex 2 straight down in screen space
        assert!((v[0].x - 10.0 * 30f64.to_radians().cos()).abs() < 1e-9);
        assert!((v[0].y + 5.0).abs() < 1e-9);
        assert!(v[2].x.abs() < 1e-9);
        assert!((v[2].y - 10.0).abs() < 1e-9);
        assert!((v[1].y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_vertices() {
        let v = hex_vertices(Point::new(5.0, 5.0), 2.0, HexOrientation::Flat);
        assert!((v[0].x - 7.0).abs() < 1e-9);
        assert!((v[0].y - 5.0).abs() < 1e-9);
        assert!((v[3].x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointy_odd_rows_are_shifted() {
        let r = 10.0;
        let cells = hex_cells(&InnerRect::new(0.0, 0.0, 100.0, 100.0), r, HexOrientation::Pointy);
        let centers: Vec<Point> = cells
            .iter()
            .map(|c| match c {
                GridStroke::Hexagon { center, .. } => *center,
                GridStroke::Line { .. } => unreachable!(),
            })
            .collect();

        assert_eq!(centers[0], Point::new(0.0, 0.0));
        let first_odd = centers
            .iter()
            .find(|c| (c.y - 1.5 * r).abs() < 1e-9)
            .copied()
            .unwrap();
        assert!((first_odd.x - 3f64.sqrt() * r / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_odd_columns_are_shifted() {
        let r = 10.0;
        let cells = hex_cells(&InnerRect::new(0.0, 0.0, 100.0, 100.0), r, HexOrientation::Flat);
        let second = match &cells[1] {
            GridStroke::Hexagon { center, .. } => *center,
            GridStroke::Line { .. } => unreachable!(),
        };
        assert!((second.x - 15.0).abs() < 1e-9);
        assert!((second.y - 3f64.sqrt() * r / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_generate_uses_active_grid_only() {
        let mut config = Configuration::default();
        config.grid.grid_type = GridType::Square;
        config.square.size_mm = 10.0;
        config.hex.size_mm = 50.0;
        let inner = InnerRect::new(0.0, 0.0, mm_to_px(100.0), mm_to_px(100.0));

        let grid = generate(&config, &inner);
        assert_eq!(grid.grid_type, GridType::Square);
        assert_eq!(grid.vertical_lines().count(), 11);
        assert_eq!(grid.horizontal_lines().count(), 11);
        assert_eq!(grid.hexagons().count(), 0);
        assert_eq!(grid.style.alpha, config.square.alpha);
        assert!((grid.style.width_px - mm_to_px(0.8)).abs() < 1e-9);
    }
}

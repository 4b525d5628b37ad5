use std::f64::consts::PI;

use chess::{to_grid, Orientation, Square, UciMove};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::board::BoardGeometry;

/// Length of an arrowhead wing, in squares.
const HEAD_SIZE: f64 = 0.3;
/// Angle between the shaft and each wing.
const HEAD_SPREAD: f64 = PI / 6.0;

const SHAFT_SYMBOL: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowShape {
    Straight,
    /// Two legs meeting at `turn`, for knight displacements.
    KnightBent { turn: Square },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub from: Square,
    pub to: Square,
    pub shape: ArrowShape,
}

/// A point in board space: one unit per square, origin at the top-left
/// corner of the displayed board, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowGeometry {
    /// Shaft vertices from the origin centre to the tip.
    pub points: Vec<Point>,
    /// Tip followed by the two wing ends.
    pub head: [Point; 3],
    /// Direction of the final leg, radians, screen orientation.
    pub angle: f64,
}

impl Arrow {
    pub fn new(from: Square, to: Square) -> Self {
        let shape = match turning_square(from, to) {
            Some(turn) => ArrowShape::KnightBent { turn },
            None => ArrowShape::Straight,
        };
        Self { from, to, shape }
    }

    pub fn geometry(&self, orientation: Orientation) -> ArrowGeometry {
        let mut points = vec![cell_centre(self.from, orientation)];
        if let ArrowShape::KnightBent { turn } = self.shape {
            points.push(cell_centre(turn, orientation));
        }
        let tip = cell_centre(self.to, orientation);
        let tail = points[points.len() - 1];
        points.push(tip);

        let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
        let wing = |spread: f64| Point {
            x: tip.x - HEAD_SIZE * (angle + spread).cos(),
            y: tip.y - HEAD_SIZE * (angle + spread).sin(),
        };

        ArrowGeometry {
            points,
            head: [tip, wing(-HEAD_SPREAD), wing(HEAD_SPREAD)],
            angle,
        }
    }
}

pub fn is_knight_displacement(from: Square, to: Square) -> bool {
    let df = (to.file() as i8 - from.file() as i8).abs();
    let dr = (to.rank() as i8 - from.rank() as i8).abs();
    matches!((df, dr), (1, 2) | (2, 1))
}

/// Corner of an L-shaped arrow. The long leg is drawn first: vertical
/// when the move spans two ranks, horizontal when it spans two files.
pub fn turning_square(from: Square, to: Square) -> Option<Square> {
    if !is_knight_displacement(from, to) {
        return None;
    }
    let rank_diff = (to.rank() as i8 - from.rank() as i8).abs();
    Some(if rank_diff < 2 {
        Square::new(to.file(), from.rank())
    } else {
        Square::new(from.file(), to.rank())
    })
}

fn cell_centre(square: Square, orientation: Orientation) -> Point {
    let (row, col) = to_grid(square, orientation);
    Point {
        x: col as f64 + 0.5,
        y: row as f64 + 0.5,
    }
}

/// User-drawn annotations: arrows and marked squares.
/// Purely visual; nothing here reaches the server.
#[derive(Debug, Clone, Default)]
pub struct AnnotationOverlay {
    arrows: Vec<Arrow>,
    marks: Vec<Square>,
}

impl AnnotationOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arrow; a zero-length or duplicate arrow is not added.
    pub fn add_arrow(&mut self, from: Square, to: Square) -> Option<Arrow> {
        if from == to || self.arrows.iter().any(|a| a.from == from && a.to == to) {
            return None;
        }
        let arrow = Arrow::new(from, to);
        tracing::debug!(mv = %UciMove::new(from, to), shape = ?arrow.shape, "Arrow added");
        self.arrows.push(arrow);
        Some(arrow)
    }

    /// Mark or unmark a square. Returns whether it is now marked.
    pub fn toggle_mark(&mut self, square: Square) -> bool {
        if let Some(idx) = self.marks.iter().position(|s| *s == square) {
            self.marks.remove(idx);
            false
        } else {
            self.marks.push(square);
            true
        }
    }

    pub fn clear(&mut self) {
        self.arrows.clear();
        self.marks.clear();
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn marks(&self) -> &[Square] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty() && self.marks.is_empty()
    }
}

/// Paint marks and arrows over an already rendered board.
pub fn render_annotations(
    buf: &mut Buffer,
    overlay: &AnnotationOverlay,
    geometry: &BoardGeometry,
    orientation: Orientation,
    arrow_color: Color,
    mark_color: Color,
) {
    for square in overlay.marks() {
        let (row, col) = to_grid(*square, orientation);
        let (x, y) = geometry.cell_origin(row, col);
        draw_square_outline(buf, x, y, mark_color, geometry);
    }

    let style = Style::default().fg(arrow_color).add_modifier(Modifier::BOLD);
    for arrow in overlay.arrows() {
        let shape = arrow.geometry(orientation);
        let tip = geometry.to_terminal(shape.head[0]);
        let tip_cell = (tip.0.floor(), tip.1.floor());

        for leg in shape.points.windows(2) {
            let (x0, y0) = geometry.to_terminal(leg[0]);
            let (x1, y1) = geometry.to_terminal(leg[1]);
            let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let cell = ((x0 + (x1 - x0) * t).floor(), (y0 + (y1 - y0) * t).floor());
                if cell != tip_cell {
                    put_symbol(buf, cell, SHAFT_SYMBOL, style, geometry.bounds);
                }
            }
        }
        put_symbol(buf, tip_cell, head_symbol(shape.angle), style, geometry.bounds);
    }
}

fn put_symbol(buf: &mut Buffer, (x, y): (f64, f64), symbol: &str, style: Style, bounds: Rect) {
    if x < bounds.x as f64 || y < bounds.y as f64 {
        return;
    }
    let (x, y) = (x as u16, y as u16);
    if x < bounds.right() && y < bounds.bottom() {
        buf[(x, y)].set_symbol(symbol).set_style(style);
    }
}

/// Arrowhead glyph for a direction in screen space (y down).
fn head_symbol(angle: f64) -> &'static str {
    let sector = (angle / (PI / 4.0)).round() as i32;
    match sector.rem_euclid(8) {
        0 => "→",
        1 => "↘",
        2 => "↓",
        3 => "↙",
        4 => "←",
        5 => "↖",
        6 => "↑",
        _ => "↗",
    }
}

/// Draw an outline around a square.
fn draw_square_outline(buf: &mut Buffer, x: u16, y: u16, color: Color, geometry: &BoardGeometry) {
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let (width, height) = (geometry.square_width, geometry.square_height);
    let bounds = geometry.bounds;
    let mut put = |px: u16, py: u16, symbol: &str| {
        if px < bounds.right() && py < bounds.bottom() {
            buf[(px, py)].set_symbol(symbol).set_style(style);
        }
    };

    let bottom = y + height - 1;
    let right = x + width - 1;
    for dx in 0..width {
        let (top_sym, bottom_sym) = match dx {
            0 => ("┌", "└"),
            d if d == width - 1 => ("┐", "┘"),
            _ => ("─", "─"),
        };
        put(x + dx, y, top_sym);
        put(x + dx, bottom, bottom_sym);
    }
    for dy in 1..height.saturating_sub(1) {
        put(x, y + dy, "│");
        put(right, y + dy, "│");
    }
}

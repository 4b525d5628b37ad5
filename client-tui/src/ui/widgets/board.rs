use chess::{square_at, Piece, PieceColor, PieceKind, BOARD_SIZE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use super::board_overlay::{render_annotations, AnnotationOverlay, Point};
use crate::ui::gesture::{ActiveDrag, PointerHit};
use crate::ui::surface::{BoardSurface, HighlightKind, Shade};
use crate::ui::theme::Theme;

const SQUARES: u16 = BOARD_SIZE as u16;
/// Columns reserved left of the board for rank labels.
const RANK_LABEL_WIDTH: u16 = 3;
/// Rows reserved below the board for file labels.
const FILE_LABEL_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSizeVariant {
    /// One glyph per square, for cramped terminals.
    Compact,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardSize {
    variant: BoardSizeVariant,
    square_width: u16,
    square_height: u16,
}

impl BoardSize {
    const COMPACT: Self = Self {
        variant: BoardSizeVariant::Compact,
        square_width: 5,
        square_height: 3,
    };

    const SMALL: Self = Self {
        variant: BoardSizeVariant::Small,
        square_width: 9,
        square_height: 5,
    };

    const MEDIUM: Self = Self {
        variant: BoardSizeVariant::Medium,
        square_width: 13,
        square_height: 7,
    };

    const LARGE: Self = Self {
        variant: BoardSizeVariant::Large,
        square_width: 17,
        square_height: 9,
    };

    /// Largest size whose board and labels fit in `area`.
    fn for_area(area: Rect) -> Self {
        [Self::LARGE, Self::MEDIUM, Self::SMALL]
            .into_iter()
            .find(|size| {
                let (width, height) = size.min_dimensions();
                area.width >= width && area.height >= height
            })
            .unwrap_or(Self::COMPACT)
    }

    fn min_dimensions(&self) -> (u16, u16) {
        (
            self.square_width * SQUARES + RANK_LABEL_WIDTH,
            self.square_height * SQUARES + FILE_LABEL_HEIGHT,
        )
    }
}

/// Where the board sits on screen. Computed once per frame and shared
/// by rendering and mouse hit-testing so the two always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Top-left corner of the a8 (or h1) square.
    pub x: u16,
    pub y: u16,
    pub square_width: u16,
    pub square_height: u16,
    pub variant: BoardSizeVariant,
    /// Drawable area inside the border.
    pub bounds: Rect,
}

impl BoardGeometry {
    /// Lay the board out inside a bordered `area`, centred.
    pub fn for_area(area: Rect) -> Self {
        let inner = board_block().inner(area);
        let size = BoardSize::for_area(inner);
        let (total_width, total_height) = size.min_dimensions();

        let offset_x = inner.width.saturating_sub(total_width) / 2;
        let offset_y = inner.height.saturating_sub(total_height) / 2;

        Self {
            x: inner.x + offset_x + RANK_LABEL_WIDTH,
            y: inner.y + offset_y,
            square_width: size.square_width,
            square_height: size.square_height,
            variant: size.variant,
            bounds: inner,
        }
    }

    /// Terminal position of a cell's top-left corner.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u16, u16) {
        (
            self.x + col as u16 * self.square_width,
            self.y + row as u16 * self.square_height,
        )
    }

    /// Map a terminal position to the board cell under it.
    pub fn hit(&self, column: u16, row: u16) -> Option<PointerHit> {
        if column < self.x || row < self.y {
            return None;
        }
        let dx = column - self.x;
        let dy = row - self.y;
        let col = (dx / self.square_width) as usize;
        let cell_row = (dy / self.square_height) as usize;
        if col >= BOARD_SIZE || cell_row >= BOARD_SIZE {
            return None;
        }
        Some(PointerHit {
            row: cell_row,
            col,
            offset: (dx % self.square_width, dy % self.square_height),
        })
    }

    /// Board-space point to fractional terminal coordinates.
    pub fn to_terminal(&self, point: Point) -> (f64, f64) {
        (
            self.x as f64 + point.x * self.square_width as f64,
            self.y as f64 + point.y * self.square_height as f64,
        )
    }
}

fn board_block() -> Block<'static> {
    Block::default().title("♟ Board ♟").borders(Borders::ALL)
}

pub struct BoardWidget<'a> {
    pub surface: &'a BoardSurface,
    pub annotations: &'a AnnotationOverlay,
    pub drag: Option<&'a ActiveDrag>,
    pub theme: &'a Theme,
}

impl<'a> BoardWidget<'a> {
    pub fn new(surface: &'a BoardSurface, annotations: &'a AnnotationOverlay, theme: &'a Theme) -> Self {
        Self {
            surface,
            annotations,
            drag: None,
            theme,
        }
    }

    pub fn dragging(mut self, drag: Option<&'a ActiveDrag>) -> Self {
        self.drag = drag;
        self
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = BoardGeometry::for_area(area);
        board_block()
            .border_style(Style::default().fg(self.theme.board_border))
            .render(area, buf);

        let orientation = self.surface.orientation();
        let label_style = Style::default().fg(self.theme.board_label);
        let bounds = geometry.bounds;

        // Rank labels down the left side
        for row in 0..BOARD_SIZE {
            let (_, y) = geometry.cell_origin(row, 0);
            let y = y + geometry.square_height / 2;
            if y < bounds.bottom() {
                let rank = square_at(row, 0, orientation).rank() as u8;
                let label = format!("{} ", (b'1' + rank) as char);
                buf.set_string(geometry.x.saturating_sub(2), y, &label, label_style);
            }
        }

        // File labels along the bottom
        for col in 0..BOARD_SIZE {
            let (x, _) = geometry.cell_origin(0, col);
            let x = x + geometry.square_width / 2;
            let y = geometry.y + SQUARES * geometry.square_height;
            if x < bounds.right() && y < bounds.bottom() {
                let file = square_at(0, col, orientation).file() as u8;
                buf.set_string(x, y, ((b'a' + file) as char).to_string(), label_style);
            }
        }

        let lifted = self.drag.map(|drag| drag.origin);
        for (row, col, cell) in self.surface.cells() {
            let (x, y) = geometry.cell_origin(row, col);
            let is_light = cell.shade == Shade::Light;
            let bg_color = match self.surface.highlight_of(cell.square) {
                Some(kind) => self.theme.resolve_highlight(kind, is_light),
                None if is_light => self.theme.light_square,
                None => self.theme.dark_square,
            };

            render_square(buf, x, y, bg_color, &geometry);

            if let Some(piece) = cell.occupant {
                if lifted != Some(cell.square) {
                    render_piece(buf, x, y, piece, Some(bg_color), &geometry, self.theme);
                }
            }
        }

        render_annotations(
            buf,
            self.annotations,
            &geometry,
            orientation,
            self.theme.arrow,
            self.theme.mark,
        );

        // The dragged piece follows the pointer, above everything else.
        if let Some(drag) = self.drag {
            let x = drag.pointer.0.saturating_sub(drag.pointer_offset.0);
            let y = drag.pointer.1.saturating_sub(drag.pointer_offset.1);
            render_piece(buf, x, y, drag.piece, None, &geometry, self.theme);
        }
    }
}

fn render_square(buf: &mut Buffer, x: u16, y: u16, bg_color: Color, geometry: &BoardGeometry) {
    let style = Style::default().bg(bg_color);
    let bounds = geometry.bounds;

    for dy in 0..geometry.square_height {
        for dx in 0..geometry.square_width {
            let px = x + dx;
            let py = y + dy;
            if px < bounds.right() && py < bounds.bottom() {
                buf[(px, py)].set_style(style);
            }
        }
    }
}

/// Draw a piece's art centred in the square at (x, y). With no
/// background the art is laid over whatever is already there.
fn render_piece(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    piece: Piece,
    bg_color: Option<Color>,
    geometry: &BoardGeometry,
    theme: &Theme,
) {
    let lines = piece_art(piece, geometry.variant);
    let fg_color = match piece.color {
        PieceColor::White => theme.white_piece,
        PieceColor::Black => theme.black_piece,
    };
    let mut style = Style::default().fg(fg_color).add_modifier(Modifier::BOLD);
    if let Some(bg) = bg_color {
        style = style.bg(bg);
    }

    let bounds = geometry.bounds;
    let top = y + geometry.square_height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let py = top + i as u16;
        if py >= bounds.bottom() {
            break;
        }
        let line_width = line.chars().count() as u16;
        let left = x + geometry.square_width.saturating_sub(line_width) / 2;
        for (dx, ch) in line.chars().enumerate() {
            let px = left + dx as u16;
            if ch == ' ' || px >= bounds.right() || px < bounds.x || py < bounds.y {
                continue;
            }
            buf[(px, py)].set_char(ch).set_style(style);
        }
    }
}

/// Block art for a piece. The crown row tells the kinds apart at a
/// glance and the letter row names the piece outright.
fn piece_art(piece: Piece, variant: BoardSizeVariant) -> Vec<String> {
    if variant == BoardSizeVariant::Compact {
        return vec![piece.glyph().to_string()];
    }

    let letter = piece.kind.to_char_upper();
    let (crown, body) = match piece.kind {
        PieceKind::King => ("╋", "▟█▙"),
        PieceKind::Queen => ("◆◆◆", "▟█▙"),
        PieceKind::Rook => ("▙▟▙", "███"),
        PieceKind::Bishop => ("◗", "▟█▙"),
        PieceKind::Knight => ("▄▟▙", "▀▜█"),
        PieceKind::Pawn => ("●", "▐█▌"),
    };

    let mut art = vec![crown.to_string(), body.to_string()];
    match variant {
        BoardSizeVariant::Small => {
            art.push(format!("▐█{letter}█▌"));
            art.push("▀▀▀▀▀".to_string());
        }
        _ => {
            art.push(format!("▐██{letter}██▌"));
            art.push("▐█████▌".to_string());
            art.push("▀▀▀▀▀▀▀".to_string());
        }
    }
    art
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::{Grid, Orientation, Square};

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn surface(orientation: Orientation) -> BoardSurface {
        let mut surface = BoardSurface::new(orientation);
        surface.draw(&Grid::decode(START).unwrap(), orientation);
        surface
    }

    #[test]
    fn test_size_picks_largest_fit() {
        assert_eq!(
            BoardSize::for_area(Rect::new(0, 0, 200, 100)).variant,
            BoardSizeVariant::Large
        );
        assert_eq!(
            BoardSize::for_area(Rect::new(0, 0, 75, 42)).variant,
            BoardSizeVariant::Small
        );
        assert_eq!(
            BoardSize::for_area(Rect::new(0, 0, 60, 30)).variant,
            BoardSizeVariant::Compact
        );
    }

    #[test]
    fn test_hit_maps_cells_and_offsets() {
        let geometry = BoardGeometry::for_area(Rect::new(0, 0, 77, 44));
        assert_eq!(geometry.variant, BoardSizeVariant::Small);

        let hit = geometry.hit(geometry.x + 9 * 4 + 2, geometry.y + 5 * 6 + 1).unwrap();
        assert_eq!((hit.row, hit.col), (6, 4));
        assert_eq!(hit.offset, (2, 1));

        assert!(geometry.hit(geometry.x - 1, geometry.y).is_none());
        assert!(geometry.hit(geometry.x + 9 * 8, geometry.y).is_none());
        assert!(geometry.hit(geometry.x, geometry.y + 5 * 8).is_none());
    }

    #[test]
    fn test_render_labels_follow_orientation() {
        let area = Rect::new(0, 0, 77, 44);
        let geometry = BoardGeometry::for_area(area);
        let theme = Theme::dark();
        let annotations = AnnotationOverlay::new();

        for (orientation, first_file) in [(Orientation::White, "a"), (Orientation::Black, "h")] {
            let surface = surface(orientation);
            let mut buf = Buffer::empty(area);
            BoardWidget::new(&surface, &annotations, &theme).render(area, &mut buf);

            let x = geometry.x + geometry.square_width / 2;
            let y = geometry.y + 8 * geometry.square_height;
            assert_eq!(buf[(x, y)].symbol(), first_file);
        }
    }

    #[test]
    fn test_render_highlight_background() {
        let area = Rect::new(0, 0, 77, 44);
        let geometry = BoardGeometry::for_area(area);
        let theme = Theme::dark();
        let annotations = AnnotationOverlay::new();
        let mut surface = surface(Orientation::White);
        surface.highlight([Square::E4], HighlightKind::LegalDestination);

        let mut buf = Buffer::empty(area);
        BoardWidget::new(&surface, &annotations, &theme).render(area, &mut buf);

        // e4 is row 4, col 4: a light square from white's side.
        let (x, y) = geometry.cell_origin(4, 4);
        assert_eq!(
            buf[(x, y)].bg,
            theme.resolve_highlight(HighlightKind::LegalDestination, true)
        );
        let (x, y) = geometry.cell_origin(4, 3);
        assert_eq!(buf[(x, y)].bg, theme.dark_square);
    }

    #[test]
    fn test_lifted_piece_leaves_origin_empty() {
        let area = Rect::new(0, 0, 77, 44);
        let geometry = BoardGeometry::for_area(area);
        let theme = Theme::dark();
        let annotations = AnnotationOverlay::new();
        let surface = surface(Orientation::White);
        let drag = ActiveDrag {
            origin: Square::E2,
            piece: Piece::new(PieceKind::Pawn, PieceColor::White),
            pointer_offset: (0, 0),
            pointer: (0, 0),
        };

        let render = |drag: Option<&ActiveDrag>| {
            let mut buf = Buffer::empty(area);
            BoardWidget::new(&surface, &annotations, &theme)
                .dragging(drag)
                .render(area, &mut buf);
            buf
        };

        let (x, y) = geometry.cell_origin(6, 4);
        let cell_text = |buf: &Buffer| {
            (0..geometry.square_height)
                .flat_map(|dy| (0..geometry.square_width).map(move |dx| (dx, dy)))
                .map(|(dx, dy)| buf[(x + dx, y + dy)].symbol().to_string())
                .collect::<String>()
        };

        assert!(cell_text(&render(None)).contains('P'));
        assert!(!cell_text(&render(Some(&drag))).contains('P'));
    }

    #[test]
    fn test_knight_arrow_passes_turning_square() {
        let area = Rect::new(0, 0, 77, 44);
        let geometry = BoardGeometry::for_area(area);
        let theme = Theme::dark();
        let mut annotations = AnnotationOverlay::new();
        annotations.add_arrow(Square::E2, Square::F4);
        let mut grid = Grid::empty();
        grid.put(Square::A1, Piece::from_symbol('K'));
        let mut surface = BoardSurface::new(Orientation::White);
        surface.draw(&grid, Orientation::White);

        let mut buf = Buffer::empty(area);
        BoardWidget::new(&surface, &annotations, &theme).render(area, &mut buf);

        // Centre of e4 (row 4, col 4) carries the shaft.
        let (x, y) = geometry.cell_origin(4, 4);
        let centre = (x + geometry.square_width / 2, y + geometry.square_height / 2);
        assert_eq!(buf[centre].symbol(), "•");
        // The tip on f4 points right.
        let (x, y) = geometry.cell_origin(4, 5);
        let tip = (x + geometry.square_width / 2, y + geometry.square_height / 2);
        assert_eq!(buf[tip].symbol(), "→");
        assert_eq!(buf[tip].fg, theme.arrow);
    }

    #[test]
    fn test_compact_art_is_a_glyph() {
        let art = piece_art(Piece::new(PieceKind::Queen, PieceColor::Black), BoardSizeVariant::Compact);
        assert_eq!(art, vec!["♛".to_string()]);
        let art = piece_art(Piece::new(PieceKind::Queen, PieceColor::White), BoardSizeVariant::Small);
        assert_eq!(art.len(), 4);
        assert!(art[2].contains('Q'));
    }
}

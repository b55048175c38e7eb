use ratatui::prelude::*;

use super::geometry::Point;

/// Drawing target for the scope renderer, addressed in canvas pixels.
pub trait Surface {
    fn dot(&mut self, p: Point, color: Color);

    /// Text centred horizontally on `p`.
    fn text(&mut self, p: Point, text: &str, color: Color);

    fn line(&mut self, a: Point, b: Point, color: Color) {
        let cells = line_cells(
            a.x.round() as i32,
            a.y.round() as i32,
            b.x.round() as i32,
            b.y.round() as i32,
        );
        for (x, y) in cells {
            self.dot(Point::new(x as f64, y as f64), color);
        }
    }

    fn disc(&mut self, center: Point, radius: f64, color: Color) {
        let r = radius.ceil() as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f64) <= radius * radius {
                    self.dot(Point::new(center.x + dx as f64, center.y + dy as f64), color);
                }
            }
        }
    }
}

/// Bresenham walk between two integer points, endpoints included.
pub fn line_cells(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cx = x0;
    let mut cy = y0;
    loop {
        cells.push((cx, cy));
        if cx == x1 && cy == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; cx += sx; }
        if e2 <= dx { err += dx; cy += sy; }
    }
    cells
}

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Cell {
    Empty,
    Braille(u8, Color),
    Glyph(char, Color),
}

/// Placement of the square canvas inside a block of terminal cells.
///
/// Every cell holds 2x4 braille dots. The canvas is the largest square of
/// dots that fits, centred in the block, so renderer coordinates never need
/// to know about centering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    pub width: usize,
    pub height: usize,
    pub origin: Point,
    pub side: f64,
}

impl CanvasLayout {
    pub fn fit(width: usize, height: usize) -> Self {
        let dots_w = (width * 2) as f64;
        let dots_h = (height * 4) as f64;
        let side = dots_w.min(dots_h);
        let origin = Point::new(
            ((dots_w - side) / 2.0).floor(),
            ((dots_h - side) / 2.0).floor(),
        );
        Self { width, height, origin, side }
    }

    /// Map a terminal cell (relative to the block) to the canvas pixel at its middle.
    pub fn cell_to_canvas(&self, col: u16, row: u16) -> Point {
        Point::new(
            col as f64 * 2.0 + 1.0 - self.origin.x,
            row as f64 * 4.0 + 2.0 - self.origin.y,
        )
    }
}

pub struct BrailleSurface {
    grid: Vec<Vec<Cell>>,
    layout: CanvasLayout,
}

impl BrailleSurface {
    pub fn new(layout: CanvasLayout) -> Self {
        Self {
            grid: vec![vec![Cell::Empty; layout.width]; layout.height],
            layout,
        }
    }

    pub fn into_lines(self, bg: Color) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|cell| match cell {
                        Cell::Empty => Span::styled(" ", Style::default().bg(bg)),
                        Cell::Braille(bits, color) => {
                            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                            Span::styled(String::from(ch), Style::default().fg(color).bg(bg))
                        }
                        Cell::Glyph(ch, color) => Span::styled(
                            String::from(ch),
                            Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD),
                        ),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for BrailleSurface {
    fn dot(&mut self, p: Point, color: Color) {
        let bx = (p.x + self.layout.origin.x).floor();
        let by = (p.y + self.layout.origin.y).floor();
        if bx < 0.0 || by < 0.0 {
            return;
        }
        let (bx, by) = (bx as usize, by as usize);
        let (cx, cy) = (bx / 2, by / 4);
        if cx >= self.layout.width || cy >= self.layout.height {
            return;
        }
        let bit = braille_bit(bx % 2, by % 4);
        let cell = &mut self.grid[cy][cx];
        *cell = match *cell {
            Cell::Empty => Cell::Braille(bit, color),
            Cell::Braille(bits, _) => Cell::Braille(bits | bit, color),
            // text wins over dots
            glyph @ Cell::Glyph(..) => glyph,
        };
    }

    fn text(&mut self, p: Point, text: &str, color: Color) {
        let by = (p.y + self.layout.origin.y).floor();
        let bx = (p.x + self.layout.origin.x).floor();
        if by < 0.0 {
            return;
        }
        let row = by as usize / 4;
        if row >= self.layout.height {
            return;
        }
        let len = text.chars().count() as i64;
        let start = (bx as i64).div_euclid(2) - len / 2;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col >= 0 && (col as usize) < self.layout.width {
                self.grid[row][col as usize] = Cell::Glyph(ch, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_canvas_is_centered() {
        // 40 cols x 10 rows -> 80 x 40 dots, canvas 40 wide
        let layout = CanvasLayout::fit(40, 10);
        assert_eq!(layout.side, 40.0);
        assert_eq!(layout.origin, Point::new(20.0, 0.0));
        let p = layout.cell_to_canvas(10, 0);
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_dots_merge_into_one_cell() {
        let mut s = BrailleSurface::new(CanvasLayout::fit(2, 1));
        s.dot(Point::new(0.0, 0.0), Color::Red);
        s.dot(Point::new(1.0, 3.0), Color::Blue);
        let lines = s.into_lines(Color::Black);
        let first = lines[0].spans[0].content.chars().next().unwrap();
        assert_eq!(first as u32, 0x2800 + 0x01 + 0x80);
    }

    #[test]
    fn test_text_is_not_overwritten_by_dots() {
        let mut s = BrailleSurface::new(CanvasLayout::fit(10, 2));
        s.text(Point::new(10.0, 1.0), "AB", Color::White);
        s.line(Point::new(0.0, 0.0), Point::new(19.0, 0.0), Color::Red);
        let lines = s.into_lines(Color::Black);
        let row: String = lines[0].spans.iter().map(|sp| sp.content.as_ref()).collect();
        assert!(row.contains("AB"));
    }

    #[test]
    fn test_line_cells_endpoints() {
        let cells = line_cells(0, 0, 3, -2);
        assert_eq!(cells.first(), Some(&(0, 0)));
        assert_eq!(cells.last(), Some(&(3, -2)));
    }
}

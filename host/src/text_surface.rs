//! Character raster that implements [`RenderSurface`].
//!
//! One character per pixel of the maze layout. With a 2x2 cell size the
//! raster lines up with the binary grid view: walls on even coordinates,
//! cell centres on odd ones.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use maze_core::{Cell, Direction, Layout, Point, Rect, RenderSurface};

pub const BLANK: u8 = b' ';
pub const SOLID: u8 = b'#';
pub const FAINT: u8 = b'.';
pub const FORWARD: u8 = b'*';
pub const UNDO: u8 = b'x';

const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

pub struct TextSurface<W> {
    origin: Point,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    out: Option<W>,
    delay: Duration,
    frames: usize,
}

impl TextSurface<std::io::Sink> {
    /// A surface that only keeps the final picture.
    pub fn offscreen(layout: &Layout) -> Self {
        Self::new(layout, None, Duration::ZERO)
    }
}

impl<W: Write> TextSurface<W> {
    /// Covers the full extent of `layout`, borders included. When `out` is
    /// set every [`RenderSurface::flush_and_pace`] writes a frame to it.
    pub fn new(layout: &Layout, out: Option<W>, delay: Duration) -> Self {
        let extent = layout.extent();
        // a validated layout has a positive extent; the far edge is drawn too
        let width = extent.width() as usize + 1;
        let height = extent.height() as usize + 1;

        Self {
            origin: layout.origin(),
            width,
            height,
            pixels: vec![BLANK; width * height],
            out,
            delay,
            frames: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of `flush_and_pace` calls so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// How many pixels currently show `glyph`.
    pub fn count(&self, glyph: u8) -> usize {
        self.pixels.iter().filter(|&&p| p == glyph).count()
    }

    /// The raster as text, one line per pixel row, without a trailing newline.
    pub fn render(&self) -> String {
        self.rows().join("\n")
    }

    pub fn rows(&self) -> Vec<String> {
        self.pixels
            .chunks(self.width)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect()
    }

    pub fn into_writer(self) -> Option<W> {
        self.out
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let col = usize::try_from(x - self.origin.x).ok()?;
        let row = usize::try_from(y - self.origin.y).ok()?;
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    fn plot(&mut self, x: i32, y: i32, glyph: u8) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = glyph;
        }
    }

    /// Bresenham line. `skip_start`/`skip_end` leave the endpoints alone.
    fn line(&mut self, from: Point, to: Point, glyph: u8, skip_start: bool, skip_end: bool) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            let at_start = x == from.x && y == from.y;
            let at_end = x == to.x && y == to.y;
            if !(at_start && skip_start) && !(at_end && skip_end) {
                self.plot(x, y, glyph);
            }
            if at_end {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn wall(&mut self, from: Point, to: Point, present: bool) {
        // corners are shared with up to three other walls; a faint wall
        // must not erase them
        if present {
            self.line(from, to, SOLID, false, false);
        } else {
            self.line(from, to, FAINT, true, true);
        }
    }
}

fn write_frame<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    out.write_all(CLEAR_SCREEN)?;
    out.write_all(frame.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

impl<W: Write> RenderSurface for TextSurface<W> {
    fn draw_cell(&mut self, rect: Rect, cell: &Cell) {
        let top_left = Point::new(rect.x1, rect.y1);
        let top_right = Point::new(rect.x2, rect.y1);
        let bottom_left = Point::new(rect.x1, rect.y2);
        let bottom_right = Point::new(rect.x2, rect.y2);

        self.wall(top_left, top_right, cell.has_wall(Direction::North));
        self.wall(top_right, bottom_right, cell.has_wall(Direction::East));
        self.wall(bottom_left, bottom_right, cell.has_wall(Direction::South));
        self.wall(top_left, bottom_left, cell.has_wall(Direction::West));
    }

    fn draw_move(&mut self, from: Point, to: Point, undo: bool) {
        if undo {
            // the parent end may still be on the route
            self.line(from, to, UNDO, true, false);
        } else {
            self.line(from, to, FORWARD, false, false);
        }
    }

    fn flush_and_pace(&mut self) {
        self.frames += 1;

        if self.out.is_some() {
            let frame = self.render();
            if let Some(out) = self.out.as_mut() {
                if let Err(e) = write_frame(out, &frame) {
                    tracing::warn!("Stopping animation, frame write failed: {}", e);
                    self.out = None;
                }
            }
        }

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

//! Character-canvas terminal renderer
//!
//! Redraws the whole picture on every change. Axes and curve live in a
//! background layer; the marker and labels are overlaid per frame.

use crate::errors::{Result, VizError};
use crate::plot::{Axes, PartialSumCurve};
use crate::render::{LabelAnchor, LabelId, LabelPlacement, SceneRenderer};
use crate::timeline::Point;
use colored::{Color, Colorize};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::time::Duration;

const GUTTER: usize = 7;
const MARKER: char = '●';
const CURVE: char = '•';

/// Terminal renderer settings
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Emit ANSI colors
    pub color: bool,

    /// Playback speed multiplier; 0 disables pacing entirely
    pub speed: f64,

    /// Clear and home the cursor before each redraw
    pub clear_screen: bool,

    /// Target time between marker animation frames
    pub frame_interval: Duration,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            color: true,
            speed: 1.0,
            clear_screen: true,
            frame_interval: Duration::from_millis(40), // 25 FPS
        }
    }
}

/// Slowest accepted playback speed other than 0
pub const MIN_PLAYBACK_SPEED: f64 = 1e-3;

impl TerminalOptions {
    /// Nominal duration adjusted for playback speed, saturating at `Duration::MAX`
    pub fn scaled(&self, duration: Duration) -> Duration {
        if self.speed <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(duration.as_secs_f64() / self.speed)
                .unwrap_or(Duration::MAX)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    color: Option<Color>,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', color: None };
}

#[derive(Debug, Clone)]
struct PlacedLabel {
    id: LabelId,
    row: i64,
    center: i64,
    text: String,
}

/// Draws the scene onto a fixed-size character grid written to `out`
pub struct TerminalRenderer<W: Write> {
    out: W,
    options: TerminalOptions,
    width: usize,
    height: usize,
    x_label: String,
    y_label: String,
    x_ticks: Vec<(usize, f64)>,
    y_ticks: Vec<(usize, f64)>,
    background: Vec<Vec<Cell>>,
    marker: Option<Point>,
    labels: Vec<PlacedLabel>,
    next_label: u64,
    redraws: usize,
}

impl<W: Write> TerminalRenderer<W> {
    /// Create renderer; nothing is written until `draw_axes`
    pub fn new(out: W, options: TerminalOptions) -> Self {
        Self {
            out,
            options,
            width: 0,
            height: 0,
            x_label: String::new(),
            y_label: String::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            background: Vec::new(),
            marker: None,
            labels: Vec::new(),
            next_label: 0,
            redraws: 0,
        }
    }

    /// Number of full redraws so far
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Recover the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ensure_canvas(&self) -> Result<()> {
        if self.background.is_empty() {
            return Err(VizError::RenderError("axes must be drawn first".to_string()));
        }
        Ok(())
    }

    fn cell_of(&self, point: Point) -> Option<(usize, usize)> {
        let col = point.x.round();
        let row = point.y.round();
        if !(col.is_finite() && row.is_finite()) || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    fn set(&mut self, col: usize, row: usize, ch: char, color: Option<Color>) {
        if let Some(cell) = self.background.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = Cell { ch, color };
        }
    }

    fn resolve(&self, anchor: LabelAnchor, placement: LabelPlacement) -> Result<(i64, i64)> {
        let offset = match placement {
            LabelPlacement::Above => -1,
            LabelPlacement::Below => 1,
        };

        match anchor {
            LabelAnchor::Point(p) => Ok((p.y.round() as i64 + offset, p.x.round() as i64)),
            LabelAnchor::Label(id) => self
                .labels
                .iter()
                .find(|l| l.id == id)
                .map(|l| (l.row + offset, l.center))
                .ok_or_else(|| {
                    VizError::RenderError(format!("label anchored to missing label {:?}", id))
                }),
        }
    }

    fn compose(&self) -> Vec<Vec<Cell>> {
        let mut grid = self.background.clone();

        if let Some((col, row)) = self.marker.and_then(|m| self.cell_of(m)) {
            grid[row][col] = Cell {
                ch: MARKER,
                color: Some(Color::Red),
            };
        }

        for label in &self.labels {
            let chars: Vec<char> = label.text.chars().collect();
            let row = label.row.clamp(0, self.height as i64 - 1) as usize;
            let max_start = (self.width as i64 - chars.len() as i64).max(0);
            let start = (label.center - chars.len() as i64 / 2).clamp(0, max_start) as usize;
            for (i, ch) in chars.into_iter().enumerate() {
                if start + i < self.width {
                    grid[row][start + i] = Cell {
                        ch,
                        color: Some(Color::White),
                    };
                }
            }
        }

        grid
    }

    fn paint(&self, cell: &Cell) -> String {
        match cell.color {
            Some(color) if self.options.color => cell.ch.to_string().color(color).to_string(),
            _ => cell.ch.to_string(),
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let grid = self.compose();

        if self.options.clear_screen {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        }

        let title = if self.options.color {
            self.y_label.cyan().to_string()
        } else {
            self.y_label.clone()
        };
        writeln!(self.out, "{}", title)?;

        for (row, cells) in grid.iter().enumerate() {
            let gutter = match self.y_ticks.iter().find(|(r, _)| *r == row) {
                Some((_, value)) => format!("{:>6} ", format_tick(*value)),
                None => " ".repeat(GUTTER),
            };
            let line: String = cells.iter().map(|c| self.paint(c)).collect();
            writeln!(self.out, "{}{}", gutter, line)?;
        }

        let mut tick_row = vec![' '; GUTTER + self.width + 4];
        for (col, value) in &self.x_ticks {
            for (i, ch) in format_tick(*value).chars().enumerate() {
                if let Some(slot) = tick_row.get_mut(GUTTER + col + i) {
                    *slot = ch;
                }
            }
        }
        writeln!(self.out, "{}", tick_row.into_iter().collect::<String>().trim_end())?;
        writeln!(self.out, "{:>width$}", self.x_label, width = GUTTER + self.width)?;

        self.out.flush()?;
        self.redraws += 1;
        Ok(())
    }

    fn pause(&self, duration: Duration) {
        let scaled = self.options.scaled(duration);
        if !scaled.is_zero() {
            std::thread::sleep(scaled);
        }
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

impl<W: Write> SceneRenderer for TerminalRenderer<W> {
    fn draw_axes(&mut self, axes: &Axes) -> Result<()> {
        self.width = axes.width();
        self.height = axes.height();
        self.x_label = axes.x_label().to_string();
        self.y_label = axes.y_label().to_string();
        self.background = vec![vec![Cell::BLANK; self.width]; self.height];

        let origin = axes.origin();
        let (origin_col, origin_row) = self
            .cell_of(origin)
            .ok_or_else(|| VizError::RenderError("axes origin off canvas".to_string()))?;

        for col in 0..self.width {
            self.set(col, origin_row, '─', Some(Color::Blue));
        }
        for row in 0..self.height {
            self.set(origin_col, row, '│', Some(Color::Blue));
        }

        let y = axes.y_range().min.max(0.0);
        self.x_ticks = Vec::new();
        for tick in axes.x_range().ticks() {
            if let Some((col, _)) = self.cell_of(axes.c2p(tick, y)) {
                self.set(col, origin_row, '┴', Some(Color::Blue));
                self.x_ticks.push((col, tick));
            }
        }

        let x = axes.x_range().min.max(0.0);
        self.y_ticks = Vec::new();
        for tick in axes.y_range().ticks() {
            if let Some((_, row)) = self.cell_of(axes.c2p(x, tick)) {
                self.set(origin_col, row, '┤', Some(Color::Blue));
                self.y_ticks.push((row, tick));
            }
        }
        self.set(origin_col, origin_row, '┼', Some(Color::Blue));

        if self.options.clear_screen {
            queue!(self.out, Hide)?;
        }
        self.redraw()
    }

    fn draw_curve(&mut self, curve: &PartialSumCurve) -> Result<()> {
        self.ensure_canvas()?;
        for point in curve.points() {
            if let Some((col, row)) = self.cell_of(*point) {
                self.set(col, row, CURVE, Some(Color::Yellow));
            }
        }
        self.redraw()
    }

    fn place_marker(&mut self, at: Point) -> Result<()> {
        self.ensure_canvas()?;
        self.marker = Some(at);
        self.redraw()
    }

    fn move_marker(&mut self, from: Point, to: Point, duration: Duration) -> Result<()> {
        self.ensure_canvas()?;
        let scaled = self.options.scaled(duration);
        let interval = self.options.frame_interval.as_millis().max(1);
        let steps = (scaled.as_millis() / interval).max(1) as u32;

        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.marker = Some(Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
            self.redraw()?;
            if !scaled.is_zero() {
                std::thread::sleep(scaled / steps);
            }
        }
        Ok(())
    }

    fn write_label(
        &mut self,
        text: &str,
        anchor: LabelAnchor,
        placement: LabelPlacement,
        duration: Duration,
    ) -> Result<LabelId> {
        self.ensure_canvas()?;
        let (row, center) = self.resolve(anchor, placement)?;

        let id = LabelId(self.next_label);
        self.next_label += 1;
        self.labels.push(PlacedLabel {
            id,
            row,
            center,
            text: text.to_string(),
        });

        self.redraw()?;
        self.pause(duration);
        Ok(id)
    }

    fn fade_out(&mut self, labels: &[LabelId], duration: Duration) -> Result<()> {
        self.pause(duration);
        self.labels.retain(|l| !labels.contains(&l.id));
        self.redraw()
    }

    fn wait(&mut self, duration: Duration) -> Result<()> {
        self.pause(duration);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.options.clear_screen {
            queue!(self.out, Show)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

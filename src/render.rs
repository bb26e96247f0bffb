//! Deterministic SVG renderer for the minesweeper board.
//!
//! Drawing goes through the [`Canvas`] trait so layout code does not care
//! how primitives are serialized. Weekdays run left to right, weeks top to
//! bottom with the oldest week first.

use crate::board::{Annotation, AnnotationRow, CellLabel, ClassifiedGrid};
use crate::calendar::DAYS_PER_WEEK;
use crate::config::RenderOptions;
use crate::util::{escape_xml, truncate_string};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt::Write as _;

pub const DEFAULT_STYLESHEET: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/styles.css"));

pub const MINE_GLYPH: &str = "💣";

const HEADER_HEIGHT: f64 = 40.0;
const TITLE_BASELINE: f64 = 20.0;
const LEGEND_GAP: f64 = 10.0;
const LEGEND_SWATCH: f64 = 15.0;
const LEGEND_SPACING: f64 = 150.0;
const CELL_GAP: f64 = 2.0;
const ERROR_WIDTH: f64 = 400.0;
const ERROR_HEIGHT: f64 = 50.0;
const ERROR_MAX_BYTES: usize = 160;

const LEGEND: [(CellLabel, &str); 3] = [
    (CellLabel::Safe, "Safe (has commits)"),
    (CellLabel::Mine, "Mine (no commits)"),
    (CellLabel::Empty, "Empty"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text<'a> {
    pub x: f64,
    pub y: f64,
    pub content: &'a str,
    pub class: &'a str,
    pub anchor: Anchor,
}

/// Drawing sink for board primitives.
pub trait Canvas {
    fn style(&mut self, css: &str);
    fn rect(&mut self, rect: Rect, class: &str);
    fn text(&mut self, text: &Text<'_>);
    /// Invisible clickable area covering the whole canvas.
    fn link_overlay(&mut self, href: &str);
}

/// Canvas that serializes primitives into an SVG document.
#[derive(Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Canvas for SvgCanvas {
    fn style(&mut self, css: &str) {
        let _ = writeln!(
            self.body,
            "<defs><style type=\"text/css\"><![CDATA[\n{}\n]]></style></defs>",
            css.trim().replace("]]>", "]]]]><![CDATA[>")
        );
    }

    fn rect(&mut self, rect: Rect, class: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" class="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            escape_xml(class)
        );
    }

    fn text(&mut self, text: &Text<'_>) {
        let anchor = match text.anchor {
            Anchor::Start => "",
            Anchor::Middle => r#" text-anchor="middle""#,
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}"{} class="{}">{}</text>"#,
            text.x,
            text.y,
            anchor,
            escape_xml(text.class),
            escape_xml(text.content)
        );
    }

    fn link_overlay(&mut self, href: &str) {
        let _ = writeln!(
            self.body,
            r#"<a href="{href}" target="_blank"><rect x="0" y="0" width="{}" height="{}" fill="transparent"/></a>"#,
            self.width,
            self.height,
            href = escape_xml(href)
        );
    }
}

/// Everything the renderer needs about one board.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub board: &'a ClassifiedGrid,
    pub annotations: &'a [AnnotationRow],
    pub updated: DateTime<Utc>,
}

/// Pixel geometry derived from the window size and cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub grid_x: f64,
    pub cell: f64,
    pub legend_y: f64,
    pub padding: f64,
}

impl Geometry {
    pub fn new(weeks: usize, cell_size: u32, padding: u32) -> Self {
        let cell = f64::from(cell_size);
        let padding = f64::from(padding);
        let grid_width = DAYS_PER_WEEK as f64 * cell;
        let legend_width = padding + LEGEND.len() as f64 * LEGEND_SPACING;
        let width = (grid_width + 2.0 * padding).max(legend_width);
        let legend_y = HEADER_HEIGHT + weeks as f64 * cell + LEGEND_GAP;
        Self {
            width,
            height: legend_y + LEGEND_SWATCH + padding,
            grid_x: (width - grid_width) / 2.0,
            cell,
            legend_y,
            padding,
        }
    }

    fn cell_origin(&self, week: usize, day: usize) -> (f64, f64) {
        (
            self.grid_x + day as f64 * self.cell,
            HEADER_HEIGHT + week as f64 * self.cell,
        )
    }
}

pub fn title_text(username: &str, updated: DateTime<Utc>) -> String {
    format!(
        "GitHub Minesweeper - {username} (Updated: {})",
        updated.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Draw the full board: title, cells, glyphs, legend, optional overlay.
pub fn draw_board<C: Canvas + ?Sized>(
    canvas: &mut C,
    view: &BoardView<'_>,
    options: &RenderOptions,
    stylesheet: &str,
) {
    let geometry = Geometry::new(view.board.weeks(), options.cell_size, options.padding);
    canvas.style(stylesheet);

    let title = title_text(&options.username, view.updated);
    canvas.text(&Text {
        x: geometry.width / 2.0,
        y: TITLE_BASELINE,
        content: &title,
        class: "title",
        anchor: Anchor::Middle,
    });

    let cell = geometry.cell;
    for (week, row) in view.board.rows().iter().enumerate() {
        for (day, label) in row.iter().enumerate() {
            let (x, y) = geometry.cell_origin(week, day);
            canvas.rect(
                Rect {
                    x,
                    y,
                    width: cell - CELL_GAP,
                    height: cell - CELL_GAP,
                },
                &format!("cell {label}"),
            );
            let center_x = x + cell / 2.0;
            let baseline = y + cell / 2.0 + 6.0;
            match view.annotations[week][day] {
                Annotation::Mine => canvas.text(&Text {
                    x: center_x,
                    y: baseline,
                    content: MINE_GLYPH,
                    class: "emoji",
                    anchor: Anchor::Middle,
                }),
                annotation => {
                    if let Some(count) = annotation.number() {
                        let digits = count.to_string();
                        canvas.text(&Text {
                            x: center_x,
                            y: baseline,
                            content: &digits,
                            class: &format!("number num-{}", count.min(8)),
                            anchor: Anchor::Middle,
                        });
                    }
                }
            }
        }
    }

    for (index, (label, caption)) in LEGEND.iter().enumerate() {
        let x = geometry.padding + index as f64 * LEGEND_SPACING;
        canvas.rect(
            Rect {
                x,
                y: geometry.legend_y,
                width: LEGEND_SWATCH,
                height: LEGEND_SWATCH,
            },
            &format!("cell {label}"),
        );
        canvas.text(&Text {
            x: x + LEGEND_SWATCH + 5.0,
            y: geometry.legend_y + 12.0,
            content: caption,
            class: "legend-text",
            anchor: Anchor::Start,
        });
    }

    if let Some(link) = options.link.as_deref() {
        canvas.link_overlay(link);
    }
}

/// Render the board to an SVG document.
pub fn render_board(view: &BoardView<'_>, options: &RenderOptions, stylesheet: &str) -> String {
    let geometry = Geometry::new(view.board.weeks(), options.cell_size, options.padding);
    let mut canvas = SvgCanvas::new(geometry.width, geometry.height);
    draw_board(&mut canvas, view, options, stylesheet);
    canvas.finish()
}

/// Small red-text SVG shown in place of the board when a run fails.
pub fn render_error(message: &str) -> String {
    let message = truncate_string(message.lines().next().unwrap_or_default(), ERROR_MAX_BYTES);
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">"#,
        w = ERROR_WIDTH,
        h = ERROR_HEIGHT
    );
    let _ = writeln!(
        out,
        r#"<text x="10" y="30" fill="red" font-family="sans-serif" font-size="14">Error: {}</text>"#,
        escape_xml(&message)
    );
    out.push_str("</svg>\n");
    out
}

/// Read the stylesheet override, falling back to the built-in sheet.
pub fn load_stylesheet(options: &RenderOptions) -> Cow<'static, str> {
    let Some(path) = options.style_path.as_deref() else {
        return Cow::Borrowed(DEFAULT_STYLESHEET);
    };
    match std::fs::read_to_string(path) {
        Ok(css) => Cow::Owned(css),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "stylesheet unreadable; using built-in styles");
            Cow::Borrowed(DEFAULT_STYLESHEET)
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

use super::*;
use crate::board::{annotate, CellLabel::*};
use chrono::TimeZone;

fn options(link: Option<&str>) -> RenderOptions {
    RenderOptions {
        username: "octocat".to_string(),
        cell_size: 25,
        padding: 10,
        style_path: None,
        link: link.map(str::to_string),
    }
}

fn updated() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 9, 8, 5, 0)
        .single()
        .expect("valid timestamp")
}

fn sample_board() -> ClassifiedGrid {
    ClassifiedGrid::from_rows(vec![
        [Mine, Safe, Empty, Safe, Safe, Empty, Empty],
        [Safe, Safe, Mine, Empty, Empty, Empty, Empty],
    ])
}

/// Records every primitive as a line of text.
#[derive(Default)]
struct Recorder {
    ops: Vec<String>,
}

impl Canvas for Recorder {
    fn style(&mut self, css: &str) {
        self.ops.push(format!("style {}", css.len()));
    }

    fn rect(&mut self, rect: Rect, class: &str) {
        self.ops.push(format!(
            "rect {} {} {} {} {class}",
            rect.x, rect.y, rect.width, rect.height
        ));
    }

    fn text(&mut self, text: &Text<'_>) {
        self.ops.push(format!(
            "text {} {} {:?} {} {}",
            text.x, text.y, text.anchor, text.class, text.content
        ));
    }

    fn link_overlay(&mut self, href: &str) {
        self.ops.push(format!("link {href}"));
    }
}

fn record(board: &ClassifiedGrid, link: Option<&str>) -> Vec<String> {
    let annotations = annotate(board);
    let view = BoardView {
        board,
        annotations: &annotations,
        updated: updated(),
    };
    let mut recorder = Recorder::default();
    draw_board(&mut recorder, &view, &options(link), DEFAULT_STYLESHEET);
    recorder.ops
}

#[test]
fn drawing_is_identical_across_runs() {
    let board = sample_board();
    assert_eq!(record(&board, Some("https://x")), record(&board, Some("https://x")));

    let annotations = annotate(&board);
    let view = BoardView {
        board: &board,
        annotations: &annotations,
        updated: updated(),
    };
    let first = render_board(&view, &options(None), DEFAULT_STYLESHEET);
    let second = render_board(&view, &options(None), DEFAULT_STYLESHEET);
    assert_eq!(first, second);
}

#[test]
fn draws_one_rect_per_cell_plus_legend() {
    let ops = record(&sample_board(), None);
    let cells = ops.iter().filter(|op| op.starts_with("rect ")).count();
    assert_eq!(cells, 2 * 7 + 3);
    assert!(!ops.iter().any(|op| op.starts_with("link ")));
}

#[test]
fn mines_get_glyphs_and_zero_counts_stay_blank() {
    let ops = record(&sample_board(), None);
    let glyphs = ops
        .iter()
        .filter(|op| op.ends_with(&format!("emoji {MINE_GLYPH}")))
        .count();
    assert_eq!(glyphs, 2);
    // (0,1) touches both mines; (0,4) touches none.
    assert!(ops.contains(&"text 180 58.5 Middle number num-2 2".to_string()));
    let numbers: Vec<_> = ops
        .iter()
        .filter(|op| op.contains(" number num-"))
        .collect();
    assert!(numbers.iter().all(|op| !op.ends_with(" 0")));
    assert!(!ops.iter().any(|op| op.starts_with("text 255 58.5 ")));
}

#[test]
fn title_carries_user_and_timestamp() {
    assert_eq!(
        title_text("octocat", updated()),
        "GitHub Minesweeper - octocat (Updated: 2024-06-09 08:05 UTC)"
    );
    let ops = record(&sample_board(), None);
    assert_eq!(
        ops[1],
        "text 230 20 Middle title GitHub Minesweeper - octocat (Updated: 2024-06-09 08:05 UTC)"
    );
}

#[test]
fn overlay_is_drawn_last_when_linked() {
    let ops = record(&sample_board(), Some("https://example.com/game"));
    assert_eq!(
        ops.last().map(String::as_str),
        Some("link https://example.com/game")
    );
}

#[test]
fn geometry_fits_legend_and_grid() {
    let preview = Geometry::new(7, 25, 10);
    assert_eq!(preview.width, 460.0);
    assert_eq!(preview.grid_x, 142.5);
    assert_eq!(preview.legend_y, 40.0 + 175.0 + 10.0);
    assert_eq!(preview.height, preview.legend_y + 15.0 + 10.0);

    let wide = Geometry::new(53, 80, 10);
    assert_eq!(wide.width, 580.0);
    assert_eq!(wide.grid_x, 10.0);
}

#[test]
fn svg_document_is_well_formed_and_escaped() {
    let board = sample_board();
    let annotations = annotate(&board);
    let view = BoardView {
        board: &board,
        annotations: &annotations,
        updated: updated(),
    };
    let mut opts = options(Some("https://example.com/?a=1&b=2"));
    opts.username = "<script>".to_string();
    let svg = render_board(&view, &opts, ".cell { fill: red; }");
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"460px\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("&lt;script&gt;"));
    assert!(!svg.contains("<script>"));
    assert!(svg.contains("href=\"https://example.com/?a=1&amp;b=2\""));
    assert!(svg.contains("class=\"cell mine\""));
    assert!(svg.contains("<![CDATA[\n.cell { fill: red; }\n]]>"));
}

#[test]
fn error_svg_shows_first_line_in_red() {
    let svg = render_error("API Error: 502\ncaused by: upstream <gateway>");
    assert!(svg.contains("fill=\"red\""));
    assert!(svg.contains(">Error: API Error: 502</text>"));
    assert!(!svg.contains("gateway"));
}

#[test]
fn missing_stylesheet_falls_back_to_builtin() {
    let mut opts = options(None);
    opts.style_path = Some(std::path::PathBuf::from("/nonexistent/styles.css"));
    assert_eq!(load_stylesheet(&opts), DEFAULT_STYLESHEET);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.css");
    std::fs::write(&path, ".title { fill: black; }").expect("write css");
    opts.style_path = Some(path);
    assert_eq!(load_stylesheet(&opts), ".title { fill: black; }");
}

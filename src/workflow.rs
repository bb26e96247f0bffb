//! Board generation workflow.
//!
//! One run is strictly sequential: fetch, normalize, classify, annotate,
//! persist, render. Fetch and render failures replace the board with an
//! error image; a failed layout write is logged and the run continues.
use crate::board::{annotate, classify, UnitSource};
use crate::calendar::normalize;
use crate::cli::{GenerateArgs, RenderArgs};
use crate::config::{Config, RenderOptions};
use crate::github::{ContributionSource, GraphqlSource};
use crate::layout::{read_layout, write_layout, LayoutRecord};
use crate::render::{load_stylesheet, render_board, render_error, BoardView};
use crate::staging::write_staged_text;
use crate::util::display_path;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

/// What a successful `generate` run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub weeks: usize,
    pub mines: usize,
    pub svg_path: PathBuf,
    pub layout: LayoutOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// The variant does not persist a layout.
    Skipped,
    Written(PathBuf),
    /// The write failed; the message is kept for reporting only.
    Failed(String),
}

pub fn run_generate_command(args: GenerateArgs) -> Result<()> {
    let config = match Config::from_generate_args(&args) {
        Ok(config) => config,
        Err(err) => {
            write_error_image(&args.out, &err);
            return Err(err);
        }
    };
    let source = GraphqlSource::new(config.api_url.clone());
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let summary = run_generate(&config, &source, &mut rng, Utc::now())?;
    match &summary.layout {
        LayoutOutcome::Skipped => {}
        LayoutOutcome::Written(path) => {
            tracing::debug!(path = %path.display(), "layout persisted");
        }
        LayoutOutcome::Failed(reason) => eprintln!("layout not saved: {reason}"),
    }
    tracing::info!(
        variant = ?config.variant,
        weeks = summary.weeks,
        mines = summary.mines,
        svg = %summary.svg_path.display(),
        "board generated"
    );
    Ok(())
}

/// Run the full pipeline against `source`.
///
/// On a fatal error the SVG path receives the error image and the error is
/// returned so the process exits non-zero.
pub fn run_generate<S: UnitSource + ?Sized>(
    config: &Config,
    source: &dyn ContributionSource,
    sampler: &mut S,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    match generate_board(config, source, sampler, now) {
        Ok(summary) => Ok(summary),
        Err(err) => {
            write_error_image(&config.svg_path, &err);
            Err(err)
        }
    }
}

fn generate_board<S: UnitSource + ?Sized>(
    config: &Config,
    source: &dyn ContributionSource,
    sampler: &mut S,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    config.validate()?;
    let username = config.render.username.as_str();
    eprintln!(
        "fetching contributions for {username} ({})",
        if config.token.is_some() {
            "authenticated"
        } else {
            "unauthenticated"
        }
    );
    let calendar = source
        .fetch(username, config.token.as_deref())
        .with_context(|| format!("fetch contributions for {username}"))?;
    tracing::debug!(
        weeks = calendar.weeks.len(),
        total = calendar.total_contributions,
        "calendar fetched"
    );

    let grid = normalize(&calendar, config.weeks);
    tracing::debug!(weeks = grid.weeks(), "grid normalized");
    let board = classify(&grid, config.odds, sampler);
    let annotations = annotate(&board);

    let layout = match config.layout_path.as_deref() {
        None => LayoutOutcome::Skipped,
        Some(path) => persist_layout(path, &LayoutRecord::new(&board, now)),
    };

    let stylesheet = load_stylesheet(&config.render);
    let view = BoardView {
        board: &board,
        annotations: &annotations,
        updated: now,
    };
    let svg = render_board(&view, &config.render, &stylesheet);
    write_staged_text(&config.svg_path, &svg).context("write board image")?;
    eprintln!("wrote {}", shown(&config.svg_path));

    Ok(RunSummary {
        weeks: board.weeks(),
        mines: board.mine_count(),
        svg_path: config.svg_path.clone(),
        layout,
    })
}

fn persist_layout(path: &Path, record: &LayoutRecord) -> LayoutOutcome {
    match write_layout(path, record) {
        Ok(()) => {
            eprintln!("wrote {}", shown(path));
            LayoutOutcome::Written(path.to_path_buf())
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "layout not saved; continuing");
            LayoutOutcome::Failed(format!("{err:#}"))
        }
    }
}

pub fn run_render_command(args: RenderArgs) -> Result<()> {
    let result = RenderOptions::from_render_args(&args)
        .and_then(|options| render_saved_layout(&args.layout, &args.out, &options));
    if let Err(err) = &result {
        write_error_image(&args.out, err);
    }
    result
}

/// Redraw a board from a saved layout record; no network access.
pub fn render_saved_layout(layout: &Path, out: &Path, options: &RenderOptions) -> Result<()> {
    let record = read_layout(layout)?;
    let board = record.board();
    let annotations = annotate(&board);
    let stylesheet = load_stylesheet(options);
    let view = BoardView {
        board: &board,
        annotations: &annotations,
        updated: record.last_updated,
    };
    write_staged_text(out, &render_board(&view, options, &stylesheet))
        .context("write board image")?;
    eprintln!("wrote {}", shown(out));
    Ok(())
}

fn write_error_image(path: &Path, err: &anyhow::Error) {
    tracing::error!(error = %format!("{err:#}"), "run failed; writing error image");
    match write_staged_text(path, &render_error(&format!("{err:#}"))) {
        Ok(()) => eprintln!("wrote error image {}", shown(path)),
        Err(write_err) => {
            tracing::error!(path = %path.display(), error = %format!("{write_err:#}"), "error image not written");
        }
    }
}

fn shown(path: &Path) -> String {
    let cwd = std::env::current_dir().ok();
    display_path(path, cwd.as_deref())
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

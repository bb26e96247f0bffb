//! CLI argument parsing for the board generator.
//!
//! The CLI stays thin: flags are collected here and resolved into a
//! [`crate::config::Config`] before any work starts.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default GraphQL endpoint for contribution data.
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "ghmines",
    version,
    about = "Minesweeper-styled SVG board from GitHub contribution activity",
    after_help = "Commands:\n  generate [--variant full|preview]  Fetch contributions and write the board\n  render --layout <file>             Re-render a board from a saved layout\n\nEnvironment:\n  GITHUB_USER  login used when --user is omitted\n  GH_TOKEN     access token (optional, unauthenticated requests are rate limited)\n\nExamples:\n  ghmines generate --variant preview --out preview.svg\n  ghmines generate --seed 7 --layout-out data/layout.json\n  ghmines render --layout data/layout.json --out board.svg",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug-level logs (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Render(RenderArgs),
}

/// Board size presets.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantArg {
    /// Seven most recent weeks, no overlay, no layout record
    Preview,
    /// Full year (53 weeks) with clickable overlay and layout record
    Full,
}

/// Generate command inputs: fetch, classify, persist, render.
#[derive(Parser, Debug)]
#[command(about = "Fetch contributions and write the minesweeper board")]
pub struct GenerateArgs {
    /// GitHub login (falls back to GITHUB_USER)
    #[arg(long, value_name = "LOGIN")]
    pub user: Option<String>,

    /// Board preset
    #[arg(long, value_enum, default_value = "full")]
    pub variant: VariantArg,

    /// Number of most recent weeks to draw, 1 to 520 (overrides the preset)
    #[arg(long, value_name = "N")]
    pub weeks: Option<usize>,

    /// Cell edge length in pixels
    #[arg(long, value_name = "PX")]
    pub cell_size: Option<u32>,

    /// Output path for the SVG board
    #[arg(long, value_name = "PATH", default_value = "minesweeper.svg")]
    pub out: PathBuf,

    /// Output path for the layout record (full variant only)
    #[arg(long, value_name = "PATH")]
    pub layout_out: Option<PathBuf>,

    /// CSS stylesheet to embed instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub style: Option<PathBuf>,

    /// Overlay link target (full variant only)
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,

    /// Seed for the mine placement RNG
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// GraphQL endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Render command inputs: redraw a board from a saved layout record.
#[derive(Parser, Debug)]
#[command(about = "Re-render a board from a saved layout record")]
pub struct RenderArgs {
    /// Layout record written by `generate`
    #[arg(long, value_name = "PATH")]
    pub layout: PathBuf,

    /// Output path for the SVG board
    #[arg(long, value_name = "PATH", default_value = "minesweeper.svg")]
    pub out: PathBuf,

    /// GitHub login shown in the title (falls back to GITHUB_USER)
    #[arg(long, value_name = "LOGIN")]
    pub user: Option<String>,

    /// Cell edge length in pixels
    #[arg(long, value_name = "PX")]
    pub cell_size: Option<u32>,

    /// CSS stylesheet to embed instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub style: Option<PathBuf>,

    /// Overlay link target
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,
}

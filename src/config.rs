//! Run configuration.
//!
//! Everything the pipeline needs is resolved up front into [`Config`] so no
//! stage reads the environment on its own.
use crate::cli::{GenerateArgs, RenderArgs, VariantArg};
use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_USERNAME: &str = "jamespaulzhang";
pub const DEFAULT_CELL_SIZE: u32 = 25;
pub const DEFAULT_PADDING: u32 = 10;
pub const DEFAULT_LAYOUT_PATH: &str = "minesweeper_layout.json";
pub const DEFAULT_LINK: &str = "https://jamespaulzhang.github.io/minesweeper/";
pub const USER_ENV: &str = "GITHUB_USER";
pub const TOKEN_ENV: &str = "GH_TOKEN";

/// Ten years of weeks; the calendar API never returns more than one.
pub const MAX_WEEKS: usize = 520;

const MIN_CELL_SIZE: u32 = 4;

/// Mine probabilities conditioned on whether the day had contributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MineOdds {
    /// Probability that a zero-count day becomes a mine.
    pub no_commit: f64,
    /// Probability that a day with contributions becomes a mine.
    pub commit: f64,
}

impl Default for MineOdds {
    fn default() -> Self {
        Self {
            no_commit: 0.7,
            commit: 0.1,
        }
    }
}

/// Board presets matching the two published images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Preview,
    Full,
}

impl Variant {
    pub fn weeks(self) -> usize {
        match self {
            Variant::Preview => 7,
            Variant::Full => 53,
        }
    }

    /// Only the full board feeds the companion page.
    pub fn links_companion(self) -> bool {
        matches!(self, Variant::Full)
    }
}

impl From<VariantArg> for Variant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Preview => Variant::Preview,
            VariantArg::Full => Variant::Full,
        }
    }
}

/// Drawing options shared by `generate` and `render`.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub username: String,
    pub cell_size: u32,
    pub padding: u32,
    pub style_path: Option<PathBuf>,
    pub link: Option<String>,
}

/// Fully resolved inputs for one `generate` run.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    pub api_url: String,
    pub variant: Variant,
    pub weeks: usize,
    pub odds: MineOdds,
    pub svg_path: PathBuf,
    pub layout_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub render: RenderOptions,
}

impl Config {
    /// Resolve CLI flags against the environment: flag > env > default.
    pub fn from_generate_args(args: &GenerateArgs) -> Result<Self> {
        let variant = Variant::from(args.variant);
        let full = variant.links_companion();
        let config = Config {
            token: resolve_token(),
            api_url: args.api_url.clone(),
            variant,
            weeks: args.weeks.unwrap_or_else(|| variant.weeks()),
            odds: MineOdds::default(),
            svg_path: args.out.clone(),
            layout_path: full.then(|| {
                args.layout_out
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LAYOUT_PATH))
            }),
            seed: args.seed,
            render: RenderOptions {
                username: resolve_username(args.user.as_deref()),
                cell_size: args.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
                padding: DEFAULT_PADDING,
                style_path: args.style.clone(),
                link: full.then(|| {
                    args.link
                        .clone()
                        .unwrap_or_else(|| DEFAULT_LINK.to_string())
                }),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weeks == 0 {
            return Err(anyhow!("weeks must be at least 1"));
        }
        if self.weeks > MAX_WEEKS {
            return Err(anyhow!(
                "weeks must be at most {MAX_WEEKS} (got {})",
                self.weeks
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(anyhow!("api url must be non-empty"));
        }
        validate_odds(&self.odds)?;
        self.render.validate()
    }
}

impl RenderOptions {
    pub fn from_render_args(args: &RenderArgs) -> Result<Self> {
        let options = RenderOptions {
            username: resolve_username(args.user.as_deref()),
            cell_size: args.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
            padding: DEFAULT_PADDING,
            style_path: args.style.clone(),
            link: args.link.clone(),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(anyhow!("username must be non-empty"));
        }
        if self.cell_size < MIN_CELL_SIZE {
            return Err(anyhow!(
                "cell size must be at least {MIN_CELL_SIZE}px (got {})",
                self.cell_size
            ));
        }
        if let Some(link) = self.link.as_deref() {
            if link.trim().is_empty() {
                return Err(anyhow!("overlay link must be non-empty"));
            }
        }
        Ok(())
    }
}

fn validate_odds(odds: &MineOdds) -> Result<()> {
    for (name, value) in [("no_commit", odds.no_commit), ("commit", odds.commit)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(anyhow!(
                "mine probability {name} must be within [0, 1] (got {value})"
            ));
        }
    }
    Ok(())
}

/// Resolve the login with fallback: explicit arg > env var > default.
fn resolve_username(explicit: Option<&str>) -> String {
    resolve_username_with(explicit, |key| env::var(key).ok())
}

fn resolve_username_with(
    explicit: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    let non_blank = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };
    explicit
        .and_then(non_blank)
        .or_else(|| lookup(USER_ENV).as_deref().and_then(non_blank))
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
}

fn resolve_token() -> Option<String> {
    env::var(TOKEN_ENV)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

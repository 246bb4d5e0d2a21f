// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// The CLI exposes exactly the mirror's construction parameters:
//   site-mirror <SEED_URL> <FOLDER> [--max-level N] [--filter EXTS] [--mode MODE]
//
// Logging verbosity is not a flag: set RUST_LOG (e.g. RUST_LOG=debug).
// =============================================================================

use clap::{Parser, ValueEnum};
use site_mirror::mirror::{MirrorOptions, ScopeMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version,
    about = "Mirror a website into a local folder for offline browsing",
    long_about = "site-mirror downloads a page, follows its links breadth-first up to a \
                  maximum level, saves every page as a numbered HTML file, downloads \
                  embedded images/scripts/stylesheets, and rewrites links between saved \
                  pages to point at the local copies."
)]
pub struct Cli {
    /// Page to start from (e.g., https://example.com/)
    pub seed_url: String,

    /// Existing, writable folder to save pages and resources into
    pub folder: PathBuf,

    /// How many link hops to follow from the seed
    ///
    /// 0 = just the seed page, 1 = the seed and the pages it links to, etc.
    #[arg(short = 'l', long, default_value_t = 1)]
    pub max_level: usize,

    /// Resource extensions to skip, dot-prefixed and concatenated
    ///
    /// Example: --filter .css.map skips .css and .map files
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Which fetched pages are saved
    #[arg(short, long, value_enum, default_value_t = ModeArg::WholeWeb)]
    pub mode: ModeArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Save every page reached within the level limit
    WholeWeb,
    /// Save only pages on the seed's host
    CurrentDomain,
}

impl From<ModeArg> for ScopeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WholeWeb => ScopeMode::WholeWeb,
            ModeArg::CurrentDomain => ScopeMode::CurrentDomainOnly,
        }
    }
}

impl Cli {
    pub fn to_options(&self) -> MirrorOptions {
        let options = MirrorOptions::new(&self.seed_url, &self.folder, self.max_level)
            .with_scope(self.mode.into());

        match &self.filter {
            Some(filter) => options.with_filter(filter.clone()),
            None => options,
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Names the tool itself may be installed under inside the posts directory
pub const SELF_NAMES: &[&str] = &["slugger", "slugger.exe", "slugger.go"];

/// How the slug line is written into the metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Set the slug field exactly once, replacing any existing value
    Upsert,
    /// Fixed-width name slicing and unconditional insertion, byte-compatible
    /// with files produced by earlier runs
    Legacy,
}

#[derive(Parser, Debug)]
#[command(name = "slugger")]
#[command(about = "Add a slug derived from each post's file name to its front matter", long_about = None)]
pub struct Cli {
    /// Directory holding the post files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Mode::Upsert)]
    pub mode: Mode,

    /// Post file extension, without the dot (repeatable)
    #[arg(long = "extension", value_name = "EXT", default_value = "md")]
    pub extensions: Vec<String>,

    /// File name to leave alone (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub excludes: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Settings for a single run over a directory
#[derive(Debug, Clone)]
pub struct Options {
    pub dir: PathBuf,
    pub mode: Mode,
    pub extensions: Vec<String>,
    pub excludes: Vec<String>,
    pub dry_run: bool,
}

impl Options {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: Mode::Upsert,
            extensions: vec!["md".to_string()],
            excludes: SELF_NAMES.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excludes.iter().any(|e| e == name)
    }
}

impl From<&Cli> for Options {
    fn from(cli: &Cli) -> Self {
        let mut options = Options::new(&cli.dir);
        options.mode = cli.mode;
        options.extensions = cli.extensions.clone();
        options.excludes.extend(cli.excludes.iter().cloned());
        options.dry_run = cli.dry_run;
        options
    }
}

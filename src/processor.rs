use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{Mode, Options};
use crate::error::{FileError, RunError, SkipReason, SlugError};
use crate::file_entry::FileEntry;
use crate::slug::{derive_slug, derive_slug_fixed};
use crate::splice::{splice, upsert_slug, Splice};
use crate::writer::write_atomic;

/// What happened to a single post file
#[derive(Debug)]
pub enum FileOutcome {
    Updated { slug: String },
    Skipped(SkipReason),
    Failed(FileError),
}

impl FileOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            FileOutcome::Updated { .. } => "updated",
            FileOutcome::Skipped(_) => "skipped",
            FileOutcome::Failed(_) => "failed",
        }
    }
}

/// Per-file outcomes of one run, in processing order
#[derive(Debug)]
pub struct RunReport {
    pub dir: PathBuf,
    pub dry_run: bool,
    pub outcomes: Vec<(String, FileOutcome)>,
    pub excluded: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for (_, outcome) in &self.outcomes {
            match outcome {
                FileOutcome::Updated { .. } => counts.updated += 1,
                FileOutcome::Skipped(_) => counts.skipped += 1,
                FileOutcome::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }

    pub fn has_failures(&self) -> bool {
        self.counts().failed > 0
    }

    pub fn outcome(&self, name: &str) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, o)| o)
    }
}

/// Process every regular file directly inside `options.dir`, one at a time
pub fn process_dir(options: &Options) -> Result<RunReport, RunError> {
    process_dir_with(options, &mut write_atomic)
}

/// Like [`process_dir`], persisting new content through `write`
pub fn process_dir_with<W>(options: &Options, write: &mut W) -> Result<RunReport, RunError>
where
    W: FnMut(&Path, &[u8]) -> io::Result<()>,
{
    let read_dir = fs::read_dir(&options.dir).map_err(|source| RunError::ReadDir {
        path: options.dir.clone(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => warn!("skipping unreadable entry in {}: {}", options.dir.display(), e),
        }
    }
    entries.sort_by_key(|e| e.file_name());

    info!(
        "processing {} entries in {}",
        entries.len(),
        options.dir.display()
    );

    let mut report = RunReport {
        dir: options.dir.clone(),
        dry_run: options.dry_run,
        outcomes: Vec::new(),
        excluded: Vec::new(),
    };

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        // follows symlinks so linked posts are treated like regular files
        let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            debug!("{}: not a regular file", name);
            continue;
        }

        if options.is_excluded(&name) {
            debug!("{}: excluded", name);
            report.excluded.push(name);
            continue;
        }

        let outcome = process_file_with(&path, options, write);
        if let FileOutcome::Failed(ref e) = outcome {
            warn!("{}: {}", name, e);
        }
        report.outcomes.push((name, outcome));
    }

    let counts = report.counts();
    info!(
        "done: {} updated, {} skipped, {} failed",
        counts.updated, counts.skipped, counts.failed
    );

    Ok(report)
}

/// Derive the slug for a single file and write it into its metadata block
pub fn process_file(path: &Path, options: &Options) -> FileOutcome {
    process_file_with(path, options, &mut write_atomic)
}

/// Like [`process_file`], persisting new content through `write`
pub fn process_file_with<W>(path: &Path, options: &Options, write: &mut W) -> FileOutcome
where
    W: FnMut(&Path, &[u8]) -> io::Result<()>,
{
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let slug = match options.mode {
        Mode::Upsert => derive_slug(&name, &options.extensions).map(|post| {
            debug!("{}: dated {}, extension .{}", name, post.date, post.extension);
            post.slug
        }),
        Mode::Legacy => derive_slug_fixed(&name).ok_or(SlugError::TooShort),
    };
    let slug = match slug {
        Ok(s) => s,
        Err(e) => return FileOutcome::Skipped(e.into()),
    };

    let entry = match FileEntry::read(path) {
        Ok(entry) => entry,
        Err(e) => return FileOutcome::Failed(FileError::Read(e)),
    };
    debug!("{}: read {} bytes", entry.name, entry.content.len());

    let content = match options.mode {
        Mode::Upsert => match upsert_slug(&entry.content, &slug) {
            Ok(Splice::Changed(content)) => content,
            Ok(Splice::Unchanged) => return FileOutcome::Skipped(SkipReason::SlugAlreadySet),
            Err(reason) => return FileOutcome::Skipped(reason),
        },
        Mode::Legacy => match splice(&entry.content, &slug) {
            Ok(content) => content,
            Err(reason) => return FileOutcome::Skipped(reason),
        },
    };

    if options.dry_run {
        debug!("{}: dry run, {} bytes not written", entry.name, content.len());
    } else if let Err(e) = write(&entry.path, &content) {
        return FileOutcome::Failed(FileError::Write(e));
    }

    FileOutcome::Updated { slug }
}

use std::path::PathBuf;

/// What happened to one uploaded file.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: Result<FileOutcome, String>,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileOutcome {
    pub rows: usize,
    pub source_columns: usize,
    pub mapped_columns: usize,
    pub output_columns: usize,
    pub status_values: usize,
    pub mapped_statuses: usize,
    pub warnings: usize,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub audit: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileReport::is_failure)
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|file| file.is_failure()).count()
    }
}

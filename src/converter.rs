// src/converter.rs
use crate::extractors::statement::{ExtractionReport, StatementExtraction, StatementLineExtractor};
use crate::statement::models::YearHint;
use crate::statement::source::PdfTextSource;
use crate::storage::StorageManager;
use crate::utils::error::{AppError, UnreadablePdfError};
use crate::utils::text_debug::annotate_lines;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input_folder: PathBuf,
    pub output_file: PathBuf,
    /// Year for month/day rows, overriding the statement period.
    pub year: Option<i32>,
    pub sort_by_date: bool,
    pub summary_file: Option<PathBuf>,
    /// Write annotated text dumps of every statement next to the output.
    pub debug: bool,
}

impl ConvertConfig {
    pub fn new(input_folder: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_file: output_file.into(),
            year: None,
            sort_by_date: false,
            summary_file: None,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: PathBuf,
    pub year_hint: YearHint,
    pub report: ExtractionReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadableFile {
    pub file: PathBuf,
    pub reason: String,
}

/// What a run did, file by file. Logged at the end and optionally saved as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub input_folder: PathBuf,
    pub output_file: PathBuf,
    pub files: Vec<FileSummary>,
    pub unreadable: Vec<UnreadableFile>,
    pub total_records: usize,
    pub total_skipped: usize,
    pub total_warnings: usize,
}

impl RunSummary {
    fn new(config: &ConvertConfig) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            input_folder: config.input_folder.clone(),
            output_file: config.output_file.clone(),
            files: Vec::new(),
            unreadable: Vec::new(),
            total_records: 0,
            total_skipped: 0,
            total_warnings: 0,
        }
    }

    fn add_file(&mut self, file: PathBuf, extraction: &StatementExtraction) {
        let mut report = extraction.report.clone();
        report.trace.clear();
        self.total_records += extraction.records.len();
        self.total_skipped += report.skip_count();
        self.total_warnings += report.warnings.len();
        self.files.push(FileSummary { file, year_hint: extraction.year_hint, report });
    }

    fn log(&self) {
        for file in &self.files {
            for warning in &file.report.warnings {
                tracing::warn!("{}: {}", file.file.display(), warning);
            }
            if file.report.invalid_count() > 0 {
                tracing::warn!(
                    "{}: {} transaction-like lines had unparseable dates or amounts",
                    file.file.display(),
                    file.report.invalid_count()
                );
            }
        }
        for file in &self.unreadable {
            tracing::warn!("Skipped unreadable file {}: {}", file.file.display(), file.reason);
        }
        tracing::info!(
            "Processing finished. Files: {}, Unreadable: {}, Transactions: {}, Skipped lines: {}, Warnings: {}",
            self.files.len(),
            self.unreadable.len(),
            self.total_records,
            self.total_skipped,
            self.total_warnings
        );
    }
}

/// Reads and scans one statement. Runs on a blocking worker.
pub fn extract_file<S: PdfTextSource + ?Sized>(
    source: &S,
    extractor: &StatementLineExtractor,
    path: &Path,
    year_override: Option<i32>,
    trace: bool,
) -> Result<StatementExtraction, UnreadablePdfError> {
    let text = source.read(path)?;
    let year = extractor.year_hint(&text, year_override);
    tracing::debug!("Using year hint {:?} for {}", year, path.display());

    Ok(if trace {
        extractor.extract_traced(&text, year)
    } else {
        extractor.extract(&text, year)
    })
}

/// Folder-to-CSV pipeline.
pub struct Converter<S> {
    source: Arc<S>,
    extractor: Arc<StatementLineExtractor>,
    config: ConvertConfig,
}

impl<S: PdfTextSource + 'static> Converter<S> {
    pub fn new(source: S, extractor: StatementLineExtractor, config: ConvertConfig) -> Self {
        Self {
            source: Arc::new(source),
            extractor: Arc::new(extractor),
            config,
        }
    }

    /// Extracts every statement of the input folder on blocking workers, then writes all
    /// records in file order through a single writer.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let folder = &self.config.input_folder;
        let files = self.source.discover(folder)?;
        tracing::info!("Found {} PDF statements in {}", files.len(), folder.display());
        if files.is_empty() {
            return Err(AppError::NoReadablePdfs(folder.clone()));
        }

        let storage = StorageManager::new(&self.config.output_file)?;

        let mut jobs = Vec::with_capacity(files.len());
        for path in files {
            let source = Arc::clone(&self.source);
            let extractor = Arc::clone(&self.extractor);
            let year = self.config.year;
            let trace = self.config.debug;
            let job_path = path.clone();
            let job = tokio::task::spawn_blocking(move || {
                extract_file(source.as_ref(), &extractor, &job_path, year, trace)
            });
            jobs.push((path, job));
        }

        let mut summary = RunSummary::new(&self.config);
        let mut records = Vec::new();

        for (path, job) in jobs {
            let outcome = match job.await {
                Ok(outcome) => outcome,
                Err(e) => Err(UnreadablePdfError {
                    path: path.clone(),
                    reason: format!("extraction worker failed: {}", e),
                }),
            };

            match outcome {
                Ok(extraction) => {
                    tracing::info!(
                        "Successfully processed {} ({} transactions, {} skipped lines)",
                        path.display(),
                        extraction.records.len(),
                        extraction.report.skip_count()
                    );
                    if self.config.debug {
                        let dump = annotate_lines(&extraction.report.trace);
                        if let Err(e) = storage.save_debug_text(&path, &dump) {
                            tracing::warn!("Failed to save annotated text for {}: {}", path.display(), e);
                        }
                    }
                    summary.add_file(path, &extraction);
                    records.extend(extraction.records);
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    summary.unreadable.push(UnreadableFile { file: path, reason: e.reason });
                }
            }
        }

        summary.log();

        if summary.files.is_empty() {
            return Err(AppError::NoReadablePdfs(folder.clone()));
        }
        if records.is_empty() {
            return Err(AppError::NoTransactionsFound { files: summary.files.len() });
        }

        if self.config.sort_by_date {
            records.sort_by_key(|r| r.date);
        }
        storage.write_records(&records)?;

        if let Some(summary_file) = &self.config.summary_file {
            storage.save_json(summary_file, &summary)?;
        }

        Ok(summary)
    }
}

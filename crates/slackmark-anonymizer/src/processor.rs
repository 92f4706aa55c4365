//! Drives the redactor over files on disk

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::{AnonymizeError, Mapper, Redactor, Result};

/// Generated files picked up in directory mode
pub const BATCH_PATTERNS: [&str; 2] = ["slack_*.html", "*_guide.html"];

pub struct FileProcessor {
    mapper: Mapper,
    redactor: Redactor,
    mapping_path: PathBuf,
}

impl FileProcessor {
    pub fn new(mapper: Mapper, mapping_path: impl Into<PathBuf>) -> Self {
        Self {
            mapper,
            redactor: Redactor::new(),
            mapping_path: mapping_path.into(),
        }
    }

    /// Load the sidecar at `mapping_path` (or start empty) and use it
    pub fn open(mapping_path: impl Into<PathBuf>) -> Self {
        let mapping_path = mapping_path.into();
        let mapper = Mapper::load(&mapping_path);
        Self::new(mapper, mapping_path)
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mapping_path(&self) -> &Path {
        &self.mapping_path
    }

    /// One file (`file` given) or every generated file under `directory`.
    /// Mappings are saved once when the run succeeds.
    pub fn process(
        &mut self,
        file: Option<&Path>,
        output: Option<&Path>,
        directory: &Path,
    ) -> Result<Vec<PathBuf>> {
        let processed = match file {
            Some(file) => vec![self.anonymize_file(file, output)?],
            None => self.anonymize_directory(directory)?,
        };
        self.save()?;
        Ok(processed)
    }

    /// Anonymize the given files in place, skipping failures. Mappings are
    /// saved once at the end.
    pub fn process_files(&mut self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut processed = Vec::new();
        for file in files {
            match self.anonymize_file(file, None) {
                Ok(path) => processed.push(path),
                Err(e) => error!("Skipping {}: {}", file.display(), e),
            }
        }
        self.save()?;
        Ok(processed)
    }

    /// Rewrite `input` into `output` (default: `input` itself)
    pub fn anonymize_file(&mut self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        if !input.exists() {
            return Err(AnonymizeError::NotFound(input.to_path_buf()));
        }
        let output = output.unwrap_or(input);

        let content = std::fs::read_to_string(input).map_err(|source| AnonymizeError::Processing {
            path: input.to_path_buf(),
            source,
        })?;

        let (redacted, redactions) = self.redactor.redact(&content, &mut self.mapper);

        std::fs::write(output, redacted).map_err(|source| AnonymizeError::Processing {
            path: output.to_path_buf(),
            source,
        })?;

        let total: usize = redactions.iter().map(|r| r.count).sum();
        info!(
            "Anonymized {} -> {} ({} replacements)",
            input.display(),
            output.display(),
            total
        );
        Ok(output.to_path_buf())
    }

    /// Anonymize every file matching [`BATCH_PATTERNS`] in `directory`, in
    /// place. A failing file is logged and skipped.
    pub fn anonymize_directory(&mut self, directory: &Path) -> Result<Vec<PathBuf>> {
        let base = glob::Pattern::escape(&directory.display().to_string());
        let mut seen = HashSet::new();
        let mut processed = Vec::new();

        for pattern in BATCH_PATTERNS {
            let full = format!("{}/{}", base, pattern);
            let mut matches = Vec::new();
            for entry in glob::glob(&full)? {
                match entry {
                    Ok(path) if path.is_file() => matches.push(path),
                    Ok(_) => {}
                    Err(e) => warn!("Cannot read {}: {}", e.path().display(), e.error()),
                }
            }
            matches.sort();

            for path in matches {
                // `slack_x_guide.html` matches both patterns
                if !seen.insert(path.clone()) {
                    continue;
                }
                match self.anonymize_file(&path, None) {
                    Ok(path) => processed.push(path),
                    Err(e) => error!("Skipping {}: {}", path.display(), e),
                }
            }
        }

        if processed.is_empty() {
            info!("No files to anonymize in {}", directory.display());
        }
        Ok(processed)
    }

    pub fn save(&self) -> Result<()> {
        self.mapper.save(&self.mapping_path)
    }
}

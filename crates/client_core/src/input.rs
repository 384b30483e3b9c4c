//! Input collection: the gene picker value and the single candidate sequence file.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use shared::{
    domain::{has_accepted_extension, Gene, MAX_UPLOAD_BYTES},
    error::ValidationError,
};
use tracing::debug;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Where the bytes of a candidate file live. Never read until submission.
#[derive(Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileSource::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

/// A file the user offered for upload, described by name and size only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    size_bytes: u64,
    source: FileSource,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, source: FileSource) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            source,
        }
    }

    /// Describes a file on disk from its metadata.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(
            name,
            metadata.len(),
            FileSource::Path(path.to_path_buf()),
        ))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let size_bytes = bytes.len() as u64;
        Self::new(name, size_bytes, FileSource::Memory(bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Size in MiB with two decimals, e.g. `12.50MB`.
    pub fn size_label(&self) -> String {
        format!("{:.2}MB", self.size_bytes as f64 / BYTES_PER_MIB)
    }
}

/// Acceptance rules for a candidate file, checked in order: extension, then size.
pub fn check_acceptance(name: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !has_accepted_extension(name) {
        return Err(ValidationError::UnsupportedFileType);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct InputCollector {
    gene: Option<Gene>,
    file: Option<CandidateFile>,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(Some(Gene::default()))
    }
}

impl InputCollector {
    pub fn new(gene: Option<Gene>) -> Self {
        Self { gene, file: None }
    }

    pub fn gene(&self) -> Option<Gene> {
        self.gene
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn select_gene(&mut self, gene: Gene) {
        self.gene = Some(gene);
    }

    /// Replaces the candidate file when it passes [`check_acceptance`]; a rejected
    /// file leaves the current selection in place.
    pub fn select_file(&mut self, file: CandidateFile) -> Result<(), ValidationError> {
        if let Err(err) = check_acceptance(file.name(), file.size_bytes()) {
            debug!(file = file.name(), size_bytes = file.size_bytes(), %err, "rejected candidate file");
            return Err(err);
        }
        self.file = Some(file);
        Ok(())
    }

    pub fn remove_file(&mut self) -> Option<CandidateFile> {
        self.file.take()
    }

    /// Name and size label of the selected file, for display.
    pub fn describe_file(&self) -> Option<(&str, String)> {
        self.file
            .as_ref()
            .map(|file| (file.name(), file.size_label()))
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;

//! Document discovery and text loading.
//!
//! Only text files are read. PDF and Word documents must be converted to
//! text before they can be indexed.

use lexibot_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Document format classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    PlainText,
    Markdown,
    /// Formats that need an extractor (PDF, Word)
    Unsupported,
    Unknown,
}

impl ContentType {
    /// Detect content type from file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("txt") | Some("text") => Self::PlainText,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("pdf") | Some("docx") | Some("doc") => Self::Unsupported,
            _ => Self::Unknown,
        }
    }

    /// Whether directory walks should pick this file up.
    pub fn is_indexable(&self) -> bool {
        matches!(self, Self::PlainText | Self::Markdown)
    }
}

/// Read a document as UTF-8 text, replacing invalid sequences.
pub fn read_document(path: &Path) -> AppResult<String> {
    let content_type = ContentType::from_path(path);
    if content_type == ContentType::Unsupported {
        return Err(AppError::Knowledge(format!(
            "Unsupported file type {:?}: convert the document to .txt first",
            path
        )));
    }

    let bytes = fs::read(path)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {:?}: {}", path, e)))?;

    if content_type == ContentType::Unknown && bytes.contains(&0) {
        tracing::warn!("Skipping likely binary file: {:?}", path);
        return Err(AppError::Knowledge(format!(
            "Binary file not supported: {:?}",
            path
        )));
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Expand files and directories into the list of documents to index.
///
/// Files named explicitly are always kept. Directories are walked
/// recursively for `.txt` and `.md` files, skipping hidden entries.
/// The result is sorted so indexing order is stable.
pub fn collect_documents(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_file() {
            documents.push(path.clone());
        } else if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| ContentType::from_path(p).is_indexable())
                .collect();
            found.sort();
            documents.extend(found);
        } else {
            return Err(AppError::Knowledge(format!("Path not found: {:?}", path)));
        }
    }

    tracing::debug!("Collected {} documents", documents.len());
    Ok(documents)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(
            ContentType::from_path(Path::new("lease.TXT")),
            ContentType::PlainText
        );
        assert_eq!(
            ContentType::from_path(Path::new("notes.md")),
            ContentType::Markdown
        );
        assert_eq!(
            ContentType::from_path(Path::new("judgment.pdf")),
            ContentType::Unsupported
        );
        assert_eq!(
            ContentType::from_path(Path::new("README")),
            ContentType::Unknown
        );
    }

    #[test]
    fn test_read_lossy_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notice.txt");
        fs::write(&path, b"Notice \xff served").unwrap();

        let text = read_document(&path).unwrap();
        assert_eq!(text, "Notice \u{FFFD} served");
    }

    #[test]
    fn test_read_rejects_pdf() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("order.pdf");
        fs::write(&path, b"%PDF-1.7").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_read_rejects_binary_unknown() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        assert!(read_document(&path).is_err());
    }

    #[test]
    fn test_collect_documents_walks_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("contracts/2024")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("contracts/lease.txt"), "lease").unwrap();
        fs::write(root.join("contracts/2024/nda.md"), "nda").unwrap();
        fs::write(root.join("contracts/scan.pdf"), "pdf").unwrap();
        fs::write(root.join(".cache/old.txt"), "old").unwrap();

        let documents = collect_documents(&[root.to_path_buf()]).unwrap();
        assert_eq!(
            documents,
            vec![
                root.join("contracts/2024/nda.md"),
                root.join("contracts/lease.txt"),
            ]
        );
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("petition");
        fs::write(&path, "text").unwrap();

        assert_eq!(collect_documents(&[path.clone()]).unwrap(), vec![path]);
    }

    #[test]
    fn test_collect_missing_path() {
        let temp = TempDir::new().unwrap();
        assert!(collect_documents(&[temp.path().join("missing")]).is_err());
    }
}

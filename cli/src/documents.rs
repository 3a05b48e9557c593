//! Loading a document directory into the in-memory index.

use anyhow::{Context, Result};
use proposal_application::LlmClient;
use proposal_domain::{ModelSelector, ProblemId};
use proposal_infrastructure::InMemoryDocumentIndex;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DOCUMENT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// `.txt` and `.md` files directly inside `dir`, sorted by path.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read documents directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_document = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if is_document {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Embeds every document of `dir` into `index` under `problem_id`.
/// Returns the number of chunks indexed.
pub async fn index_directory<L: LlmClient + ?Sized>(
    index: &InMemoryDocumentIndex,
    embedder: &L,
    model: &ModelSelector,
    problem_id: &ProblemId,
    dir: &Path,
) -> Result<usize> {
    let mut total = 0;
    for path in collect_documents(dir)? {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read document {}", path.display()))?;
        if text.trim().is_empty() {
            warn!("Skipping empty document {}", path.display());
            continue;
        }
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = format!("file://{}", path.display());
        total += index
            .add_document(embedder, model, problem_id, &title, &source, &text)
            .await
            .with_context(|| format!("failed to embed document {}", path.display()))?;
    }
    info!("Indexed {} chunks from {}", total, dir.display());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a.txt", "c.pdf", "notes.MD"] {
            std::fs::write(dir.path().join(name), "text").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let names: Vec<_> = collect_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.txt", "b.md", "notes.MD"]);
    }

    #[test]
    fn test_collect_documents_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_documents(&dir.path().join("absent")).is_err());
    }
}

// src/mirror/rewrite.rs
// =============================================================================
// Patches a saved parent page so links to a newly saved child point at the
// child's local file.
//
// The whole file is read, every literal occurrence of the link text is
// replaced, and the file is written back. Plain substring replacement, no
// regex and no HTML awareness: "/about" also matches inside "/about-us".
//
// Only the crawl loop calls this, one page at a time, so two rewrites of
// the same file never overlap.
// =============================================================================

use crate::error::{MirrorError, Result};
use std::path::Path;

// Returns true when the parent file was rewritten
//
// A missing parent (never saved) or an empty match text is a silent no-op.
pub async fn rewrite_links(
    parent_file: Option<&Path>,
    match_text: &str,
    replacement: &str,
) -> Result<bool> {
    let Some(parent_file) = parent_file else {
        return Ok(false);
    };
    if match_text.is_empty() {
        return Ok(false);
    }

    let content = tokio::fs::read_to_string(parent_file)
        .await
        .map_err(|e| MirrorError::write_failed(parent_file, e))?;

    let patched = content.replace(match_text, replacement);

    tokio::fs::write(parent_file, patched)
        .await
        .map_err(|e| MirrorError::write_failed(parent_file, e))?;

    ::log::debug!(
        "Rewrote '{}' -> '{}' in {}",
        match_text,
        replacement,
        parent_file.display()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_replaces_every_occurrence() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("0.html");
        std::fs::write(
            &parent,
            r#"<a href="/about">A</a><a href="/about">B</a><a href="/about-us">C</a>"#,
        )
        .unwrap();

        let rewritten = rewrite_links(Some(&parent), "/about", "1.html").await.unwrap();
        assert!(rewritten);

        let content = std::fs::read_to_string(&parent).unwrap();
        assert_eq!(
            content,
            r#"<a href="1.html">A</a><a href="1.html">B</a><a href="1.html-us">C</a>"#
        );
    }

    #[tokio::test]
    async fn test_missing_parent_is_noop() {
        assert!(!rewrite_links(None, "/about", "1.html").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_match_text_is_noop() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("0.html");
        std::fs::write(&parent, "<p>hi</p>").unwrap();

        assert!(!rewrite_links(Some(&parent), "", "1.html").await.unwrap());
        assert_eq!(std::fs::read_to_string(&parent).unwrap(), "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_unreadable_parent_is_fatal() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("gone.html");

        let err = rewrite_links(Some(&parent), "/about", "1.html")
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }
}

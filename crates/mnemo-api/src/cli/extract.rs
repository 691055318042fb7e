//! `mnemo extract`: run fact extraction once and print the result.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tokio::io::AsyncReadExt;

use mnemo_core::memory::extractor::{Extraction, FactExtractor};

use super::{parse_conversation, spinner};
use crate::state::AppState;

/// Extract facts from a conversation file (or stdin) and print them.
///
/// # Examples
///
/// ```bash
/// mnemo extract chat.json
/// echo "user: I just adopted a cat named Miso" | mnemo extract -
/// ```
pub async fn extract(state: &AppState, input: &str, json: bool, quiet: bool) -> Result<()> {
    let raw = read_input(input).await?;
    let conversation = parse_conversation(&raw);
    let extractor = state.extractor()?;

    let progress = spinner("extracting facts...", json || quiet);
    let extraction = extractor.extract(&conversation).await;
    progress.finish_and_clear();
    let extraction = extraction.context("fact extraction failed")?;

    println!("{}", render_extraction(&extraction, json)?);
    Ok(())
}

/// Read the conversation from a path, or from stdin when `input` is `-`.
pub async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read conversation from stdin")?;
        return Ok(buf);
    }

    let path = Path::new(input);
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Render an extraction as JSON or styled text.
pub fn render_extraction(extraction: &Extraction, json: bool) -> Result<String> {
    if json {
        let value = serde_json::json!({
            "facts": extraction.facts,
            "error": extraction.failure.as_ref().map(|e| e.to_string()),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    if let Some(failure) = &extraction.failure {
        out.push_str(&format!(
            "\n  {} Could not parse the model reply: {failure}\n",
            style("!").yellow().bold()
        ));
        return Ok(out);
    }

    if extraction.facts.is_empty() {
        out.push_str(&format!(
            "\n  {} No facts found in this conversation.\n",
            style("i").blue().bold()
        ));
        return Ok(out);
    }

    out.push('\n');
    for fact in &extraction.facts {
        out.push_str(&format!("  {} {fact}\n", style("*").cyan().bold()));
    }
    out.push_str(&format!(
        "\n  {} fact{}\n",
        style(extraction.facts.len()).bold(),
        if extraction.facts.len() == 1 { "" } else { "s" }
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo_types::error::ExtractionError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_input_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chat.txt");
        tokio::fs::write(&path, "user: I live in Lyon").await.unwrap();

        let raw = read_input(path.to_str().unwrap()).await.unwrap();
        assert_eq!(raw, "user: I live in Lyon");
    }

    #[tokio::test]
    async fn read_input_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.txt");
        let err = read_input(path.to_str().unwrap()).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn render_facts_as_json() {
        let extraction = Extraction::facts(vec!["Alice lives in Paris".to_string()]);
        let rendered = render_extraction(&extraction, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["facts"][0], "Alice lives in Paris");
        assert!(value["error"].is_null());
    }

    #[test]
    fn render_failure_as_json() {
        let extraction = Extraction::failed(ExtractionError::NoArray {
            raw: "sorry".to_string(),
        });
        let rendered = render_extraction(&extraction, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["facts"].as_array().unwrap().len(), 0);
        assert!(value["error"].is_string());
    }

    #[test]
    fn render_facts_as_text() {
        let extraction = Extraction::facts(vec![
            "Alice lives in Paris".to_string(),
            "Alice has a cat".to_string(),
        ]);
        let rendered = render_extraction(&extraction, false).unwrap();
        assert!(rendered.contains("Alice lives in Paris"));
        assert!(rendered.contains("Alice has a cat"));
        assert!(rendered.contains("facts"));
    }

    #[test]
    fn render_empty_as_text() {
        let rendered = render_extraction(&Extraction::default(), false).unwrap();
        assert!(rendered.contains("No facts found"));
    }
}

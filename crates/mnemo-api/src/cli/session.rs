//! `mnemo session`: interactive add/search/update/forget over one
//! in-process memory store.
//!
//! Memories are held in memory only and are lost when the session ends.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use mnemo_core::memory::embedder::Embedder;
use mnemo_core::memory::extractor::FactExtractor;
use mnemo_core::memory::store::MemoryStore;
use mnemo_core::service::memory::{MemoryService, UpdateOutcome};
use mnemo_types::config::EmbeddingBackend;
use mnemo_types::memory::{MemoryRecord, SearchHit};

use super::commands::{self, SessionCommand};
use super::input::{InputEvent, SessionInput};
use super::{parse_conversation, spinner};
use crate::state::AppState;

/// Run the session loop until `quit` or end of input.
pub async fn run(
    state: &AppState,
    embedder: Option<EmbeddingBackend>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let service = state.memory_service(embedder).await?;

    let prompt = format!("{} ", style("mnemo >").green().bold());
    let mut input = SessionInput::new(prompt).context("failed to initialize input")?;
    let interactive = input.is_interactive();

    if interactive && !json && !quiet {
        input.print(&format!(
            "\n  {} Memory session ({} embeddings). Type {} for commands.\n",
            style("*").cyan().bold(),
            style(service.embedder().model_name()).cyan(),
            style("help").cyan(),
        ));
    }

    loop {
        let line = match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                input.print(&format!(
                    "  {}",
                    style("Press Ctrl+D or type 'quit' to exit.").dim()
                ));
                continue;
            }
            InputEvent::Line(line) => line,
        };

        let Some(command) = commands::parse(&line) else {
            continue;
        };
        if command == SessionCommand::Quit {
            break;
        }

        let waits_on_model = matches!(command, SessionCommand::Add { .. });
        let progress = spinner("extracting facts...", !(interactive && waits_on_model) || json || quiet);
        let result = execute(&service, command, json).await;
        progress.finish_and_clear();

        match result {
            Ok(output) => {
                if !quiet || json {
                    input.print(&output);
                }
            }
            Err(e) => {
                tracing::debug!("Session command failed: {e:#}");
                input.print(&format!("  {} {e:#}", style("!").red().bold()));
            }
        }
    }

    let owners = service.store().owner_count();
    tracing::debug!(owners, "Session ended");
    if interactive && !json && !quiet {
        input.print(&format!(
            "\n  {}",
            style(format!("Session ended; discarded memories for {owners} owner(s).")).dim()
        ));
    }
    Ok(())
}

/// Execute one command against the service and render its result.
pub async fn execute<S, E, X>(
    service: &MemoryService<S, E, X>,
    command: SessionCommand,
    json: bool,
) -> Result<String>
where
    S: MemoryStore,
    E: Embedder,
    X: FactExtractor,
{
    match command {
        SessionCommand::Add { owner, input } => {
            let outcome = service.add(&parse_conversation(&input), &owner).await?;
            if json {
                return Ok(serde_json::to_string(&serde_json::json!({
                    "ids": outcome.ids,
                    "extraction_error": outcome.extraction_error.as_ref().map(|e| e.to_string()),
                }))?);
            }
            if let Some(error) = &outcome.extraction_error {
                return Ok(format!(
                    "  {} Could not parse the model reply: {error}",
                    style("!").yellow().bold()
                ));
            }
            if outcome.ids.is_empty() {
                return Ok(format!(
                    "  {} No facts found; nothing stored.",
                    style("i").blue().bold()
                ));
            }
            let records = service.list(&owner).await?;
            let added: Vec<MemoryRecord> = records
                .into_iter()
                .filter(|r| outcome.ids.contains(&r.id))
                .collect();
            Ok(format!(
                "  {} Stored {} for '{}'\n{}",
                style("+").green().bold(),
                pluralize(added.len()),
                style(&owner).cyan(),
                record_table(&added)
            ))
        }

        SessionCommand::Search {
            owner,
            query,
            limit,
        } => {
            let hits = match limit {
                Some(limit) => service.search_with_limit(&query, &owner, limit).await?,
                None => service.search(&query, &owner).await?,
            };
            if json {
                return Ok(serde_json::to_string(&hits)?);
            }
            if hits.is_empty() {
                return Ok(format!(
                    "  {} No related memories for '{}'.",
                    style("i").blue().bold(),
                    style(&owner).cyan()
                ));
            }
            Ok(hit_table(&hits).to_string())
        }

        SessionCommand::Update { id, text } => {
            let outcome = service.update(&id, &text).await?;
            if json {
                return Ok(serde_json::to_string(&serde_json::json!({
                    "id": id,
                    "updated": outcome == UpdateOutcome::Updated,
                }))?);
            }
            Ok(match outcome {
                UpdateOutcome::Updated => format!("  {} Updated {id}", style("~").green().bold()),
                UpdateOutcome::NotFound => {
                    format!("  {} Memory {id} not found", style("!").yellow().bold())
                }
            })
        }

        SessionCommand::List { owner } => {
            let records = service.list(&owner).await?;
            if json {
                return Ok(serde_json::to_string(&records)?);
            }
            if records.is_empty() {
                return Ok(format!(
                    "  {} No memories for '{}'.",
                    style("i").blue().bold(),
                    style(&owner).cyan()
                ));
            }
            Ok(format!(
                "{}\n  {}",
                record_table(&records),
                pluralize(records.len())
            ))
        }

        SessionCommand::Forget { owner } => {
            let removed = service.delete_all(&owner).await?;
            if json {
                return Ok(serde_json::to_string(&serde_json::json!({ "removed": removed }))?);
            }
            Ok(format!(
                "  {} Forgot {} for '{}'",
                style("-").red().bold(),
                pluralize(removed),
                style(&owner).cyan()
            ))
        }

        SessionCommand::Help => Ok(commands::help_text()),

        SessionCommand::Quit => Ok(String::new()),

        SessionCommand::Invalid(hint) => {
            if json {
                return Ok(serde_json::to_string(&serde_json::json!({ "error": hint }))?);
            }
            Ok(format!("  {} {hint}", style("?").yellow().bold()))
        }
    }
}

fn pluralize(n: usize) -> String {
    format!("{n} memor{}", if n == 1 { "y" } else { "ies" })
}

fn new_table(headers: [&str; 2]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.map(|h| Cell::new(h).fg(Color::White)));
    table
}

fn record_table(records: &[MemoryRecord]) -> Table {
    let mut table = new_table(["ID", "Memory"]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.id).fg(Color::DarkGrey),
            Cell::new(&record.text).fg(Color::White),
        ]);
    }
    table
}

fn hit_table(hits: &[SearchHit]) -> Table {
    let mut table = new_table(["ID", "Memory"]);
    for hit in hits {
        table.add_row(vec![
            Cell::new(hit.id).fg(Color::DarkGrey),
            Cell::new(&hit.memory).fg(Color::White),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo_core::memory::extractor::Extraction;
    use mnemo_core::memory::in_memory::InMemoryMemoryStore;
    use mnemo_infra::vector::hashing::HashEmbedder;
    use mnemo_types::config::MemoryConfig;
    use mnemo_types::llm::LlmError;
    use mnemo_types::memory::{Conversation, MemoryId};

    /// Treats every sentence of the transcript as a fact.
    struct SentenceExtractor;

    impl FactExtractor for SentenceExtractor {
        async fn extract(&self, conversation: &Conversation) -> Result<Extraction, LlmError> {
            Ok(Extraction::facts(
                conversation
                    .transcript()
                    .split('.')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ))
        }
    }

    type TestService = MemoryService<InMemoryMemoryStore, HashEmbedder, SentenceExtractor>;

    fn service() -> TestService {
        MemoryService::new(
            InMemoryMemoryStore::new(),
            HashEmbedder::new(256).unwrap(),
            SentenceExtractor,
            MemoryConfig::default(),
        )
    }

    async fn run_json(service: &TestService, line: &str) -> serde_json::Value {
        let command = commands::parse(line).unwrap();
        let output = execute(service, command, true).await.unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[tokio::test]
    async fn add_then_search_round_trip() {
        let service = service();
        let added = run_json(&service, "add u1 Alice lives in Paris. Bob likes jazz.").await;
        assert_eq!(added["ids"].as_array().unwrap().len(), 2);
        assert!(added["extraction_error"].is_null());

        let hits = run_json(&service, "search u1 where does Alice live in Paris").await;
        let hits = hits.as_array().unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0]["memory"], "Alice lives in Paris");
        assert_eq!(hits[0]["id"], added["ids"][0]);
    }

    #[tokio::test]
    async fn add_accepts_json_turns() {
        let service = service();
        let added = run_json(
            &service,
            r#"add u1 [{"role": "user", "content": "I adopted a cat named Miso"}]"#,
        )
        .await;
        assert_eq!(added["ids"].as_array().unwrap().len(), 1);

        let listed = run_json(&service, "list u1").await;
        assert_eq!(listed[0]["text"], "user: I adopted a cat named Miso");
        assert_eq!(listed[0]["owner_id"], "u1");
        assert!(listed[0].get("embedding").is_none());
    }

    #[tokio::test]
    async fn update_then_not_found() {
        let service = service();
        let added = run_json(&service, "add u1 Alice lives in Paris").await;
        let id = added["ids"][0].as_str().unwrap().to_string();

        let updated = run_json(&service, &format!("update {id} Alice lives in Rome")).await;
        assert_eq!(updated["updated"], true);
        let listed = run_json(&service, "list u1").await;
        assert_eq!(listed[0]["text"], "Alice lives in Rome");
        assert_eq!(listed[0]["id"], id.as_str());

        let missing = run_json(&service, &format!("update {} anything", MemoryId::new())).await;
        assert_eq!(missing["updated"], false);
    }

    #[tokio::test]
    async fn forget_clears_owner() {
        let service = service();
        run_json(&service, "add u1 Alice lives in Paris. Bob likes jazz.").await;
        run_json(&service, "add u2 Carol plays chess").await;

        let forgot = run_json(&service, "forget u1").await;
        assert_eq!(forgot["removed"], 2);
        assert_eq!(run_json(&service, "list u1").await, serde_json::json!([]));
        assert_eq!(run_json(&service, "search u1 Alice").await, serde_json::json!([]));
        assert_eq!(run_json(&service, "list u2").await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_limit_caps_results() {
        let service = service();
        run_json(
            &service,
            "add u1 Alice likes Paris. Alice visits Paris. Alice studies in Paris.",
        )
        .await;
        let hits = run_json(&service, "search u1 --limit 1 Alice Paris").await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn text_output_mentions_results() {
        let service = service();
        let command = commands::parse("add u1 Alice lives in Paris").unwrap();
        let output = execute(&service, command, false).await.unwrap();
        assert!(output.contains("Stored 1 memory"));
        assert!(output.contains("Alice lives in Paris"));

        let command = commands::parse("list nobody").unwrap();
        let output = execute(&service, command, false).await.unwrap();
        assert!(output.contains("No memories"));

        let command = commands::parse("frobnicate").unwrap();
        let output = execute(&service, command, false).await.unwrap();
        assert!(output.contains("unknown command 'frobnicate'"));
    }
}

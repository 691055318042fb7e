//! Fact extraction via LLM.
//!
//! [`LlmFactExtractor`] sends a conversation, wrapped in a fixed instruction
//! template, to an LLM and recovers a JSON array of short factual statements
//! from the reply.
//!
//! The reply is parsed by bracket scan: everything from the first `[` to the
//! last `]` is decoded as a JSON array of strings, which tolerates prose the
//! model wraps around the array. A reply that contains some other bracketed
//! text before or after the real array cannot be recovered this way.
//!
//! Parse failures are logged and yield an empty fact list (fail-open); LLM
//! transport failures are returned as errors.

use schemars::JsonSchema;

use mnemo_types::config::ExtractorConfig;
use mnemo_types::error::ExtractionError;
use mnemo_types::llm::{CompletionRequest, LlmError, Message, OutputConfig, StopReason};
use mnemo_types::memory::Conversation;

use crate::llm::box_provider::BoxLlmProvider;

/// Instruction template for the extraction call.
///
/// `{conversation}` is replaced with the flattened transcript.
const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract meaningful memories from the conversation below. A good memory:
1. States a specific fact about a person, place, thing, or relationship
2. Is worth recalling in a later conversation
3. Carries relevant context (time, place, circumstances) when it was given
4. Makes clear who or what it is about

Look for:
- Personal details (names, locations, jobs)
- Preferences and interests
- Important life events
- Relationships and connections
- Specific experiences or activities
- Future plans or intentions

Leave out:
- Generic small talk
- Passing moods or temporary states
- Common knowledge
- Anything not clearly attributed to someone

Conversation:
{conversation}

Write each memory as one complete, specific sentence. Return ONLY a JSON array of strings.

Examples of good memories:
[
    "Maria Lopez lives in the Mission District of San Francisco",
    "Maria has worked as a nurse at St. Luke's Hospital since June 2021",
    "Maria's dog Pepper is afraid of thunderstorms",
    "Maria met her partner Dev at a climbing gym in 2019",
    "Maria plans to hike the Camino de Santiago in September 2025",
    "Maria prefers phone calls over text messages for important news"
]

Examples of memories to avoid:
[
    "Maria is feeling tired today",  // temporary state
    "Maria likes music",  // too generic
    "It is raining outside",  // not a meaningful memory
    "Someone talked about a trip"  // no clear attribution
]

Return ONLY the JSON array of extracted memories, nothing else."#;

/// Build the full extraction prompt for a transcript.
pub fn build_prompt(transcript: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{conversation}", transcript)
}

/// Envelope requested when the provider supports schema-constrained output.
///
/// The bracket scan also accepts this shape, since `facts` is the only array.
#[allow(dead_code)]
#[derive(Debug, JsonSchema)]
#[schemars(deny_unknown_fields)]
struct StructuredFacts {
    facts: Vec<String>,
}

/// Recover a list of facts from a raw LLM reply.
///
/// Decodes the substring between the first `[` and the last `]` as a JSON
/// array of strings. Facts are trimmed and blank entries dropped.
pub fn parse_fact_array(raw: &str) -> Result<Vec<String>, ExtractionError> {
    let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) else {
        return Err(ExtractionError::NoArray {
            raw: raw.to_string(),
        });
    };

    if end < start {
        return Err(ExtractionError::Malformed {
            reason: "closing bracket precedes opening bracket".to_string(),
            raw: raw.to_string(),
        });
    }

    let values: Vec<serde_json::Value> =
        serde_json::from_str(&raw[start..=end]).map_err(|e| ExtractionError::Malformed {
            reason: e.to_string(),
            raw: raw.to_string(),
        })?;

    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match value {
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| Ok(trimmed.to_string()))
            }
            other => Some(Err(ExtractionError::Malformed {
                reason: format!("element {i} is not a string: {other}"),
                raw: raw.to_string(),
            })),
        })
        .collect()
}

/// Result of one extraction call.
///
/// `failure` is set when the reply could not be parsed; `facts` is then empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub facts: Vec<String>,
    pub failure: Option<ExtractionError>,
}

impl Extraction {
    pub fn facts(facts: Vec<String>) -> Self {
        Self {
            facts,
            failure: None,
        }
    }

    pub fn failed(error: ExtractionError) -> Self {
        Self {
            facts: Vec::new(),
            failure: Some(error),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Trait for turning a conversation into zero or more facts.
///
/// Implementations must not fail on unparseable model output; only an
/// unreachable backend is an error.
pub trait FactExtractor: Send + Sync {
    fn extract(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<Extraction, LlmError>> + Send;
}

/// Extracts facts with a single LLM completion per conversation.
pub struct LlmFactExtractor {
    provider: BoxLlmProvider,
    config: ExtractorConfig,
}

impl LlmFactExtractor {
    pub fn new(provider: BoxLlmProvider, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// Build the completion request for a transcript.
    ///
    /// `max_tokens` is capped at what the provider can produce.
    fn build_request(&self, transcript: &str) -> CompletionRequest {
        let capabilities = self.provider.capabilities();
        let output_config = if self.config.structured_output && capabilities.structured_output {
            structured_output_config()
        } else {
            None
        };

        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message::user(build_prompt(transcript))],
            max_tokens: self.config.max_tokens.min(capabilities.max_output_tokens),
            temperature: self.config.temperature,
            output_config,
        }
    }
}

fn structured_output_config() -> Option<OutputConfig> {
    match serde_json::to_value(schemars::schema_for!(StructuredFacts)) {
        Ok(schema) => Some(OutputConfig { schema }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize fact schema; using plain output");
            None
        }
    }
}

impl FactExtractor for LlmFactExtractor {
    #[tracing::instrument(
        name = "extract_facts",
        skip(self, conversation),
        fields(provider = %self.provider.name(), model = %self.config.model)
    )]
    async fn extract(&self, conversation: &Conversation) -> Result<Extraction, LlmError> {
        let request = self.build_request(&conversation.transcript());

        let response = self.provider.complete(&request).await?;
        if response.stop_reason == StopReason::MaxTokens {
            tracing::warn!(
                max_tokens = request.max_tokens,
                "LLM reply hit the token limit and may be truncated"
            );
        }

        match parse_fact_array(&response.content) {
            Ok(facts) => {
                tracing::debug!(
                    fact_count = facts.len(),
                    stop_reason = %response.stop_reason,
                    "Extracted facts"
                );
                Ok(Extraction::facts(facts))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %e.raw(),
                    "Could not parse facts from LLM response; returning no facts"
                );
                Ok(Extraction::failed(e))
            }
        }
    }
}

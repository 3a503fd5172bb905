use std::sync::Arc;

use kuching::application::ports::{ModelClientError, ModelOutput};
use kuching::application::services::{
    DelimiterPair, GenerationConfig, GenerationLoop, GenerationStrategy, ResponseExtractor,
    TerminalReason,
};
use kuching::infrastructure::model::ScriptedModelClient;

fn loop_with(
    client: Arc<ScriptedModelClient>,
    strategy: GenerationStrategy,
    max_attempts: u32,
    token_budget: u64,
) -> GenerationLoop {
    let config = GenerationConfig {
        max_attempts,
        token_budget,
        strategy,
        ..GenerationConfig::default()
    };
    let extractor = ResponseExtractor::new(DelimiterPair::default()).unwrap();
    GenerationLoop::new(client, extractor, config)
}

fn output(text: &str, total_tokens: Option<u64>) -> Result<ModelOutput, ModelClientError> {
    Ok(ModelOutput {
        text: text.to_string(),
        total_tokens,
    })
}

#[tokio::test]
async fn given_tagged_answer_on_first_attempt_when_generating_then_one_call_and_valid() {
    let client = Arc::new(ScriptedModelClient::with_texts(vec![
        "<response>the summary</response>",
    ]));
    let generation = loop_with(Arc::clone(&client), GenerationStrategy::Accumulation, 7, 16384);

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(outcome.valid);
    assert_eq!(outcome.reason, TerminalReason::ValidExtracted);
    assert_eq!(outcome.text, "the summary");
    assert_eq!(outcome.attempts, 1);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn given_answer_on_third_attempt_when_generating_then_no_further_calls() {
    let client = Arc::new(ScriptedModelClient::with_texts(vec![
        "thinking...",
        "still thinking...",
        "<response>finally</response>",
        "<response>never reached</response>",
    ]));
    let generation = loop_with(Arc::clone(&client), GenerationStrategy::Accumulation, 7, 16384);

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(outcome.valid);
    assert_eq!(outcome.text, "finally");
    assert_eq!(outcome.attempts, 3);
    assert_eq!(client.call_count(), 3);
}

#[tokio::test]
async fn given_tag_never_closed_when_generating_then_stops_at_ceiling_with_best_effort_text() {
    let client = Arc::new(ScriptedModelClient::with_texts(vec![]));
    let generation = loop_with(Arc::clone(&client), GenerationStrategy::Accumulation, 6, 16384);

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(!outcome.valid);
    assert_eq!(outcome.reason, TerminalReason::MaxAttempts);
    assert_eq!(outcome.attempts, 6);
    assert_eq!(client.call_count(), 6);
    // Partial work is never discarded.
    assert!(outcome.text.starts_with("doc body"));
}

#[tokio::test]
async fn given_answer_split_across_attempts_when_accumulating_then_extraction_spans_attempts() {
    let client = Arc::new(ScriptedModelClient::with_texts(vec![
        "<response>first half",
        " second half</response>",
    ]));
    let generation = loop_with(Arc::clone(&client), GenerationStrategy::Accumulation, 7, 16384);

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(outcome.valid);
    assert_eq!(outcome.text, "first half second half");
    assert_eq!(outcome.attempts, 2);
}

#[tokio::test]
async fn given_model_error_when_generating_then_error_propagates_without_retry() {
    let client = Arc::new(ScriptedModelClient::new(vec![Err(
        ModelClientError::ApiRequestFailed("timeout".to_string()),
    )]));
    let generation = loop_with(Arc::clone(&client), GenerationStrategy::Accumulation, 7, 16384);

    let result = generation.generate("Summarize", "doc body").await;

    assert!(matches!(result, Err(ModelClientError::ApiRequestFailed(_))));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn given_conversation_closing_late_when_generating_then_continues_until_closed() {
    let client = Arc::new(ScriptedModelClient::new(vec![
        output("<response>part one", Some(100)),
        output(" part two</response>", Some(220)),
    ]));
    let generation = loop_with(
        Arc::clone(&client),
        GenerationStrategy::Conversational,
        7,
        16384,
    );

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(outcome.valid);
    assert_eq!(outcome.text, "part one part two");
    assert_eq!(outcome.attempts, 2);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn given_token_budget_exhausted_when_conversing_then_terminates_with_budget_reason() {
    let client = Arc::new(ScriptedModelClient::new(vec![
        output("rambling without any closing tag", Some(999_999)),
        output("never called", Some(1)),
    ]));
    let generation = loop_with(
        Arc::clone(&client),
        GenerationStrategy::Conversational,
        7,
        1000,
    );

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(!outcome.valid);
    assert_eq!(outcome.reason, TerminalReason::TokenBudgetExceeded);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(client.call_count(), 1);
    assert_eq!(outcome.text, "rambling without any closing tag");
}

#[tokio::test]
async fn given_conversation_never_closing_when_generating_then_stops_at_ceiling() {
    let client = Arc::new(ScriptedModelClient::new(vec![
        output("turn one", Some(10)),
        output("turn two", Some(20)),
        output("turn three", Some(30)),
    ]));
    let generation = loop_with(
        Arc::clone(&client),
        GenerationStrategy::Conversational,
        3,
        16384,
    );

    let outcome = generation.generate("Summarize", "doc body").await.unwrap();

    assert!(!outcome.valid);
    assert_eq!(outcome.reason, TerminalReason::MaxAttempts);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(client.call_count(), 3);
    assert_eq!(outcome.text, "turn oneturn twoturn three");
}

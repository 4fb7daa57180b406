//! Tarot reading pipeline: prompt construction, the chat API round trip
//! and response post-processing.

use crate::Config;
use crate::models::{Card, TarotRequest, TarotResponse};
use crate::openai::{self, ChatRequest, ChatResponse};
use anyhow::Result;
use regex::Regex;
use tracing::info;

/// Build the prompt sent to the model
///
/// Card labels are joined with ", " and substituted, together with the
/// question text, into a fixed template. Pure function of its inputs.
pub fn prepare_question(request: &TarotRequest) -> String {
    let cards = request
        .cards
        .iter()
        .map(Card::label)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an experienced tarot reader. The querent asks: \"{}\". \
         The cards drawn for this spread, in order, are: {}. \
         Interpret the spread card by card and finish with an overall answer \
         to the question.",
        request.text, cards
    )
}

/// Collapse the response choices into a single answer string
///
/// Each choice contributes its message content; blank entries are dropped,
/// the configured special symbols are stripped, and the remaining fragments
/// are joined with newlines in their original order. Blank filtering runs
/// before stripping, matching the upstream behaviour (see DESIGN.md).
pub fn extract_answer(response: &ChatResponse, strip_pattern: &Regex) -> String {
    response
        .choices
        .iter()
        .map(|choice| choice.message.content.as_str())
        .filter(|content| !content.trim().is_empty())
        .map(|content| strip_pattern.replace_all(content, "").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate a reading for the given question and drawn cards
///
/// One awaited round trip to the chat API; any network, status or parse
/// failure propagates to the caller as-is.
pub async fn tarot_reading(request: TarotRequest, config: &Config) -> Result<TarotResponse> {
    use std::time::Instant;
    let start = Instant::now();

    let question = prepare_question(&request);
    let chat_request = ChatRequest::new(config, question);

    info!(
        model = %config.model,
        cards = request.cards.len(),
        "Sending tarot request to chat API"
    );

    let response = openai::chat_completion(&chat_request, config).await?;
    let answer = extract_answer(&response, &config.strip_pattern);

    info!(
        duration_ms = %start.elapsed().as_millis(),
        answer_len = answer.len(),
        "Reading completed"
    );

    Ok(TarotResponse {
        cards: request.cards,
        answer,
    })
}

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Reel, RecommendationResponse, CTA_LABEL},
    services::providers::TextGenerator,
};

/// Turns ranked candidates into user-facing recommendation cards
///
/// The generator is free text on the wire, so its output is treated as
/// untrusted: fencing artifacts are stripped, the remainder must parse into
/// the exact response schema, and anything else fails the request rather
/// than producing a partially-populated response.
pub struct PresentationGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl PresentationGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produces a validated RecommendationResponse for the candidates
    ///
    /// Empty input short-circuits to the single fallback card without a
    /// generation call.
    pub async fn present(&self, candidates: &[Reel]) -> AppResult<RecommendationResponse> {
        if candidates.is_empty() {
            tracing::info!("no candidates, returning fallback card");
            return Ok(RecommendationResponse::fallback());
        }

        let prompt = build_prompt(candidates)?;
        let raw_output = self.generator.generate(&prompt).await?;

        let json = extract_json(&raw_output).ok_or_else(|| {
            AppError::GenerationFailed("no JSON object found in model output".to_string())
        })?;

        let response: RecommendationResponse = serde_json::from_str(&json)
            .map_err(|e| AppError::GenerationFailed(format!("schema validation failed: {e}")))?;

        validate(&response, candidates.len())?;

        Ok(response)
    }
}

/// Assembles the fixed policy prompt around the serialized candidates
fn build_prompt(candidates: &[Reel]) -> AppResult<String> {
    let candidates_json = serde_json::to_string_pretty(candidates)
        .map_err(|e| AppError::Internal(format!("failed to serialize candidates: {e}")))?;

    Ok(format!(
        "You are a content curator for a short-form video feed. Below is a JSON \
         list of candidate reels, each with a url, description, and quality_score.\n\
         \n\
         Candidates:\n{candidates_json}\n\
         \n\
         Write one recommendation card per candidate. Rules:\n\
         - Treat quality_score as a ranking signal when ordering the cards.\n\
         - presentation_text must be a short, evocative pitch for that reel, \
         not a restatement of its description, and must not repeat across cards.\n\
         - Every cta_button must have text \"{CTA_LABEL}\" and url set to the \
         candidate's url, unchanged.\n\
         \n\
         Respond with exactly one JSON object of the form\n\
         {{\"content_cards\": [{{\"presentation_text\": \"...\", \
         \"cta_button\": {{\"text\": \"{CTA_LABEL}\", \"url\": \"...\"}}}}]}}\n\
         and no other fields, keys, or commentary."
    ))
}

/// Pulls a JSON object out of raw model output
///
/// Models routinely wrap JSON in markdown code fences or surround it with
/// prose. Tries a ```json fence, then a plain fence, then the outermost
/// brace pair.
fn extract_json(content: &str) -> Option<String> {
    if let Some(start) = content.find("```json") {
        let body = &content[start + 7..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim().to_string());
        }
    }

    if let Some(start) = content.find("```") {
        let body = &content[start + 3..];
        // Skip a language tag on the fence line, if any
        let body = body.find('\n').map(|n| &body[n + 1..]).unwrap_or(body);
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim().to_string());
        }
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| content[start..=end].to_string())
}

/// Field-level checks beyond what deserialization enforces
///
/// Card count matching candidate count is a soft expectation: the generator
/// is not hard-constrained beyond schema validity, so a mismatch logs a
/// warning instead of failing the request.
fn validate(response: &RecommendationResponse, candidate_count: usize) -> AppResult<()> {
    if response.content_cards.is_empty() {
        return Err(AppError::GenerationFailed(
            "model returned zero cards for non-empty input".to_string(),
        ));
    }

    for card in &response.content_cards {
        if card.presentation_text.trim().is_empty() {
            return Err(AppError::GenerationFailed(
                "card has empty presentation_text".to_string(),
            ));
        }
    }

    if response.content_cards.len() != candidate_count {
        tracing::warn!(
            cards = response.content_cards.len(),
            candidates = candidate_count,
            "card count does not match candidate count"
        );
    }

    Ok(())
}

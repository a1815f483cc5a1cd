use serde::{Deserialize, Serialize};

/// Fixed label rendered on every call-to-action button
pub const CTA_LABEL: &str = "Watch on Facebook";

/// Sentinel CTA target used when no catalog item backs the card
pub const FALLBACK_CTA_URL: &str = "#";

/// Message shown when retrieval produced no candidates
pub const FALLBACK_TEXT: &str =
    "Sorry, we couldn't find any reels matching your request right now. Try a different search!";

/// Call-to-action button on a recommendation card.
///
/// `deny_unknown_fields` is load-bearing: generator output with extra or
/// renamed fields must fail deserialization rather than being coerced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CtaButton {
    pub text: String,
    pub url: String,
}

/// One user-facing recommendation card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContentCard {
    pub presentation_text: String,
    pub cta_button: CtaButton,
}

/// The response body for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RecommendationResponse {
    pub content_cards: Vec<ContentCard>,
}

impl RecommendationResponse {
    /// Single-card response for the empty-retrieval path
    pub fn fallback() -> Self {
        Self {
            content_cards: vec![ContentCard {
                presentation_text: FALLBACK_TEXT.to_string(),
                cta_button: CtaButton {
                    text: CTA_LABEL.to_string(),
                    url: FALLBACK_CTA_URL.to_string(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_single_sentinel_card() {
        let response = RecommendationResponse::fallback();
        assert_eq!(response.content_cards.len(), 1);

        let card = &response.content_cards[0];
        assert_eq!(card.presentation_text, FALLBACK_TEXT);
        assert_eq!(card.cta_button.text, CTA_LABEL);
        assert_eq!(card.cta_button.url, FALLBACK_CTA_URL);
    }

    #[test]
    fn test_response_round_trip() {
        let json = r#"{
            "content_cards": [
                {
                    "presentation_text": "A fearless dog carves down the boardwalk",
                    "cta_button": {"text": "Watch on Facebook", "url": "https://facebook.com/reels/dog_skate_4"}
                }
            ]
        }"#;

        let parsed: RecommendationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content_cards.len(), 1);
        assert_eq!(
            parsed.content_cards[0].cta_button.url,
            "https://facebook.com/reels/dog_skate_4"
        );
    }

    #[test]
    fn test_extra_card_field_is_rejected() {
        let json = r#"{
            "content_cards": [
                {
                    "presentation_text": "text",
                    "cta_button": {"text": "Watch on Facebook", "url": "https://example.com"},
                    "rating": 5
                }
            ]
        }"#;

        assert!(serde_json::from_str::<RecommendationResponse>(json).is_err());
    }

    #[test]
    fn test_missing_cta_field_is_rejected() {
        let json = r#"{
            "content_cards": [
                {"presentation_text": "text", "cta_button": {"text": "Watch on Facebook"}}
            ]
        }"#;

        assert!(serde_json::from_str::<RecommendationResponse>(json).is_err());
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let json = r#"{"content_cards": [], "debug": true}"#;
        assert!(serde_json::from_str::<RecommendationResponse>(json).is_err());
    }
}

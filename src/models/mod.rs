pub mod cards;
pub mod reel;

pub use cards::{ContentCard, CtaButton, RecommendationResponse, CTA_LABEL, FALLBACK_CTA_URL};
pub use reel::Reel;

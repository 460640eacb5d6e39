use crate::models::mood::Mood;

/// Sentiment polarity in [-1, 1], from the VADER compound score.
pub fn polarity(text: &str) -> f64 {
    let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
    analyzer
        .polarity_scores(text)
        .get("compound")
        .copied()
        .unwrap_or(0.0)
}

/// Fixed-threshold mood assignment over a polarity score plus keyword
/// heuristics for the negative band.
pub fn classify(polarity: f64, text: &str) -> Mood {
    let text = text.to_lowercase();

    if polarity > 0.2 {
        Mood::Happy
    } else if polarity < -0.2 {
        if text.contains("angry") || text.contains("mad") {
            Mood::Angry
        } else if text.contains("anxious") || text.contains("nervous") || text.contains("stress") {
            Mood::Anxious
        } else {
            Mood::Sad
        }
    } else {
        Mood::Neutral
    }
}

pub fn detect(text: &str) -> Mood {
    classify(polarity(text), text)
}

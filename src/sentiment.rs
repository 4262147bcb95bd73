//! Lexicon/rule-based polarity scoring via VADER.
//!
//! The scorer runs on the RAW article body: the lexicon reads punctuation,
//! capitalization and negation cues that normalization strips, so the
//! cleaned text must never be fed here.

use crate::model::SentimentScore;

use vader_sentiment::SentimentIntensityAnalyzer;

/// Stateless scoring service. The lexicon is read-only, so one instance is
/// built per run and shared by reference.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Scores one text. Empty or whitespace-only input gets the exact
    /// neutral score without consulting the lexicon.
    pub fn score(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return SentimentScore::neutral();
        }

        let scores = self.analyzer.polarity_scores(text);
        let negative = scores["neg"];
        let neutral = scores["neu"];
        let positive = scores["pos"];

        // The lexicon reports the three components rounded to three
        // decimals; rescale so they sum to 1.0 within floating tolerance.
        // A text with no scorable tokens at all behaves like empty input.
        let total = negative + neutral + positive;
        if total <= f64::EPSILON {
            return SentimentScore::neutral();
        }

        SentimentScore {
            negative: negative / total,
            neutral: neutral / total,
            positive: positive / total,
            compound: scores["compound"].clamp(-1.0, 1.0),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_exactly_neutral() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), SentimentScore::neutral());
        assert_eq!(scorer.score("   \n "), SentimentScore::neutral());

        let neutral = scorer.score("");
        assert_eq!(neutral.neutral, 1.0);
        assert_eq!(neutral.negative, 0.0);
        assert_eq!(neutral.positive, 0.0);
        assert_eq!(neutral.compound, 0.0);
    }

    #[test]
    fn components_sum_to_one_and_compound_stays_in_range() {
        let scorer = SentimentScorer::new();
        let texts = [
            "NVIDIA shares soared after a fantastic earnings report.",
            "The stock plunged amid terrible demand and lawsuits.",
            "The company reported quarterly results on Wednesday.",
            "Great quarter, but guidance was disappointing and weak.",
        ];

        for text in texts {
            let score = scorer.score(text);
            let sum = score.negative + score.neutral + score.positive;
            assert!((sum - 1.0).abs() < 1e-6, "sum {} for {:?}", sum, text);
            assert!((-1.0..=1.0).contains(&score.compound));
            assert!((0.0..=1.0).contains(&score.negative));
            assert!((0.0..=1.0).contains(&score.neutral));
            assert!((0.0..=1.0).contains(&score.positive));
        }
    }

    #[test]
    fn polarity_direction_matches_the_text() {
        let scorer = SentimentScorer::new();
        let upbeat = scorer.score("Excellent results, profits soared, a great success!");
        let gloomy = scorer.score("Terrible losses, the worst crash, a disastrous failure.");

        assert!(upbeat.compound > 0.0);
        assert!(gloomy.compound < 0.0);
        assert!(upbeat.positive > upbeat.negative);
        assert!(gloomy.negative > gloomy.positive);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = SentimentScorer::new();
        let text = "Shares rallied sharply after the strong earnings beat.";
        assert_eq!(scorer.score(text), scorer.score(text));
    }
}

//! Text utilities: sentence segmentation, preprocessing, and duration
//! estimation. Pure functions with no shared state.

pub mod normalizer;
pub mod segmenter;

pub use normalizer::preprocess;
pub use segmenter::split_into_sentences;

/// Average reading speed used for duration estimation, in words per minute
const WORDS_PER_MINUTE: f64 = 150.0;

/// Estimate how long a text takes to speak, in seconds
///
/// A rate of 0.5 corresponds to the nominal 150 wpm; the rate scales the
/// tempo linearly around that baseline.
pub fn estimate_duration(text: &str, rate: f32) -> f64 {
    let adjusted_wpm = WORDS_PER_MINUTE * (rate as f64 * 2.0).max(0.1);
    let word_count = text.split_whitespace().count();
    word_count as f64 / adjusted_wpm * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_duration_baseline() {
        // 150 words at the nominal rate take one minute
        let text = vec!["word"; 150].join(" ");
        let secs = estimate_duration(&text, 0.5);
        assert!((secs - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_duration_scales_with_rate() {
        let text = "one two three four five";
        assert!(estimate_duration(text, 0.25) > estimate_duration(text, 0.5));
        assert!(estimate_duration(text, 1.0) < estimate_duration(text, 0.5));
    }

    #[test]
    fn test_estimate_duration_empty_text() {
        assert_eq!(estimate_duration("", 0.5), 0.0);
        assert_eq!(estimate_duration("   ", 0.5), 0.0);
    }

    #[test]
    fn test_estimate_duration_zero_rate_does_not_divide_by_zero() {
        assert!(estimate_duration("hello world", 0.0).is_finite());
    }
}

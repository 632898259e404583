/// Words whose presence pushes the score up. Matched as lowercase
/// substrings, so "unbroken" still counts as "broken".
pub const TRIGGER_WORDS: [&str; 12] = [
    "hate", "useless", "worthless", "kill", "die", "abuse", "stupid", "idiot", "nobody",
    "broken", "angry", "rage",
];

/// Characters of text per point of length bonus.
const LENGTH_STEP: usize = 120;
const MAX_LENGTH_BONUS: usize = 5;
const DIVISOR: f64 = 8.0;

/// Crude emotional-severity estimate in `[0, 1]`.
///
/// One point per trigger word present (repeats of the same word do not add),
/// plus one point per 120 characters up to five, over eight.
pub fn estimate_intensity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let hits = TRIGGER_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    let bonus = (text.chars().count() / LENGTH_STEP).min(MAX_LENGTH_BONUS);

    ((hits + bonus) as f64 / DIVISOR).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(estimate_intensity(""), 0.0);
    }

    #[test]
    fn single_trigger_is_one_eighth() {
        assert_eq!(estimate_intensity("I hate this"), 0.125);
        assert_eq!(estimate_intensity("I HATE this"), 0.125);
    }

    #[test]
    fn repeated_word_counts_once() {
        assert_eq!(estimate_intensity("hate hate hate"), 0.125);
    }

    #[test]
    fn substring_matches_inside_words() {
        assert_eq!(estimate_intensity("unbroken"), 0.125);
    }

    #[test]
    fn length_bonus_steps_every_120_chars_and_caps_at_five() {
        assert_eq!(estimate_intensity(&"a".repeat(119)), 0.0);
        assert_eq!(estimate_intensity(&"a".repeat(240)), 0.25);
        assert_eq!(estimate_intensity(&"a".repeat(600)), 0.625);
        assert_eq!(estimate_intensity(&"a".repeat(10_000)), 0.625);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 120 two-byte characters
        assert_eq!(estimate_intensity(&"é".repeat(120)), 0.125);
    }

    #[test]
    fn score_clamps_to_one() {
        let all = TRIGGER_WORDS.join(" ");
        assert_eq!(estimate_intensity(&all), 1.0);
        assert_eq!(estimate_intensity(&format!("{all} {}", "x".repeat(700))), 1.0);
    }

    #[test]
    fn formula_matches_trigger_count_plus_bonus() {
        let text = format!("useless and angry {}", "x".repeat(250));
        let len = text.chars().count();
        let expected = ((2 + (len / 120).min(5)) as f64 / 8.0).clamp(0.0, 1.0);
        assert_eq!(estimate_intensity(&text), expected);
    }

    #[test]
    fn monotonic_in_triggers_and_length() {
        let mut text = String::new();
        let mut last = estimate_intensity(&text);
        for word in TRIGGER_WORDS {
            text.push_str(word);
            text.push(' ');
            let next = estimate_intensity(&text);
            assert!(next >= last);
            last = next;
        }

        let mut last = 0.0;
        for n in (0..1_000).step_by(37) {
            let next = estimate_intensity(&"z".repeat(n));
            assert!(next >= last);
            last = next;
        }
    }
}

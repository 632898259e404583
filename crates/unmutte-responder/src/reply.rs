use crate::intensity::estimate_intensity;

const SOFT_RESPONSES_EN: [&str; 3] = [
    "I’m here, yaar. Say whatever you need. No judgement, only warmth.",
    "That sounded really heavy. Take your time, I’m listening.",
    "You’re not alone. Main hoon na — I’m right here with you.",
];

const SOFT_RESPONSES_HI: [&str; 3] = [
    "Main yahin hoon, yaar. Jo mann mein hai bol do. Koi faisla nahi.",
    "Ye sab kaafi bhaari lag raha hai. Araam se, main sun raha/rahi hoon.",
    "Tum akelay nahi ho. Main saath hoon, bilkul paas.",
];

pub const BREATHING_SUFFIX: &str =
    " Thoda sa saans lein — 4 count in, 4 hold, 4 out. Main yahin hoon.";
pub const INVITE_SUFFIX: &str = " Bolo aur, jo dil mein hai.";

/// Intensity above which the reply adds a breathing prompt.
const BREATHING_THRESHOLD: f64 = 0.7;
/// Intensity at or above which the client should suggest a break.
const BREAK_THRESHOLD: f64 = 0.8;

/// Pick a canned reply for `text`.
///
/// The base sentence is chosen by character count modulo the set size, so
/// equal-length inputs always get the same sentence.
pub fn generate_reply(text: &str, lang: &str) -> String {
    let base = if lang.to_lowercase().starts_with("hi") {
        &SOFT_RESPONSES_HI
    } else {
        &SOFT_RESPONSES_EN
    };
    let suffix = if estimate_intensity(text) > BREATHING_THRESHOLD {
        BREATHING_SUFFIX
    } else {
        INVITE_SUFFIX
    };

    let sentence = base[text.chars().count() % base.len()];
    format!("{sentence}{suffix}")
}

pub fn suggest_break(intensity: f64) -> bool {
    intensity >= BREAK_THRESHOLD
}

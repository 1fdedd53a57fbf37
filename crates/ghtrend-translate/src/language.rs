//! Cheap language sniffing used to skip needless translation requests.

/// Returns `true` when `text` already appears to be written in `target_lang`.
///
/// Only Chinese targets (`zh`, `zh-CN`, `zh-TW`, ...) are recognised: the text
/// must contain a CJK unified ideograph and no run of four or more ASCII
/// letters. Short Latin tokens such as `AI` or `API` inside Chinese text are
/// tolerated. For any other target this always returns `false`.
#[must_use]
pub fn looks_like_target(text: &str, target_lang: &str) -> bool {
    if !target_lang.to_ascii_lowercase().starts_with("zh") {
        return false;
    }
    has_cjk(text) && longest_ascii_letter_run(text) < 4
}

fn has_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

fn longest_ascii_letter_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

//! Sentence segmentation
//!
//! Splits text into sentences at terminal punctuation while keeping URL
//! spans intact. Empty and whitespace-only fragments are dropped.

/// Sentence-ending punctuation, including full-width CJK forms
const SENTENCE_ENDINGS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Split text into an ordered sequence of sentences
///
/// `.`, `!`, `?` and their full-width equivalents terminate a sentence.
/// No split happens inside a URL: once a token starting with `http://` or
/// `https://` begins, terminators are ignored until whitespace ends the
/// URL.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut token = String::new();
    let mut in_url = false;

    for c in text.chars() {
        if c.is_whitespace() {
            in_url = false;
            token.clear();
            current.push(c);
            continue;
        }

        token.push(c);
        if !in_url && is_url_prefix(&token) {
            in_url = true;
        }

        current.push(c);

        if !in_url && SENTENCE_ENDINGS.contains(&c) {
            push_trimmed(&mut sentences, &mut current);
            token.clear();
        }
    }

    push_trimmed(&mut sentences, &mut current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    // Strip the trailing terminator the way a display caption would
    let trimmed = trimmed.trim_end_matches(|c| SENTENCE_ENDINGS.contains(&c));
    let trimmed = trimmed.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

fn is_url_prefix(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

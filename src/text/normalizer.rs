//! Text preprocessing for speech
//!
//! Expands abbreviations, speaks out special characters, spells out
//! integers, and collapses whitespace so the synthesizer receives clean,
//! pronounceable input.

/// Abbreviations expanded before synthesis
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Dr.", "Doctor"),
    ("Mr.", "Mister"),
    ("Mrs.", "Missus"),
    ("Ms.", "Miss"),
    ("Prof.", "Professor"),
    ("etc.", "et cetera"),
    ("e.g.", "for example"),
    ("i.e.", "that is"),
    ("vs.", "versus"),
];

/// Symbols replaced with speakable words
const SPECIAL_CHARACTERS: &[(&str, &str)] = &[
    ("&", "and"),
    ("@", "at"),
    ("#", "hashtag"),
    ("%", "percent"),
    ("$", "dollar"),
    ("©", "copyright"),
    ("®", "registered"),
    ("™", "trademark"),
];

/// Prepare raw text for synthesis
pub fn preprocess(text: &str) -> String {
    let mut processed = text.to_string();

    for (abbrev, expansion) in ABBREVIATIONS {
        processed = processed.replace(abbrev, expansion);
    }

    for (symbol, replacement) in SPECIAL_CHARACTERS {
        processed = processed.replace(symbol, &format!(" {replacement} "));
    }

    processed = spell_out_integers(&processed);

    // Collapse runs of whitespace
    processed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace standalone integers with their spelled-out form
fn spell_out_integers(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut digits = String::new();

    let flush = |digits: &mut String, result: &mut String| {
        if !digits.is_empty() {
            match digits.parse::<u64>() {
                Ok(n) => result.push_str(&number_to_words(n)),
                Err(_) => result.push_str(digits),
            }
            digits.clear();
        }
    };

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush(&mut digits, &mut result);
            result.push(c);
        }
    }
    flush(&mut digits, &mut result);

    result
}

const ONES: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: &[&str] = &[
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spell out a non-negative integer in English
fn number_to_words(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            if n % 10 == 0 {
                tens.to_string()
            } else {
                format!("{tens}-{}", ONES[(n % 10) as usize])
            }
        }
        100..=999 => {
            let hundreds = format!("{} hundred", ONES[(n / 100) as usize]);
            if n % 100 == 0 {
                hundreds
            } else {
                format!("{hundreds} {}", number_to_words(n % 100))
            }
        }
        1_000..=999_999 => {
            let thousands = format!("{} thousand", number_to_words(n / 1_000));
            if n % 1_000 == 0 {
                thousands
            } else {
                format!("{thousands} {}", number_to_words(n % 1_000))
            }
        }
        1_000_000..=999_999_999 => {
            let millions = format!("{} million", number_to_words(n / 1_000_000));
            if n % 1_000_000 == 0 {
                millions
            } else {
                format!("{millions} {}", number_to_words(n % 1_000_000))
            }
        }
        // Past this point reading the digits is clearer than a word salad
        _ => n.to_string(),
    }
}

//! Case-convention transforms used to derive identifiers and labels.
//!
//! Input is split into words on any non-alphanumeric character and on case
//! boundaries (`fooBar` -> `foo Bar`, `HTTPServer` -> `HTTP Server`). Each
//! transform then re-joins the words in its own convention.

/// Split `input` into its constituent words.
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).map(|p| &chars[p])
            && !current.is_empty()
            && c.is_uppercase()
        {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // aB -> a|B, 1B -> 1|B, ABc -> A|Bc
            if prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Join capitalized words. A word after the first that starts with a digit is
/// prefixed with `_`.
fn join_pascal<'a>(words: impl Iterator<Item = (usize, &'a String)>) -> String {
    let mut out = String::new();
    for (i, word) in words {
        if i > 0 && word.starts_with(|c: char| c.is_numeric()) {
            out.push('_');
        }
        out.push_str(&capitalize(word));
    }
    out
}

/// `text_tools` -> `TextTools`
pub fn to_pascal_case(input: &str) -> String {
    let words = split_words(input);
    join_pascal(words.iter().enumerate())
}

/// `text_tools` -> `textTools`
pub fn to_camel_case(input: &str) -> String {
    let words = split_words(input);
    let mut out = String::new();
    if let Some(first) = words.first() {
        out.push_str(&first.to_lowercase());
    }
    out.push_str(&join_pascal(words.iter().enumerate().skip(1)));
    out
}

/// `case_sensitive` -> `Case Sensitive`
pub fn to_capitalized_words(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Titles longer than this are truncated
pub const MAX_TITLE_CHARS: usize = 60;
const TRUNCATED_CHARS: usize = MAX_TITLE_CHARS - ELLIPSIS.len();
const ELLIPSIS: &str = "...";

/// Display title for raw issue text.
///
/// Trims the input, cuts it to 57 characters plus `...` when it is longer
/// than 60 characters, then title-cases it.
///
/// # Examples
/// ```
/// use issue_templater::template::derive_title;
/// assert_eq!(derive_title("  crash on login "), "Crash On Login");
/// ```
pub fn derive_title(raw_input: &str) -> String {
    let trimmed = raw_input.trim();
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        let mut cut: String = trimmed.chars().take(TRUNCATED_CHARS).collect();
        cut.push_str(ELLIPSIS);
        title_case(&cut)
    } else {
        title_case(trimmed)
    }
}

/// Title-case a character run the way word-initial capitalization works.
///
/// A cased character that follows another cased character is lower-cased.
/// Any other cased character gets its title form: the first character of its
/// upper-case mapping, with the rest of that mapping lower-cased (`ß` -> `Ss`).
/// Uncased characters (digits, punctuation, CJK) are copied and end a word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut out, c);
        }
        prev_cased = is_cased(c);
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || titlecase_digraph(c).is_some()
}

/// Latin digraphs that have a dedicated title-case letter
fn titlecase_digraph(c: char) -> Option<char> {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => Some('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => Some('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => Some('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => Some('ǲ'),
        _ => None,
    }
}

fn push_titlecase(out: &mut String, c: char) {
    if let Some(title) = titlecase_digraph(c) {
        out.push(title);
        return;
    }
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("app crashes on LOGIN button"), "App Crashes On Login Button");
        assert_eq!(title_case("times out after 30s"), "Times Out After 30S");
        assert_eq!(title_case("don't-stop"), "Don'T-Stop");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_multi_char_and_uncased() {
        assert_eq!(title_case("ßtraße"), "Sstraße");
        assert_eq!(title_case("ǆungla ǉubav"), "ǅungla ǈubav");
        assert_eq!(title_case("中a"), "中A");
        assert_eq!(title_case("ÉCOLE fermée"), "École Fermée");
    }

    #[test]
    fn short_input_is_not_truncated() {
        let raw = "a".repeat(60);
        let title = derive_title(&raw);
        assert_eq!(title.chars().count(), 60);
        assert!(!title.ends_with("..."));
    }

    #[test]
    fn long_input_is_cut_to_sixty_chars() {
        let raw = "x".repeat(80);
        let title = derive_title(&raw);
        assert_eq!(title.chars().count(), 60);
        assert!(title.ends_with("..."));
        assert!(title.starts_with("Xxx"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let raw = "é".repeat(61);
        let title = derive_title(&raw);
        assert_eq!(title.chars().count(), 60);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(derive_title("\n  slow dashboard \t"), "Slow Dashboard");
    }
}

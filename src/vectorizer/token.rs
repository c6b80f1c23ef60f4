use indexmap::IndexMap;

/// Split text into tokens.
///
/// The text is lowercased first, then every maximal run of ASCII letters and
/// digits becomes one token. No stemming and no stopword removal.
///
/// # Examples
/// ```
/// use issue_templater::vectorizer::token::tokenize;
/// assert_eq!(tokenize("App crashes on LOGIN_button (v2)"), vec!["app", "crashes", "on", "login", "button", "v2"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}

///  TokenFrequency 構造体
/// Counts token occurrences within one text (or a whole corpus).
///
/// Tokens keep their first-seen order, which the vectorizer relies on to
/// break ranking ties.
///
/// # Examples
/// ```
/// use issue_templater::vectorizer::token::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_tokens(&["login", "crash", "login"]);
/// assert_eq!(token_freq.token_count("login"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count every token of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::new();
        freq.add_tokens(&tokenize(text));
        freq
    }

    /// tokenを追加する
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self.total_token_count += 1;
        self
    }

    /// 複数のtokenを追加する
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Fold another frequency table into this one, keeping this table's
    /// first-seen order and appending unseen tokens in `other`'s order.
    pub fn merge(&mut self, other: &TokenFrequency) -> &mut Self {
        for (token, &count) in &other.token_count {
            match self.token_count.get_mut(token.as_str()) {
                Some(existing) => *existing += count,
                None => {
                    self.token_count.insert(token.clone(), count);
                }
            }
        }
        self.total_token_count += other.total_token_count;
        self
    }
}

/// 情報取得
impl TokenFrequency {
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens counted (not unique).
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of unique tokens.
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// Iterate (token, count) in first-seen order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Unique tokens in first-seen order.
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(String::as_str).collect()
    }

    /// Tokens ordered by descending count. Ties keep first-seen order.
    ///
    /// # Arguments
    /// * `limit` - keep at most this many tokens
    pub fn most_frequent_tokens(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self.iter().collect();
        // stable sort: equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_non_alphanumerics() {
        assert_eq!(
            tokenize("Database connection times-out after 30s!"),
            vec!["database", "connection", "times", "out", "after", "30s"]
        );
        assert!(tokenize("  ... !!! ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_drops_non_ascii_letters() {
        // é is not an ASCII letter, so it splits the run
        assert_eq!(tokenize("Café crash"), vec!["caf", "crash"]);
        assert_eq!(tokenize("foo_bar"), vec!["foo", "bar"]);
    }

    #[test]
    fn counts_and_order() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["b", "a", "b", "c", "a", "b"]);
        assert_eq!(freq.token_count("b"), 3);
        assert_eq!(freq.token_count("a"), 2);
        assert_eq!(freq.token_count("zzz"), 0);
        assert_eq!(freq.token_sum(), 6);
        assert_eq!(freq.token_num(), 3);
        assert_eq!(freq.token_set_ref_str(), vec!["b", "a", "c"]);
    }

    #[test]
    fn most_frequent_breaks_ties_by_first_seen() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["x", "y", "z", "y", "x", "w"]);
        let ranked = freq.most_frequent_tokens(10);
        assert_eq!(ranked, vec![("x", 2), ("y", 2), ("z", 1), ("w", 1)]);
        assert_eq!(freq.most_frequent_tokens(3).len(), 3);
    }

    #[test]
    fn merge_appends_unseen_tokens() {
        let mut a = TokenFrequency::from_text("login crash");
        let b = TokenFrequency::from_text("crash report");
        a.merge(&b);
        assert_eq!(a.token_set_ref_str(), vec!["login", "crash", "report"]);
        assert_eq!(a.token_count("crash"), 2);
        assert_eq!(a.token_sum(), 4);
        assert!(!a.is_empty());
    }
}

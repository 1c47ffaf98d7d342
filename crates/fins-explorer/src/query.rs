//! Query classification and name normalisation

/// A trimmed, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// The query is a positive integer and names a species directly
    Id(u64),
    /// Free text to match against scientific names and genera
    Name(String),
}

impl Query {
    /// Classify raw user input. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.parse::<u64>() {
            Ok(id) if id > 0 => Some(Self::Id(id)),
            _ => Some(Self::Name(trimmed.to_string())),
        }
    }
}

/// Normalise a name for the catalog's case-sensitive search: the first token
/// is capitalised and everything after it is lower-cased, which is the
/// binomial convention (`"parrot FISH"` -> `"Parrot fish"`).
pub fn normalize_name(raw: &str) -> String {
    let mut tokens = raw.split_whitespace();
    let Some(first) = tokens.next() else {
        return String::new();
    };

    let mut normalized = capitalize(first);
    for token in tokens {
        normalized.push(' ');
        normalized.push_str(&token.to_lowercase());
    }
    normalized
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

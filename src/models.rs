use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog record. `id` is not unique across the catalog, so identity is the
/// `(id, chapter, question)` triple returned by [`Question::identity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub chapter: String,
    pub question: String,
    pub answer: String,
    /// Display fields (`options`, explanations, ...) kept verbatim so that
    /// wrong-book snapshots carry the whole record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A wrong-book entry is a full snapshot of the question that was missed.
pub type WrongEntry = Question;

impl Question {
    pub fn identity(&self) -> (i64, &str, &str) {
        (self.id, &self.chapter, &self.question)
    }

    pub fn same_identity(&self, other: &Question) -> bool {
        self.identity() == other.identity()
    }

    /// Normalized answer letter.
    pub fn answer_letter(&self) -> String {
        normalize_letter(&self.answer)
    }

    /// Options as `(letter, text)` pairs.
    ///
    /// Accepts either an object keyed by letter or an array of strings; array
    /// items are lettered `A`, `B`, ... unless they already start with `X.`.
    pub fn options(&self) -> Vec<QuestionOption> {
        match self.extra.get("options") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(letter, text)| QuestionOption {
                    letter: normalize_letter(letter),
                    text: display_value(text),
                })
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .zip('A'..='Z')
                .map(|(item, fallback)| {
                    let text = display_value(item);
                    match split_lettered(&text) {
                        Some((letter, rest)) => QuestionOption {
                            letter,
                            text: rest.to_string(),
                        },
                        None => QuestionOption {
                            letter: fallback.to_string(),
                            text,
                        },
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub letter: String,
    pub text: String,
}

pub fn normalize_letter(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Splits `"A. text"`, `"A、text"` or `"A: text"` into its letter and text.
fn split_lettered(text: &str) -> Option<(String, &str)> {
    let mut chars = text.char_indices();
    let (_, letter) = chars.next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let (idx, sep) = chars.next()?;
    if !matches!(sep, '.' | '、' | ':' | '：' | ')' | '．') {
        return None;
    }
    let rest = text[idx + sep.len_utf8()..].trim_start();
    Some((letter.to_ascii_uppercase().to_string(), rest))
}

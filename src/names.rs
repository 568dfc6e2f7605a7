pub const INDEX_URL: &str = "/";
pub const CHAPTERS_URL: &str = "/chapters";
pub const QUIZ_URL: &str = "/quiz";
pub const WRONG_QUIZ_URL: &str = "/wrong_quiz";
pub const LAST_WRONG_QUIZ_URL: &str = "/wrong_quiz/last";
pub const SEARCH_URL: &str = "/search";
pub const WRONG_QUESTIONS_URL: &str = "/wrong_questions";

pub const REVIEW_SESSION_COOKIE_NAME: &str = "review_session";
/// Lifetime of the session cookie and of the in-memory state behind it.
pub const SESSION_MAX_AGE_SECS: u64 = 3600;

pub fn chapter_url(chapter: &str) -> String {
    format!("/chapter/{}", urlencoding::encode(chapter))
}

pub fn round_url(kind: &crate::engine::RoundKind) -> String {
    use crate::engine::RoundKind;

    match kind {
        RoundKind::Random10 => QUIZ_URL.to_string(),
        RoundKind::ByChapter(chapter) => chapter_url(chapter),
        RoundKind::AllWrong => WRONG_QUIZ_URL.to_string(),
        RoundKind::LastWrong => LAST_WRONG_QUIZ_URL.to_string(),
    }
}

// Round defaults
pub const ROUND_SIZE: i64 = 10;

// Defaults for the command line
pub const DEFAULT_QUESTIONS_FILE: &str = "questions.json";
pub const DEFAULT_WRONG_BOOK_FILE: &str = "wrong_questions.json";
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:5000";

#![allow(dead_code)]

use std::path::PathBuf;

use history_review::{
    engine::QuizEngine,
    models::Question,
    session::SessionStore,
    store::{QuestionStore, WrongBookStore},
};
use serde_json::json;

/// A path in the temp dir that is unique per process and per call.
pub fn temp_path(stem: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "history_review_{stem}_{}_{}.json",
        std::process::id(),
        id
    ));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    path
}

pub fn question(id: i64, chapter: &str, text: &str, answer: &str) -> Question {
    serde_json::from_value(json!({
        "id": id,
        "chapter": chapter,
        "question": text,
        "answer": answer,
        "options": { "A": "甲", "B": "乙", "C": "丙", "D": "丁" },
    }))
    .expect("valid question json")
}

/// Two chapters, plus id 1 reused in the second chapter.
pub fn sample_catalog() -> Vec<Question> {
    vec![
        question(1, "Ming", "Who founded the Ming dynasty?", "B"),
        question(2, "Ming", "When did Zheng He first sail?", "A"),
        question(3, "Qing", "Who created the Grand Council?", "C"),
        question(4, "Qing", "When did the Opium War begin?", "D"),
        question(1, "Qing", "Which emperor ruled for 61 years?", "A"),
    ]
}

pub fn numbered_catalog(n: i64) -> Vec<Question> {
    (1..=n)
        .map(|i| question(i, "Song", &format!("Question {i}"), "A"))
        .collect()
}

pub fn write_catalog(questions: &[Question]) -> PathBuf {
    let path = temp_path("catalog");
    std::fs::write(&path, serde_json::to_vec(questions).expect("serialize catalog"))
        .expect("write catalog");
    path
}

pub fn engine_with(questions: QuestionStore) -> QuizEngine {
    QuizEngine::new(
        questions,
        WrongBookStore::new(temp_path("wrong_book")),
        SessionStore::new(),
    )
}

pub fn create_test_engine() -> QuizEngine {
    engine_with(QuestionStore::in_memory(sample_catalog()))
}

pub fn answers(pairs: &[(i64, &str)]) -> std::collections::HashMap<String, String> {
    pairs
        .iter()
        .map(|(id, letter)| (id.to_string(), letter.to_string()))
        .collect()
}

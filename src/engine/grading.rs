use std::collections::HashMap;

use serde::Serialize;

use crate::models::{normalize_letter, Question};

/// A question answered incorrectly in a graded round.
#[derive(Debug, Clone, Serialize)]
pub struct MissedQuestion {
    pub question: Question,
    pub submitted_answer: String,
    pub correct_answer: String,
}

/// Result of comparing submitted letters with a question set.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    pub score: usize,
    pub total: usize,
    pub missed: Vec<MissedQuestion>,
    /// Ids of the questions answered correctly, in question order.
    pub correct_ids: Vec<i64>,
}

impl Tally {
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total)
    }

    pub fn missed_ids(&self) -> Vec<i64> {
        self.missed.iter().map(|m| m.question.id).collect()
    }
}

/// `100 * score / total` rounded to one decimal, ties to even; `0.0` for an
/// empty round.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (score as f64 * 1000.0 / total as f64).round_ties_even() / 10.0
}

/// Grades every question of `questions` against `answers`, which are keyed by
/// the question id rendered as a string. A missing answer counts as wrong.
pub fn grade(questions: &[Question], answers: &HashMap<String, String>) -> Tally {
    let mut tally = Tally {
        total: questions.len(),
        ..Tally::default()
    };

    for question in questions {
        let submitted = answers
            .get(&question.id.to_string())
            .map(|a| normalize_letter(a))
            .unwrap_or_default();
        let correct = question.answer_letter();

        if !submitted.is_empty() && submitted == correct {
            tally.score += 1;
            tally.correct_ids.push(question.id);
        } else {
            tally.missed.push(MissedQuestion {
                question: question.clone(),
                submitted_answer: submitted,
                correct_answer: correct,
            });
        }
    }

    tally
}

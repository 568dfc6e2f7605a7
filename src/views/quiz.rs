use maud::{html, Markup};

use crate::{
    engine::{RoundKind, RoundReport},
    models::Question,
    names,
    views::components::nav_link,
};

/// The answer form for a pinned round. Radio groups are named by question id,
/// so questions sharing an id are shown together under a single radio group.
pub fn round(kind: &RoundKind, questions: &[Question]) -> Markup {
    let action = names::round_url(kind);
    html! {
        h1 { (kind.label()) }
        p { (questions.len()) " questions. Pick one answer for each." }
        form hx-post=(action) hx-target="main" hx-swap="innerHTML" {
            @for (idx, group) in group_by_id(questions).iter().enumerate() {
                @match group.as_slice() {
                    [question] => { (single_question(idx + 1, question)) }
                    shared => { (shared_id_questions(idx + 1, shared)) }
                }
            }
            button type="submit" { "Submit answers" }
        }
    }
}

fn single_question(number: usize, question: &Question) -> Markup {
    html! {
        article {
            p."chapter-tag" { (question.chapter) }
            p { strong { (number) ". " } (question.question) }
            div."options" {
                @for option in question.options() {
                    label {
                        input type="radio" name=(question.id) value=(option.letter);
                        " " (option.letter) ". " (option.text)
                    }
                }
            }
        }
    }
}

fn shared_id_questions(number: usize, questions: &[&Question]) -> Markup {
    let id = questions.first().map(|q| q.id).unwrap_or_default();
    html! {
        article."shared-id" {
            p."shared-note" {
                strong { (number) ". " }
                "Questions sharing id #" (id) ": the answer you pick is graded for each."
            }
            @for question in questions {
                p."chapter-tag" { (question.chapter) }
                p { (question.question) }
                ul {
                    @for option in question.options() {
                        li { (option.letter) ". " (option.text) }
                    }
                }
            }
            div."options" {
                @for letter in option_letters(questions) {
                    label {
                        input type="radio" name=(id) value=(letter);
                        " " (letter)
                    }
                }
            }
        }
    }
}

/// Questions grouped by id, in order of first appearance.
fn group_by_id(questions: &[Question]) -> Vec<Vec<&Question>> {
    let mut groups: Vec<Vec<&Question>> = Vec::new();
    for question in questions {
        match groups.iter_mut().find(|g| g[0].id == question.id) {
            Some(group) => group.push(question),
            None => groups.push(vec![question]),
        }
    }
    groups
}

/// Every option letter offered by any question of the group.
fn option_letters(questions: &[&Question]) -> Vec<String> {
    let mut letters: Vec<String> = Vec::new();
    for option in questions.iter().flat_map(|q| q.options()) {
        if !letters.contains(&option.letter) {
            letters.push(option.letter);
        }
    }
    letters
}

pub fn no_questions(kind: &RoundKind) -> Markup {
    let message = match kind {
        RoundKind::AllWrong => "The wrong book is empty. Nothing to practice yet.",
        RoundKind::LastWrong => "No questions were missed in your last round.",
        RoundKind::ByChapter(_) => "This chapter has no questions.",
        RoundKind::Random10 => "The question bank is empty.",
    };
    html! {
        h1 { (kind.label()) }
        p { (message) }
        p { (nav_link(names::INDEX_URL, html! { "Back to the start page" })) }
    }
}

pub fn result(report: &RoundReport) -> Markup {
    html! {
        h1 { (report.kind.label()) " - results" }
        p."score" {
            (report.score) " / " (report.total) " (" (format!("{:.1}", report.percentage)) "%)"
        }
        @if report.kind.clears_on_correct() && report.book.removed > 0 {
            p."correct" { (report.book.removed) " question(s) cleared from the wrong book." }
        }
        @if report.book.added > 0 {
            p."wrong" { (report.book.added) " question(s) added to the wrong book." }
        }
        @if report.missed.is_empty() {
            p."correct" { "All answers correct." }
        } @else {
            h2 { "Missed questions" }
            @for missed in &report.missed {
                article {
                    p."chapter-tag" { (missed.question.chapter) }
                    p { strong { (missed.question.question) } }
                    ul {
                        @for option in missed.question.options() {
                            li { (option.letter) ". " (option.text) }
                        }
                    }
                    p {
                        "Your answer: "
                        span."wrong" {
                            @if missed.submitted_answer.is_empty() { "(none)" } @else { (missed.submitted_answer) }
                        }
                        " · Correct answer: "
                        span."correct" { (missed.correct_answer) }
                    }
                }
            }
        }
        p {
            (nav_link(&names::round_url(&report.kind), html! { "Practice again" }))
            @if report.kind.tracks_last_missed() && !report.missed.is_empty() {
                " · "
                (nav_link(names::LAST_WRONG_QUIZ_URL, html! { "Practice the ones I missed" }))
            }
        }
    }
}

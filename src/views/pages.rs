use maud::{html, Markup};

use crate::{
    models::Question,
    names,
    views::components::{nav_link, question_card},
};

pub fn index(question_count: usize, wrong_count: usize) -> Markup {
    html! {
        h1 { "History Review" }
        p { "The question bank holds " strong { (question_count) } " questions." }
        ul {
            li { (nav_link(names::QUIZ_URL, html! { "Random quiz" })) " - ten questions from the whole bank" }
            li { (nav_link(names::CHAPTERS_URL, html! { "Practice by chapter" })) }
            li { (nav_link(names::SEARCH_URL, html! { "Search questions" })) }
            li {
                (nav_link(names::WRONG_QUESTIONS_URL, html! { "Wrong book" }))
                " (" (wrong_count) ")"
            }
            li { (nav_link(names::WRONG_QUIZ_URL, html! { "Practice the wrong book" })) }
        }
    }
}

pub fn chapters(chapters: &[String]) -> Markup {
    html! {
        h1 { "Chapters" }
        @if chapters.is_empty() {
            p { "The question bank is empty." }
        } @else {
            ul {
                @for chapter in chapters {
                    li { (nav_link(&names::chapter_url(chapter), html! { (chapter) })) }
                }
            }
        }
    }
}

pub fn search(keyword: &str, results: Option<&[Question]>) -> Markup {
    html! {
        h1 { "Search" }
        form hx-post=(names::SEARCH_URL) hx-target="main" hx-swap="innerHTML" {
            input type="search" name="keyword" value=(keyword) placeholder="Keyword in the question text";
            button type="submit" { "Search" }
        }
        @if let Some(results) = results {
            p { (results.len()) " result(s) for " mark { (keyword) } }
            @for question in results {
                (question_card(question))
            }
        }
    }
}

pub fn wrong_questions(entries: &[Question]) -> Markup {
    html! {
        h1 { "Wrong book" }
        @if entries.is_empty() {
            p { "No wrong questions recorded yet." }
        } @else {
            p {
                (entries.len()) " question(s). "
                (nav_link(names::WRONG_QUIZ_URL, html! { "Practice them" }))
            }
            @for entry in entries {
                (question_card(entry))
            }
        }
    }
}

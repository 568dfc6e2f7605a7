use maud::{html, Markup};

use crate::models::Question;

/// htmx navigation link with href fallback + hx-get for in-page swap.
pub fn nav_link(href: &str, body: Markup) -> Markup {
    html! {
        a href=(href)
          hx-get=(href)
          hx-target="main"
          hx-push-url="true"
          hx-swap="innerHTML" {
            (body)
        }
    }
}

/// Read-only rendering of a question with its options and answer.
pub fn question_card(question: &Question) -> Markup {
    html! {
        article {
            p."chapter-tag" { "#" (question.id) " · " (question.chapter) }
            p { strong { (question.question) } }
            ul {
                @for option in question.options() {
                    li { (option.letter) ". " (option.text) }
                }
            }
            p { "Answer: " strong."correct" { (question.answer_letter()) } }
        }
    }
}

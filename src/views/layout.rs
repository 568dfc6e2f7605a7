use maud::{html, Markup, DOCTYPE};

use crate::{names, utils, views::components::nav_link};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@2.0.4" {}
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li { (nav_link(names::INDEX_URL, html! { strong { "History Review" } })) }
                    li { (nav_link(names::CHAPTERS_URL, html! { "Chapters" })) }
                    li { (nav_link(names::QUIZ_URL, html! { "Random quiz" })) }
                    li { (nav_link(names::SEARCH_URL, html! { "Search" })) }
                    li { (nav_link(names::WRONG_QUESTIONS_URL, html! { "Wrong book" })) }
                }
                ul {
                    li { (utils::VERSION) }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())

            title { (format!("{title} - History Review")) }
        }

        body {
            (header())
            (main(body))
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - History Review" }
        (body)
    }
}

/// A fragment for htmx swaps, a full document otherwise.
pub fn render(is_htmx: bool, title: &str, body: Markup) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        page(title, body)
    }
}

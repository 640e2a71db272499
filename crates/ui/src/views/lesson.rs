use dioxus::prelude::*;

use quiz_core::UserIntent;

use crate::context::AppContext;
use crate::vm::LessonVm;

#[component]
pub fn LessonView(lesson: LessonVm) -> Element {
    let ctx = use_context::<AppContext>();
    let topic_id = lesson.topic_id.clone();

    rsx! {
        h3 { "{lesson.title} - Lesson" }
        // Sanitized in markdown_to_html.
        div { class: "lesson", dangerous_inner_html: "{lesson.lesson_html}" }
        div { class: "actions",
            button {
                class: "option-btn",
                onclick: move |_| ctx.dispatch(UserIntent::StartQuiz(topic_id.clone())),
                "Start Quiz on \"{lesson.title}\""
            }
        }
    }
}

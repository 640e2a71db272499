use dioxus::prelude::*;

use quiz_core::UserIntent;

use crate::context::AppContext;
use crate::vm::QuestionVm;

#[component]
pub fn QuizView(question: QuestionVm) -> Element {
    let locked = question.locked();
    let heading = question.heading();
    let progress = question.progress_label();

    rsx! {
        div { class: "question",
            strong { "{heading}" }
            div { class: "options",
                for (index, label) in question.options.iter().cloned().enumerate() {
                    OptionButton { key: "{index}", index, label, locked }
                }
            }
        }
        if let Some(feedback) = question.feedback.clone() {
            div {
                class: if feedback.correct { "feedback correct" } else { "feedback wrong" },
                "{feedback.message}"
            }
        }
        div { class: "small", "{progress}" }
    }
}

#[component]
fn OptionButton(index: usize, label: String, locked: bool) -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        button {
            class: "option-btn",
            disabled: locked,
            onclick: move |_| {
                if !locked {
                    ctx.dispatch(UserIntent::AnswerSelected(index));
                }
            },
            "{label}"
        }
    }
}

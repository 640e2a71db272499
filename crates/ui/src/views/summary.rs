use dioxus::prelude::*;

use quiz_core::UserIntent;

use crate::context::AppContext;
use crate::vm::SummaryVm;

#[component]
pub fn SummaryView(summary: SummaryVm) -> Element {
    let ctx = use_context::<AppContext>();
    let back_ctx = ctx.clone();
    let back_id = summary.topic_id.clone();
    let retake_id = summary.topic_id.clone();

    rsx! {
        h3 { "Quiz Complete" }
        dl { class: "summary",
            dt { "Topic" }
            dd { "{summary.topic_title}" }

            dt { "Correct Answers" }
            dd { "{summary.score_label}" }

            dt { "Points earned this quiz" }
            dd { "{summary.earned_xp}" }

            dt { "Completion bonus" }
            dd { "{summary.bonus}" }

            dt { "Time" }
            dd { "{summary.elapsed_label}" }
        }
        div { class: "actions",
            button {
                class: "option-btn",
                onclick: move |_| back_ctx.dispatch(UserIntent::BackToLesson(back_id.clone())),
                "Back to Lesson"
            }
            button {
                class: "option-btn",
                onclick: move |_| ctx.dispatch(UserIntent::Retake(retake_id.clone())),
                "Retake Quiz"
            }
        }
    }
}

use dioxus::prelude::*;

use crate::views::{LessonView, QuizView, StatsBar, SummaryView, TopicTiles};
use crate::vm::{ScreenVm, ViewVm};

#[component]
pub fn ScreenView(vm: ScreenVm) -> Element {
    rsx! {
        div { class: "app",
            nav { class: "sidebar",
                h1 { "Learn" }
                TopicTiles { topics: vm.topics.clone() }
            }
            main { class: "content",
                StatsBar { xp: vm.xp, level: vm.level, engagement: vm.engagement }
                section { class: "module-area",
                    match vm.view.clone() {
                        ViewVm::Welcome => rsx! {
                            p { class: "small", "Pick a topic to read its lesson." }
                        },
                        ViewVm::Lesson(lesson) => rsx! {
                            LessonView { lesson }
                        },
                        ViewVm::Question(question) => rsx! {
                            QuizView { question }
                        },
                        ViewVm::Summary(summary) => rsx! {
                            SummaryView { summary }
                        },
                        ViewVm::Error(message) => rsx! {
                            p { class: "error", "{message}" }
                        },
                    }
                }
            }
        }
    }
}

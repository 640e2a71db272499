use dioxus::prelude::*;

#[component]
pub fn StatsBar(xp: u64, level: u64, engagement: u8) -> Element {
    rsx! {
        div { class: "stats",
            span { "XP: " strong { id: "xp", "{xp}" } }
            span { "Level: " strong { id: "level", "{level}" } }
            span { "Avg engagement: " strong { id: "avgEng", "{engagement}" } "%" }
        }
    }
}

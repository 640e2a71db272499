use dioxus::prelude::*;

use quiz_core::UserIntent;

use crate::context::AppContext;
use crate::vm::TopicTileVm;

#[component]
pub fn TopicTiles(topics: Vec<TopicTileVm>) -> Element {
    rsx! {
        ul { class: "tiles",
            for tile in topics {
                li { key: "{tile.id}",
                    TopicTileButton { tile: tile.clone() }
                }
            }
        }
    }
}

#[component]
fn TopicTileButton(tile: TopicTileVm) -> Element {
    let ctx = use_context::<AppContext>();
    let id = tile.id.clone();

    rsx! {
        button {
            class: "tile",
            "data-topic": "{tile.id}",
            onclick: move |_| ctx.dispatch(UserIntent::SelectTopic(id.clone())),
            "{tile.title}"
        }
    }
}

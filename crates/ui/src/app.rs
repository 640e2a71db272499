use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ScreenView;
use crate::vm::ScreenVm;

const STYLE: &str = include_str!("../assets/style.css");

/// Root component. Folds the runtime's render stream into a `ScreenVm`.
#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_signal(ScreenVm::default);

    use_future(move || {
        let ctx = ctx.clone();
        async move {
            let mut screen = screen;
            let Some(mut renders) = ctx.take_renders() else {
                tracing::warn!("render stream already taken; screen will not update");
                return;
            };
            while let Some(command) = renders.recv().await {
                screen.write().apply(command);
            }
            tracing::debug!("render stream closed");
        }
    });

    rsx! {
        style { {STYLE} }
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                ScreenView { vm: screen() }
            }
        }
    }
}

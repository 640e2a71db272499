use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::RenderCommand;
use tokio::sync::mpsc;

use crate::context::{ChannelApp, UiApp, build_app_context};
use crate::views::ScreenView;
use crate::vm::ScreenVm;

#[component]
fn ScreenHarness(vm: ScreenVm) -> Element {
    use_context_provider(|| {
        let (intents, _intent_rx) = mpsc::unbounded_channel();
        let app: Arc<dyn UiApp> = Arc::new(ChannelApp::new("Learn (test)", intents, None));
        build_app_context(&app)
    });
    rsx! { ScreenView { vm } }
}

/// Render a screen model to HTML the way the desktop window would show it.
pub fn render_screen(vm: ScreenVm) -> String {
    let mut dom = VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps { vm });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

/// Fold render commands into a fresh screen model, then render it.
pub fn render_commands(commands: impl IntoIterator<Item = RenderCommand>) -> String {
    let mut vm = ScreenVm::default();
    for command in commands {
        vm.apply(command);
    }
    render_screen(vm)
}

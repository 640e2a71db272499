use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::{RenderCommand, UserIntent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use ui::{App, ChannelApp, UiApp, build_app_context};

/// Blocks until the window closes.
pub fn launch(
    intents: UnboundedSender<UserIntent>,
    renders: UnboundedReceiver<RenderCommand>,
) -> anyhow::Result<()> {
    let app: Arc<dyn UiApp> = Arc::new(ChannelApp::new("Learn", intents, Some(renders)));
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Learn")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

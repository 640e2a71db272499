use std::sync::{Arc, Mutex};

use quiz_core::{RenderCommand, UserIntent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Implemented by the composition root (e.g. `crates/app`) to connect the UI
/// to a running quiz runtime.
pub trait UiApp: Send + Sync {
    fn app_name(&self) -> &str;

    /// Where button clicks are sent.
    fn intents(&self) -> UnboundedSender<UserIntent>;

    /// The runtime's render stream. Handed out once.
    fn take_renders(&self) -> Option<UnboundedReceiver<RenderCommand>>;
}

#[derive(Clone)]
pub struct AppContext {
    app_name: String,
    intents: UnboundedSender<UserIntent>,
    renders: Arc<Mutex<Option<UnboundedReceiver<RenderCommand>>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app_name: app.app_name().to_string(),
            intents: app.intents(),
            renders: Arc::new(Mutex::new(app.take_renders())),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Forward a user intent to the runtime. Dropped with a warning if the
    /// runtime has stopped.
    pub fn dispatch(&self, intent: UserIntent) {
        if let Err(err) = self.intents.send(intent) {
            tracing::warn!(intent = ?err.0, "quiz runtime is gone; intent dropped");
        }
    }

    /// Take the render stream; `None` after the first call.
    #[must_use]
    pub fn take_renders(&self) -> Option<UnboundedReceiver<RenderCommand>> {
        take_slot(&self.renders)
    }
}

/// `UiApp` over a pair of channels to a running quiz runtime.
pub struct ChannelApp {
    app_name: String,
    intents: UnboundedSender<UserIntent>,
    renders: Mutex<Option<UnboundedReceiver<RenderCommand>>>,
}

impl ChannelApp {
    #[must_use]
    pub fn new(
        app_name: impl Into<String>,
        intents: UnboundedSender<UserIntent>,
        renders: Option<UnboundedReceiver<RenderCommand>>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            intents,
            renders: Mutex::new(renders),
        }
    }
}

impl UiApp for ChannelApp {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn intents(&self) -> UnboundedSender<UserIntent> {
        self.intents.clone()
    }

    fn take_renders(&self) -> Option<UnboundedReceiver<RenderCommand>> {
        take_slot(&self.renders)
    }
}

// A poisoned slot still holds a usable receiver.
fn take_slot<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    match slot.lock() {
        Ok(mut slot) => slot.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn dispatch_forwards_and_renders_are_taken_once() {
        let (intent_tx, mut intent_rx) = mpsc::unbounded_channel();
        let (_render_tx, render_rx) = mpsc::unbounded_channel();
        let app: Arc<dyn UiApp> = Arc::new(ChannelApp::new("Test", intent_tx, Some(render_rx)));
        let ctx = build_app_context(&app);

        ctx.dispatch(UserIntent::AnswerSelected(1));
        assert_eq!(intent_rx.try_recv().unwrap(), UserIntent::AnswerSelected(1));

        assert!(ctx.take_renders().is_some());
        assert!(ctx.clone().take_renders().is_none());
        assert_eq!(ctx.app_name(), "Test");
    }

    #[test]
    fn channel_app_hands_out_renders_once() {
        let (intent_tx, _intent_rx) = mpsc::unbounded_channel();
        let (_render_tx, render_rx) = mpsc::unbounded_channel();
        let app = ChannelApp::new("Learn", intent_tx, Some(render_rx));
        assert!(app.take_renders().is_some());
        assert!(app.take_renders().is_none());
    }

    #[test]
    fn poisoned_slot_still_yields_its_value() {
        let slot = Arc::new(Mutex::new(Some(7)));
        let poisoner = Arc::clone(&slot);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the slot");
        })
        .join();
        assert!(slot.is_poisoned());
        assert_eq!(take_slot(&slot), Some(7));
        assert_eq!(take_slot(&slot), None);
    }

    #[test]
    fn dispatch_after_runtime_stops_does_not_panic() {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        drop(intent_rx);
        let app: Arc<dyn UiApp> = Arc::new(ChannelApp::new("Test", intent_tx, None));
        build_app_context(&app).dispatch(UserIntent::StartQuiz("titration".into()));
    }
}

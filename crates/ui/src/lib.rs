pub mod app;
pub mod context;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, ChannelApp, UiApp, build_app_context};

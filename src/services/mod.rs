// WebStack services
// Stateless helpers and persistence: URL handling, favicon fetch, settings.

pub mod favicon;
pub mod navigation;
pub mod settings_engine;

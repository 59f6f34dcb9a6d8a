// WebStack UI layer (wry + tao)
// A single undecorated window hosting the chrome webview (sidebar) and one
// child webview per tab.

pub mod chrome;
pub mod shell;
pub mod surface;

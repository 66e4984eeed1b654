//! Terminal presentation: theme, the HTML body boundary, pure view models and
//! the interactive event loop.

pub mod components;
pub mod presenter;
pub mod rich_text;
pub mod tui;

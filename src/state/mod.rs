//! Reactive application state shared through Leptos context.

pub mod analytics;
pub mod session;

//! Networking modules for the REST API and the live operations feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token` persists credentials, `http` wraps every authenticated call
//! with the refresh-and-retry path, `api` exposes typed endpoints,
//! `session` owns the login/restore/logout lifecycle, and `live` manages
//! the reconnecting websocket feed. `types` defines the shared wire schema.

pub mod api;
pub mod http;
pub mod live;
pub mod session;
pub mod token;
pub mod types;

//! Leptos glue between the session layer and route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps signal and browser-event wiring out of the auth logic so the latter
//! stays testable without a DOM.

pub mod auth;

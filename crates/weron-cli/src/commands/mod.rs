//! Command handlers.

pub(crate) mod manager;

// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod actions;
pub mod api;
pub mod availability;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod types;

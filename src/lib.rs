//! repodeck: a browser dashboard for GitHub repositories.
//!
//! The [`core`] module holds everything that does not need a browser: tree
//! assembly, reference resolution, HTML rewriting and inlining, the GitHub
//! client and the dashboard facade. [`app`], [`components`] and [`utils`]
//! wire it into a Leptos CSR application.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

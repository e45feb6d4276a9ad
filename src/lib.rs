//! Terminal client for a school activities signup API.
//!
//! The [`board::Board`] controller loads the activity catalog, signs users up
//! and unregisters participants, re-fetching the whole catalog after every
//! change. [`render::render`] is the pure catalog-to-view step; the
//! [`interactive`] module draws that view in the terminal.

pub mod api;
pub mod board;
pub mod config;
pub mod delegate;
pub mod error;
pub mod feedback;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod render;

#![forbid(unsafe_code)]

//! Core types for tokenlens: geometry, input events, token sequences,
//! and attention matrices.
//!
//! Everything downstream (rendering, widgets, the app shell) builds on the
//! vocabulary defined here. This crate has no rendering or I/O concerns of
//! its own beyond converting crossterm input events into canonical form.

pub mod attention;
pub mod event;
pub mod geometry;
pub mod token;

pub use attention::{AttentionMatrix, ShapeError};
pub use event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use geometry::{Point, Rect};

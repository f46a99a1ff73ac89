//! # quality-filter
//!
//! Turns quality token selections (`1080p`, `HDR`, `Remux`, ...) into regex
//! fragments for release search boxes, and removes them again.
//!
//! The engine is pure: callers pass the current text and selection in and get
//! the next text or selection back. See [`filter`] for the pieces.

pub mod filter;

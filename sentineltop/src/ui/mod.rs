//! UI module root: exposes drawing functions for individual panels.

pub mod alerts;
pub mod charts;
pub mod header;
pub mod layout;
pub mod processes;
pub mod readouts;
pub mod theme;
pub mod util;

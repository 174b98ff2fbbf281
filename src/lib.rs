//! graph-axis: axis layout, tick generation and coordinate mapping for 2-D
//! graph widgets.
//!
//! `core` holds the pure math (nice numbers, tick sweeps, linear and log
//! scaling, screen mapping, scroll arithmetic). `api` wraps it in the
//! stateful [`Graph`] engine that owns axes, folds element data, sizes the
//! margins and answers mapping queries for drawing code.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod text;

pub use api::{AxisOptions, Graph, GraphConfig, GraphLayout};
pub use error::{GraphError, GraphResult};

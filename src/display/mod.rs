//! Hand-off to an external Graphviz viewer.
pub mod viewer;

pub use viewer::{open_in_browser, viewer_url, VIEWER_BASE_URL};

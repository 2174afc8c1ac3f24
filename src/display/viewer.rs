//! Builds links to the online Graphviz renderer and opens them with the
//! host's default browser. Producing the DOT text stays a pure function on
//! `OpenDigraph`; this module only transports it.

use crate::dot::DotOptions;
use crate::graph::{OpenDigraph, Result};
use std::process::Command;
use tracing::debug;
use url::form_urlencoded;
use url::Url;

pub const VIEWER_BASE_URL: &str = "https://dreampuf.github.io/GraphvizOnline/";

/// Link that renders `dot`: the description is percent-encoded into the
/// URL fragment.
pub fn viewer_url(dot: &str) -> Result<Url> {
    let mut url = Url::parse(VIEWER_BASE_URL)?;
    // `byte_serialize` writes spaces as '+', which the viewer would not decode.
    let encoded: String = form_urlencoded::byte_serialize(dot.as_bytes()).collect::<String>().replace('+', "%20");
    url.set_fragment(Some(&encoded));
    Ok(url)
}

/// Asks the host environment to open `url`. Returns once the launcher has
/// been spawned; whether a browser actually shows up is out of our hands.
pub fn open_in_browser(url: &Url) -> Result<()> {
    let mut command = launcher();
    command.arg(url.as_str()).spawn()?;
    debug!(url = %url, "opened viewer");
    Ok(())
}

#[cfg(target_os = "macos")]
fn launcher() -> Command { Command::new("open") }

#[cfg(target_os = "windows")]
fn launcher() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launcher() -> Command { Command::new("xdg-open") }

impl OpenDigraph {
    /// Link to the online renderer for this graph.
    pub fn viewer_url(&self, options: DotOptions) -> Result<Url> {
        viewer_url(&self.to_dot_string(options))
    }

    /// Opens the graph in the online renderer and returns the link used.
    pub fn display(&self, options: DotOptions) -> Result<Url> {
        let url = self.viewer_url(options)?;
        open_in_browser(&url)?;
        Ok(url)
    }
}

//! Default settings and well-known namespace URIs

use std::borrow::Cow;
use std::time::Duration;

/// How long a cached screen CTM stays fresh.
pub const SCREEN_CTM_TTL: Duration = Duration::from_millis(300);

/// Class marker identifying the viewport group.
pub const VIEWPORT_CLASS: &str = "viewport";

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const XML_EVENTS_NS: &str = "http://www.w3.org/2001/xml-events";

/// Knobs for [`SvgToolkit`](crate::SvgToolkit).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Class name the viewport group is created with and looked up by
    pub viewport_class: Cow<'static, str>,
    /// Staleness window for the screen CTM cache
    pub screen_ctm_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport_class: Cow::Borrowed(VIEWPORT_CLASS),
            screen_ctm_ttl: SCREEN_CTM_TTL,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.viewport_class = class.into();
        self
    }

    pub fn with_screen_ctm_ttl(mut self, ttl: Duration) -> Self {
        self.screen_ctm_ttl = ttl;
        self
    }
}

//! One object bundling a host, its screen CTM cache and configuration.

use crate::attributes::setup_attributes;
use crate::cache::ScreenCtmCache;
use crate::defaults::Config;
use crate::dimensions::{ResolvedDimensions, resolve_dimensions, resolve_dimensions_detailed};
use crate::errors::SvgError;
use crate::host::{Clock, PointerEvent, SvgHost};
use crate::point::{event_point, event_svg_root, relative_mouse_point, svg_center_point};
use crate::transform::apply_transform;
use crate::types::{Dimensions, Matrix, ScreenPoint, UserPoint};
use crate::viewport::get_or_create_viewport;

/// The primitives a pan/zoom controller needs, over one host.
pub struct SvgToolkit<H: SvgHost, C> {
    host: H,
    cache: ScreenCtmCache<H::Node, C>,
    config: Config,
}

impl<H: SvgHost, C: Clock> SvgToolkit<H, C> {
    pub fn new(host: H, clock: C) -> Self {
        Self::with_config(host, clock, Config::default())
    }

    pub fn with_config(host: H, clock: C, config: Config) -> Self {
        let cache = ScreenCtmCache::with_ttl(clock, config.screen_ctm_ttl);
        Self {
            host,
            cache,
            config,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn cache(&self) -> &ScreenCtmCache<H::Node, C> {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn resolve_dimensions(&self, svg: &H::Node) -> Dimensions {
        resolve_dimensions(&self.host, svg)
    }

    pub fn resolve_dimensions_detailed(&self, svg: &H::Node) -> ResolvedDimensions {
        resolve_dimensions_detailed(&self.host, svg)
    }

    pub fn get_or_create_viewport(&mut self, svg: &H::Node) -> Result<H::Node, SvgError> {
        get_or_create_viewport(&mut self.host, svg, &self.config.viewport_class)
    }

    pub fn setup_attributes(&mut self, svg: &H::Node) -> Result<(), SvgError> {
        setup_attributes(&mut self.host, svg)
    }

    pub fn apply_transform(&mut self, element: &H::Node, matrix: &Matrix) -> Result<(), SvgError> {
        apply_transform(&mut self.host, element, matrix)
    }

    pub fn cached_screen_ctm(&mut self, svg: &H::Node) -> Result<Matrix, SvgError> {
        self.cache.get(&self.host, svg)
    }

    pub fn relative_mouse_point(
        &mut self,
        svg: &H::Node,
        event: &PointerEvent<H::Node>,
    ) -> Result<UserPoint, SvgError> {
        relative_mouse_point(&self.host, &mut self.cache, svg, event)
    }

    pub fn event_svg_root(&self, event: &PointerEvent<H::Node>) -> Option<H::Node> {
        event_svg_root(&self.host, event)
    }

    pub fn event_point(&self, event: &PointerEvent<H::Node>) -> Result<ScreenPoint, SvgError> {
        event_point(&self.host, event)
    }

    pub fn svg_center_point(&self, svg: &H::Node) -> ScreenPoint {
        svg_center_point(&self.host, svg)
    }
}

//! Time-bounded cache for the screen CTM.
//!
//! `getScreenCTM` is slow on some engines and is needed on every pointer move during a
//! gesture, while the answer almost never changes mid-gesture. Each SVG element gets one
//! entry that is re-queried once it is older than the TTL (300 ms by default).
//!
//! The cache is an ordinary value owned by the caller, and time comes from an injected
//! [`Clock`], so tests can step time by hand.

use std::fmt;
use std::time::Duration;

use crate::defaults::SCREEN_CTM_TTL;
use crate::errors::SvgError;
use crate::host::{Clock, SvgHost};
use crate::log::trace;
use crate::types::Matrix;

#[derive(Debug, Clone)]
struct CacheEntry<N> {
    node: N,
    matrix: Matrix,
    fetched_at: Duration,
}

/// Screen CTMs keyed by element identity.
///
/// Entries are found by handle equality, so two structurally identical elements never
/// share an entry. There is one entry per managed SVG, so a linear scan is enough.
/// Entries are refreshed, never evicted.
#[derive(Debug, Clone)]
pub struct ScreenCtmCache<N, C> {
    entries: Vec<CacheEntry<N>>,
    ttl: Duration,
    clock: C,
}

impl<N: Clone + PartialEq + fmt::Debug, C: Clock> ScreenCtmCache<N, C> {
    pub fn new(clock: C) -> Self {
        Self::with_ttl(clock, SCREEN_CTM_TTL)
    }

    pub fn with_ttl(clock: C, ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
            clock,
        }
    }

    /// Screen CTM of `svg`, queried from `host` only when missing or stale.
    ///
    /// An entry is stale once `now - fetched_at` is strictly greater than the TTL.
    /// When the host has no CTM the call fails and the cache is left as it was.
    pub fn get<H>(&mut self, host: &H, svg: &N) -> Result<Matrix, SvgError>
    where
        H: SvgHost<Node = N>,
    {
        let now = self.clock.now();
        let ttl = self.ttl;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.node == *svg) {
            let age = now.saturating_sub(entry.fetched_at);
            if age > ttl {
                entry.matrix = host.screen_ctm(svg).ok_or(SvgError::NoScreenCtm)?;
                entry.fetched_at = now;
                trace!(?svg, ?age, "screen ctm refreshed");
            }
            return Ok(entry.matrix);
        }

        let matrix = host.screen_ctm(svg).ok_or(SvgError::NoScreenCtm)?;
        self.entries.push(CacheEntry {
            node: svg.clone(),
            matrix,
            fetched_at: now,
        });
        trace!(?svg, "screen ctm cached");
        Ok(matrix)
    }

    /// Cached matrix without touching the host or the clock.
    pub fn peek(&self, svg: &N) -> Option<Matrix> {
        self.entry(svg).map(|e| e.matrix)
    }

    /// When the entry for `svg` was last fetched.
    pub fn fetched_at(&self, svg: &N) -> Option<Duration> {
        self.entry(svg).map(|e| e.fetched_at)
    }

    fn entry(&self, svg: &N) -> Option<&CacheEntry<N>> {
        self.entries.iter().find(|e| e.node == *svg)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// Host abstraction: the page/window the visualization is mounted in.
//
// A host knows which mount elements exist, can hide one, reports the current
// viewport, hands out at most one render target per mount, and queues input
// events between frames. `HeadlessHost` is an in-memory implementation with
// a scripted event queue; it backs the CLI and every test in this crate.
//
// See also: `bridge.rs` for the code that consumes these events, `render.rs`
// for the targets handed out by `acquire_render_context`.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use shoebox_scene::input::Viewport;

use crate::render::{RenderTarget, SoftwareTarget};

/// Input delivered by the host between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Pointer moved to pixel `(x, y)` in viewport coordinates.
    PointerMove { x: f32, y: f32 },
    /// Page scrolled to vertical offset `y` in pixels.
    Scroll { y: f32 },
    Resize { width: u32, height: u32 },
}

/// Why the visualization could not start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeError {
    MissingMount(String),
    NoRenderingCapability,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::MissingMount(id) => write!(f, "mount element '{id}' not found"),
            ProbeError::NoRenderingCapability => write!(f, "no rendering capability available"),
        }
    }
}

impl std::error::Error for ProbeError {}

pub trait Host {
    fn element_exists(&self, id: &str) -> bool;
    fn hide_element(&mut self, id: &str);
    fn viewport(&self) -> Viewport;
    /// Probe for rendering support and create a target sized to `viewport`.
    fn acquire_render_context(
        &mut self,
        mount_id: &str,
        viewport: Viewport,
    ) -> Result<Box<dyn RenderTarget>, ProbeError>;
    /// Drain every event queued since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<HostEvent>;
}

// ---------------------------------------------------------------------------
// HeadlessHost
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct HeadlessHost {
    elements: BTreeSet<String>,
    hidden: BTreeSet<String>,
    viewport: Viewport,
    capable: bool,
    pending: VecDeque<HostEvent>,
}

impl HeadlessHost {
    /// A capable host with a single mount element.
    pub fn new(mount_id: &str, viewport: Viewport) -> Self {
        Self {
            elements: BTreeSet::from([mount_id.to_string()]),
            hidden: BTreeSet::new(),
            viewport,
            capable: true,
            pending: VecDeque::new(),
        }
    }

    /// Make every later `acquire_render_context` fail.
    pub fn without_rendering(mut self) -> Self {
        self.capable = false;
        self
    }

    pub fn queue(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }
}

impl Host for HeadlessHost {
    fn element_exists(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn hide_element(&mut self, id: &str) {
        if self.elements.contains(id) {
            self.hidden.insert(id.to_string());
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn acquire_render_context(
        &mut self,
        mount_id: &str,
        viewport: Viewport,
    ) -> Result<Box<dyn RenderTarget>, ProbeError> {
        if !self.element_exists(mount_id) {
            return Err(ProbeError::MissingMount(mount_id.to_string()));
        }
        if !self.capable {
            return Err(ProbeError::NoRenderingCapability);
        }
        Ok(Box::new(SoftwareTarget::new(viewport)))
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        let events: Vec<HostEvent> = self.pending.drain(..).collect();
        // The host's own metrics follow its resize events.
        for event in &events {
            if let HostEvent::Resize { width, height } = *event {
                self.viewport = Viewport::new(width, height);
            }
        }
        events
    }
}

//! Host capability detection.
//!
//! Two optional host capabilities affect behavior: a gesture library (taps
//! instead of native clicks) and animation-completion events (exit
//! animations gate teardown). Both are probed once at startup; the rest of
//! the crate consumes the resulting strategy value instead of re-checking.

/// How pointer handlers are bound. The two backends are functionally
/// equivalent; which one is used depends on whether the host ships a
/// gesture library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerBackend {
    NativeClicks,
    GestureTaps,
}

/// Answers the one-shot capability probes for a concrete host.
pub trait EnvironmentProbe {
    fn has_gesture_library(&self) -> bool;
    fn supports_animation_end(&self) -> bool;
}

/// Capabilities detected once at controller startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub pointer: PointerBackend,
    /// Whether the host delivers animation-completion events; when false,
    /// close teardown is immediate instead of animation-gated.
    pub animation_end: bool,
}

impl Capabilities {
    pub fn detect(probe: &dyn EnvironmentProbe) -> Self {
        let pointer = if probe.has_gesture_library() {
            PointerBackend::GestureTaps
        } else {
            PointerBackend::NativeClicks
        };
        Self {
            pointer,
            animation_end: probe.supports_animation_end(),
        }
    }

    /// Convenience for hosts without animation-completion events.
    pub fn without_animation_end(mut self) -> Self {
        self.animation_end = false;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            pointer: PointerBackend::NativeClicks,
            animation_end: true,
        }
    }
}

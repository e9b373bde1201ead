//! Arrow-key nudging of the focused shape.
//!
//! Every key press produces a new value right away. The commit that follows
//! is debounced: it fires once the keyboard has been quiet for the configured
//! delay, or immediately when focus leaves the shape. The core owns no timer;
//! the host passes monotonic timestamps and polls [`Debouncer::poll`].

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::drag;
use super::handles::CropHandle;
use super::layout::ToolLayout;
use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::geometry::Point;
use crate::model::CropAndHotspot;

/// The keys the editor responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Unit direction in screen space (y down).
    fn direction(self) -> Point {
        match self {
            Key::ArrowUp => Point::new(0.0, -1.0),
            Key::ArrowDown => Point::new(0.0, 1.0),
            Key::ArrowLeft => Point::new(-1.0, 0.0),
            Key::ArrowRight => Point::new(1.0, 0.0),
        }
    }
}

impl FromStr for Key {
    type Err = ToolError;

    /// Parse a DOM `KeyboardEvent.key` value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" => Ok(Key::ArrowUp),
            "ArrowDown" => Ok(Key::ArrowDown),
            "ArrowLeft" => Ok(Key::ArrowLeft),
            "ArrowRight" => Ok(Key::ArrowRight),
            _ => Err(ToolError::UnknownKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn is_resize(self) -> bool {
        self.ctrl || self.meta
    }
}

/// The shape keyboard input drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusTarget {
    Hotspot,
    Crop,
}

impl FromStr for FocusTarget {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotspot" => Ok(FocusTarget::Hotspot),
            "crop" => Ok(FocusTarget::Crop),
            _ => Err(ToolError::UnknownFocusTarget(s.to_string())),
        }
    }
}

/// Trailing-edge debounce driven by host timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    /// An idle debouncer that waits `delay` after the last schedule.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the quiet period at `now`. Deadlines saturate at
    /// `Duration::MAX`.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire early. Returns `true` if something was pending.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the pending commit is due, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

/// Compute the value after one key press on `focus`.
///
/// The step is `keyboard_step_px` editor pixels, times `shift_multiplier`
/// with Shift. With Ctrl or Meta the shape is resized instead of moved,
/// using the same math as a pointer drag; the crop resizes through its
/// bottom-right handle.
pub fn nudge(
    value: &CropAndHotspot,
    focus: FocusTarget,
    key: Key,
    modifiers: Modifiers,
    layout: &ToolLayout,
    config: &ToolConfig,
) -> CropAndHotspot {
    let mut step = config.keyboard_step_px;
    if modifiers.shift {
        step *= config.shift_multiplier;
    }
    let delta = layout.normalize_delta(Point::ZERO, key.direction().scale(step));

    match (focus, modifiers.is_resize()) {
        (FocusTarget::Hotspot, false) => drag::move_hotspot(value, delta),
        (FocusTarget::Hotspot, true) => drag::resize_hotspot(value, delta),
        (FocusTarget::Crop, false) => drag::move_crop(value, delta),
        (FocusTarget::Crop, true) => {
            drag::resize_crop(value, CropHandle::BottomRight, delta, config.min_crop_size)
        }
    }
}

/// Focus and commit-debounce state for keyboard editing.
#[derive(Debug, Clone)]
pub struct KeyboardControls {
    focus: Option<FocusTarget>,
    debounce: Debouncer,
}

impl KeyboardControls {
    /// Unfocused controls committing `commit_delay` after the last key.
    pub fn new(commit_delay: Duration) -> Self {
        Self {
            focus: None,
            debounce: Debouncer::new(commit_delay),
        }
    }

    /// The shape arrow keys currently drive.
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus
    }

    /// Move focus to `target`. A commit pending for the previous shape is
    /// flushed; returns `true` in that case.
    pub fn focus(&mut self, target: FocusTarget) -> bool {
        let flushed = self.focus != Some(target) && self.debounce.flush();
        self.focus = Some(target);
        flushed
    }

    /// Drop focus. Returns `true` when a pending commit was flushed.
    pub fn blur(&mut self) -> bool {
        self.focus = None;
        self.debounce.flush()
    }

    /// Handle a key press at `now`.
    ///
    /// Returns the new value, or `None` when nothing has focus.
    pub fn key_down(
        &mut self,
        value: &CropAndHotspot,
        key: Key,
        modifiers: Modifiers,
        now: Duration,
        layout: &ToolLayout,
        config: &ToolConfig,
    ) -> Option<CropAndHotspot> {
        let focus = self.focus?;
        self.debounce.schedule(now);
        Some(nudge(value, focus, key, modifiers, layout, config))
    }

    /// Returns `true` when the debounced commit is due.
    pub fn poll(&mut self, now: Duration) -> bool {
        self.debounce.poll(now)
    }

    /// When the pending commit is due, if any.
    pub fn pending_commit_deadline(&self) -> Option<Duration> {
        self.debounce.deadline()
    }

    /// Drop the pending commit without firing it.
    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
    }
}

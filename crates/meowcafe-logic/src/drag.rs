//! Single-owner drag session.
//!
//! At most one object is grabbed at a time. An object is identified by a
//! value-typed handle `H` (an ECS entity, an index, ...) and described by
//! two shapes:
//!
//! - the **hit** rectangle the pointer must land in to pick it up;
//! - the **body** that follows the pointer and is tested against drop zones.
//!
//! For most objects both are the same rectangle. Powder tins pick up on the
//! tin but move a separate pour overlay, so the two differ.
//!
//! ```
//! use meowcafe_logic::drag::DragSession;
//! use meowcafe_logic::geometry::{Rect, Vec2};
//!
//! let mut drag = DragSession::new();
//! let tin = Rect::new(0.0, 0.0, 50.0, 50.0);
//! assert!(drag.begin(1u32, tin, tin.top_left(), Vec2::new(10.0, 10.0)));
//! // A second grab is ignored while the first is held.
//! assert!(!drag.begin(2u32, tin, tin.top_left(), Vec2::new(10.0, 10.0)));
//! assert_eq!(drag.follow(Vec2::new(110.0, 60.0)), Some((1, Vec2::new(100.0, 50.0))));
//! assert_eq!(drag.end(), Some(1));
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Vec2};

/// The grabbed object and where on its body the pointer holds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grab<H> {
    pub handle: H,
    /// Pointer position minus the body's top-left at grab time.
    pub offset: Vec2,
}

/// Drag state owned by a session; replaces any process-wide "current
/// object" reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession<H> {
    grab: Option<Grab<H>>,
}

impl<H: Copy + PartialEq> DragSession<H> {
    pub fn new() -> Self {
        Self { grab: None }
    }

    /// Handle of the grabbed object, if any.
    pub fn current(&self) -> Option<H> {
        self.grab.map(|g| g.handle)
    }

    pub fn grab(&self) -> Option<&Grab<H>> {
        self.grab.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Try to pick up `handle`.
    ///
    /// Succeeds only when nothing is held and `pointer` is inside `hit`.
    /// The offset is measured from `body_top_left`. Returns whether the grab
    /// took; a refused grab has no side effect.
    pub fn begin(&mut self, handle: H, hit: Rect, body_top_left: Vec2, pointer: Vec2) -> bool {
        if self.grab.is_some() || !hit.contains(pointer) {
            return false;
        }
        self.grab = Some(Grab {
            handle,
            offset: pointer - body_top_left,
        });
        true
    }

    /// New top-left for the held body: the pointer minus the grab offset,
    /// with no smoothing.
    pub fn follow(&self, pointer: Vec2) -> Option<(H, Vec2)> {
        self.grab.map(|g| (g.handle, pointer - g.offset))
    }

    /// Release whatever is held. Always leaves the session empty; returns
    /// `None` when nothing was held.
    pub fn end(&mut self) -> Option<H> {
        self.grab.take().map(|g| g.handle)
    }
}

impl<H: Copy + PartialEq> Default for DragSession<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do with a released body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropDecision {
    /// Overlaps the zone and may be dropped: run the zone's accept action.
    Accept,
    /// Send the body back to its origin.
    Return,
}

/// Decide a release: accept only if the object can be dropped and its body
/// overlaps the zone.
pub fn decide_drop(body: Rect, zone: Rect, drop_capable: bool) -> DropDecision {
    if drop_capable && !zone.is_degenerate() && body.intersects(&zone) {
        DropDecision::Accept
    } else {
        DropDecision::Return
    }
}

/// Resting top-left for an object snapped into a zone.
pub fn snap_position(zone: Rect, offset: Vec2) -> Vec2 {
    zone.top_left() + offset
}

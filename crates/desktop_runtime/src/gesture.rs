//! Scoped ownership of the global pointer listeners a drag or resize needs.
//!
//! A gesture attaches `pointermove`, `pointerup` and `pointercancel` listeners to the window when
//! it starts. [`GestureSession`] owns those handles and detaches them when dropped, so ending the
//! gesture, cancelling it, and unmounting the component mid-gesture all release them.

use std::{cell::RefCell, rc::Rc};

use leptos::{ev, leptos_dom::helpers::WindowListenerHandle, window_event_listener};

use crate::model::Point;

/// A registration that can be undone exactly once.
pub trait Detach {
    fn detach(self);
}

impl Detach for WindowListenerHandle {
    fn detach(self) {
        self.remove();
    }
}

/// Listener handles held for the lifetime of one gesture.
pub struct GestureSession<H: Detach> {
    handles: Vec<H>,
}

impl<H: Detach> GestureSession<H> {
    pub fn new(handles: Vec<H>) -> Self {
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H: Detach> Drop for GestureSession<H> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.detach();
        }
    }
}

/// How the pointer left a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    Released(Point),
    Cancelled,
}

pub(crate) fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> Point {
    Point::new(ev.client_x(), ev.client_y())
}

/// Per-component slot holding at most one live pointer gesture.
pub struct GestureSlot<H: Detach = WindowListenerHandle>(Rc<RefCell<Option<GestureSession<H>>>>);

impl<H: Detach> Clone for GestureSlot<H> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<H: Detach> Default for GestureSlot<H> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<H: Detach> GestureSlot<H> {
    /// Takes ownership of a new gesture's handles, detaching whatever the slot held before.
    pub fn hold(&self, handles: Vec<H>) {
        let previous = self.0.borrow_mut().replace(GestureSession::new(handles));
        drop(previous);
    }

    /// Detaches the current gesture's listeners, if any.
    pub fn release(&self) {
        let session = self.0.borrow_mut().take();
        drop(session);
    }

    pub fn is_active(&self) -> bool {
        self.0.borrow().is_some()
    }
}

impl GestureSlot<WindowListenerHandle> {
    /// Attaches global pointer listeners, replacing any gesture already held.
    ///
    /// The slot is emptied before `on_end` runs, so the listeners never outlive the gesture.
    pub fn start(
        &self,
        on_move: impl Fn(Point) + 'static,
        on_end: impl Fn(GestureEnd) + 'static,
    ) {
        let on_end = Rc::new(on_end);

        let move_listener = window_event_listener(ev::pointermove, move |ev| {
            on_move(pointer_from_pointer_event(&ev));
        });
        let up_listener = {
            let slot = self.clone();
            let on_end = Rc::clone(&on_end);
            window_event_listener(ev::pointerup, move |ev| {
                slot.release();
                on_end(GestureEnd::Released(pointer_from_pointer_event(&ev)));
            })
        };
        let cancel_listener = {
            let slot = self.clone();
            window_event_listener(ev::pointercancel, move |_| {
                slot.release();
                on_end(GestureEnd::Cancelled);
            })
        };

        self.hold(vec![move_listener, up_listener, cancel_listener]);
    }
}

//! The collaborator a background is mounted into.
//!
//! A [`Host`] schedules frames, delivers resize notifications and reports the
//! viewport size. It plays the role a browser window plays for a canvas: the
//! calls take `&self` and the host keeps its own bookkeeping behind interior
//! mutability, so a mounted background can hold a handle to it.
//!
//! Frame scheduling is explicit. [`Host::request_frame`] returns a
//! [`FrameHandle`]; the host later hands that handle back to
//! [`Background::on_frame`](crate::Background::on_frame), which runs exactly
//! one frame and requests the next. Cancelling the handle is the only way to
//! stop the loop.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use crate::palette::Theme;

/// Token for one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Token for one registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

/// Scheduling and viewport services provided to a mounted background.
pub trait Host {
    /// Current viewport size in pixels.
    fn viewport(&self) -> (u32, u32);

    /// Ask for one frame before the next repaint.
    fn request_frame(&self) -> FrameHandle;

    /// Withdraw a frame request. Unknown or already-delivered handles are
    /// ignored.
    fn cancel_frame(&self, handle: FrameHandle);

    /// Start forwarding viewport resizes.
    fn add_resize_listener(&self) -> ListenerHandle;

    /// Stop forwarding viewport resizes.
    fn remove_resize_listener(&self, handle: ListenerHandle);
}

impl<H: Host + ?Sized> Host for Rc<H> {
    fn viewport(&self) -> (u32, u32) {
        (**self).viewport()
    }
    fn request_frame(&self) -> FrameHandle {
        (**self).request_frame()
    }
    fn cancel_frame(&self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
    fn add_resize_listener(&self) -> ListenerHandle {
        (**self).add_resize_listener()
    }
    fn remove_resize_listener(&self, handle: ListenerHandle) {
        (**self).remove_resize_listener(handle)
    }
}

impl<H: Host + ?Sized> Host for &H {
    fn viewport(&self) -> (u32, u32) {
        (**self).viewport()
    }
    fn request_frame(&self) -> FrameHandle {
        (**self).request_frame()
    }
    fn cancel_frame(&self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
    fn add_resize_listener(&self) -> ListenerHandle {
        (**self).add_resize_listener()
    }
    fn remove_resize_listener(&self, handle: ListenerHandle) {
        (**self).remove_resize_listener(handle)
    }
}

/// The dark/light flag shared between the host and a mounted background.
///
/// The host writes it whenever the page theme changes; the background reads
/// it once at the start of every frame.
#[derive(Debug, Clone, Default)]
pub struct ThemeFlag(Rc<Cell<Theme>>);

impl ThemeFlag {
    pub fn new(theme: Theme) -> Self {
        Self(Rc::new(Cell::new(theme)))
    }

    pub fn get(&self) -> Theme {
        self.0.get()
    }

    pub fn set(&self, theme: Theme) {
        self.0.set(theme);
    }

    /// Flip between dark and light, returning the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}

/// A host driven by hand.
///
/// Nothing happens on its own: callers pop due frames with
/// [`take_frame`](ManualHost::take_frame) and deliver them. Used for tests
/// and headless rendering.
#[derive(Debug)]
pub struct ManualHost {
    viewport: Cell<(u32, u32)>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<FrameHandle>>,
    listeners: RefCell<BTreeSet<ListenerHandle>>,
    requested: Cell<u64>,
    cancelled: Cell<u64>,
}

impl ManualHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Cell::new((width, height)),
            next_id: Cell::new(1),
            pending: RefCell::default(),
            listeners: RefCell::default(),
            requested: Cell::new(0),
            cancelled: Cell::new(0),
        }
    }

    /// Change the reported viewport. Delivering the resize is up to the
    /// caller, and only meaningful while a listener is registered.
    pub fn set_viewport(&self, width: u32, height: u32) {
        self.viewport.set((width, height));
    }

    /// Pop the oldest frame that is still scheduled.
    pub fn take_frame(&self) -> Option<FrameHandle> {
        self.pending.borrow_mut().pop_front()
    }

    /// Frames scheduled and not yet delivered or cancelled.
    pub fn pending_frames(&self) -> Vec<FrameHandle> {
        self.pending.borrow().iter().copied().collect()
    }

    /// Currently registered resize listeners.
    pub fn resize_listeners(&self) -> Vec<ListenerHandle> {
        self.listeners.borrow().iter().copied().collect()
    }

    /// Whether any resize listener is registered.
    pub fn has_resize_listener(&self) -> bool {
        !self.listeners.borrow().is_empty()
    }

    /// Total calls to `request_frame`.
    pub fn frames_requested(&self) -> u64 {
        self.requested.get()
    }

    /// Total cancellations that removed a scheduled frame.
    pub fn frames_cancelled(&self) -> u64 {
        self.cancelled.get()
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Host for ManualHost {
    fn viewport(&self) -> (u32, u32) {
        self.viewport.get()
    }

    fn request_frame(&self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending.borrow_mut().push_back(handle);
        self.requested.set(self.requested.get() + 1);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|h| *h != handle);
        if pending.len() != before {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    fn add_resize_listener(&self) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id());
        self.listeners.borrow_mut().insert(handle);
        handle
    }

    fn remove_resize_listener(&self, handle: ListenerHandle) {
        self.listeners.borrow_mut().remove(&handle);
    }
}

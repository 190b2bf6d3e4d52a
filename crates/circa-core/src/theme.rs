//! Theme variants and the observable theme state.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// The active color scheme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Light,
    #[default]
    Dark,
}

impl ThemeVariant {
    /// The other variant.
    pub fn toggled(self) -> Self {
        match self {
            ThemeVariant::Light => ThemeVariant::Dark,
            ThemeVariant::Dark => ThemeVariant::Light,
        }
    }
}

/// A value held once per theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemePair<T> {
    pub light: T,
    pub dark: T,
}

impl<T> ThemePair<T> {
    /// The value for the given variant.
    pub fn get(&self, variant: ThemeVariant) -> &T {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
        }
    }
}

/// Global animation speed setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to the circle field's base drift speed.
    pub fn multiplier(self) -> f64 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct ThemeStateInner {
    value: ThemeVariant,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// An externally-owned observable theme value.
///
/// Holds the current [`ThemeVariant`] and a set of change listeners.
/// Clones share the same underlying state. Single-threaded by design; the
/// whole application runs on one thread.
#[derive(Clone, Default)]
pub struct ThemeState {
    inner: Rc<RefCell<ThemeStateInner>>,
}

impl ThemeState {
    /// Create a theme state with an initial variant.
    pub fn new(value: ThemeVariant) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ThemeStateInner {
                value,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// The current variant.
    pub fn get(&self) -> ThemeVariant {
        self.inner.borrow().value
    }

    /// Set the variant, notifying listeners only when it actually changes.
    pub fn set(&self, value: ThemeVariant) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                false
            } else {
                inner.value = value;
                true
            }
        };

        if changed {
            self.notify();
        }
    }

    /// Flip between light and dark.
    pub fn toggle(&self) {
        self.set(self.get().toggled());
    }

    /// Register a change listener.
    ///
    /// The listener fires on every value change until the returned
    /// subscription is released (explicitly or by dropping it).
    pub fn subscribe(&self, listener: impl FnMut() + 'static) -> ThemeSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(RefCell::new(listener))));
            id
        };

        ThemeSubscription {
            state: Rc::downgrade(&self.inner),
            id,
            active: true,
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self) {
        // Snapshot the listener list so callbacks may subscribe or
        // unsubscribe without holding the borrow.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in listeners {
            (listener.borrow_mut())();
        }
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("value", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle for a registered theme listener.
///
/// Releases the listener exactly once: either through
/// [`ThemeSubscription::unsubscribe`] or on drop.
#[derive(Debug)]
pub struct ThemeSubscription {
    state: Weak<RefCell<ThemeStateInner>>,
    id: u64,
    active: bool,
}

impl ThemeSubscription {
    /// Remove the listener from the theme state.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

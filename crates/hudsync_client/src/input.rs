//! Named mouse-callback registry.
//!
//! The host runtime exposes exactly one global mouse hook. Panels that
//! each install their own hook clobber each other, so this registry is
//! the single hook's fan-out: panels register under a name, and the
//! aggregated dispatch answers the host's "was this event consumed?"
//! question.

/// What the mouse did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseStatus {
    /// A button went down.
    Pressed,
    /// A button went down twice quickly.
    DoublePressed,
    /// A button came back up.
    Released,
    /// The wheel moved; the argument carries the direction.
    Wheeled,
}

impl MouseStatus {
    /// Maps the host runtime's status string, if it is one we know.
    #[must_use]
    pub fn from_host(status: &str) -> Option<Self> {
        match status {
            "pressed" => Some(Self::Pressed),
            "doublepressed" => Some(Self::DoublePressed),
            "released" => Some(Self::Released),
            "wheeled" => Some(Self::Wheeled),
            _ => None,
        }
    }
}

/// Mouse callback. Returns `true` to consume the event.
///
/// The argument is the button id, or the wheel direction for
/// [`MouseStatus::Wheeled`].
pub type MouseCallbackFn = Box<dyn FnMut(MouseStatus, i32) -> bool + Send>;

/// Insertion-ordered registry of named mouse callbacks.
///
/// Same identity rules as the store's listener registry: names are
/// unique, re-registering replaces in place, removal is by name.
#[derive(Default)]
pub struct MouseCallbacks {
    entries: Vec<(String, MouseCallbackFn)>,
}

impl MouseCallbacks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`, replacing any existing entry
    /// with that name in place.
    pub fn register(&mut self, name: impl Into<String>, callback: MouseCallbackFn) {
        let name = name.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            *slot = callback;
            return;
        }
        self.entries.push((name, callback));
    }

    /// Removes the callback registered under `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() != before
    }

    /// Feeds one mouse event to every callback, in registration order.
    ///
    /// Every callback runs even after one consumes the event; the result
    /// is whether *any* of them did. The host uses it to decide whether
    /// the event still reaches the game world.
    pub fn dispatch(&mut self, status: MouseStatus, button: i32) -> bool {
        let mut consumed = false;
        for (_, callback) in &mut self.entries {
            if callback(status, button) {
                consumed = true;
            }
        }
        consumed
    }

    /// Number of callbacks registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for MouseCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseCallbacks")
            .field("entries", &self.entries.len())
            .finish()
    }
}

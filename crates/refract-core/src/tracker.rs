//! Event dispatch over a file traversal.
//!
//! A [`Tracker`] owns named events. Each event has one or more patterns and
//! any number of listeners. The traversal driver calls
//! [`Tracker::track_import`] for every import statement first and then
//! [`Tracker::feed`] for every node in pre-order; whenever one of an event's
//! patterns matches a fed node, the event's listeners run with the node and
//! its captures.

use tracing::{debug, trace};

use crate::capture::CaptureMap;
use crate::context::FileContext;
use crate::pattern::Pattern;

const TRACKER_TARGET: &str = "refract_core::tracker";

/// A listener callback.
///
/// Listeners receive the match and the file context, which gives them the
/// source text, scope resolver and binding table needed to plan a fix.
pub type Listener<'l> = Box<dyn for<'t> FnMut(&TrackedMatch<'t>, &FileContext<'t>) + 'l>;

/// One fired event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedMatch<'t> {
    event: String,
    node: tree_sitter::Node<'t>,
    captures: CaptureMap<'t>,
}

impl<'t> TrackedMatch<'t> {
    /// Returns the name of the event that fired.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the node the pattern matched at.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    /// Returns the captures recorded by the match.
    #[must_use]
    pub const fn captures(&self) -> &CaptureMap<'t> {
        &self.captures
    }

    /// Consumes the match, returning its captures.
    #[must_use]
    pub fn into_captures(self) -> CaptureMap<'t> {
        self.captures
    }
}

struct Event<'l> {
    name: String,
    patterns: Vec<Pattern>,
    listeners: Vec<Listener<'l>>,
}

/// Dispatches pattern matches to listeners.
///
/// Events fire in registration order. Within one event, patterns are tried
/// in registration order and the first match fires the event once for the
/// node; different events may fire for the same node.
#[derive(Default)]
pub struct Tracker<'l> {
    events: Vec<Event<'l>>,
}

impl<'l> Tracker<'l> {
    /// Creates a tracker with no events.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Returns the event called `name`, creating it if needed.
    fn event_mut(&mut self, name: &str) -> Option<&mut Event<'l>> {
        let index = self
            .events
            .iter()
            .position(|event| event.name == name)
            .unwrap_or_else(|| {
                self.events.push(Event {
                    name: name.to_owned(),
                    patterns: Vec::new(),
                    listeners: Vec::new(),
                });
                self.events.len().saturating_sub(1)
            });
        self.events.get_mut(index)
    }

    /// Associates `pattern` with `event`.
    ///
    /// Registering a pattern identical to one the event already has is a
    /// no-op. Returns whether the pattern was added.
    pub fn register(&mut self, event: &str, pattern: Pattern) -> bool {
        let Some(slot) = self.event_mut(event) else {
            return false;
        };
        if slot.patterns.contains(&pattern) {
            debug!(target: TRACKER_TARGET, event, "ignored duplicate pattern");
            return false;
        }
        slot.patterns.push(pattern);
        true
    }

    /// Adds a listener to `event`.
    pub fn listen<F>(&mut self, event: &str, listener: F)
    where
        F: for<'t> FnMut(&TrackedMatch<'t>, &FileContext<'t>) + 'l,
    {
        if let Some(slot) = self.event_mut(event) {
            slot.listeners.push(Box::new(listener));
        }
    }

    /// Returns the registered event names in registration order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|event| event.name.as_str())
    }

    /// Records an import statement in the file's binding table.
    ///
    /// Must be called for every import of the file, in source order, before
    /// any node that could refer to an imported name is fed. Returns whether
    /// the statement was recognised.
    pub fn track_import<'t>(&self, ctx: &mut FileContext<'t>, node: tree_sitter::Node<'t>) -> bool {
        ctx.record_import(node)
    }

    /// Attempts every event's patterns at `node` and runs the listeners of
    /// each event that matched.
    ///
    /// Returns the number of events that fired.
    pub fn feed<'t>(&mut self, node: tree_sitter::Node<'t>, ctx: &FileContext<'t>) -> usize {
        trace!(target: TRACKER_TARGET, kind = node.kind(), start = node.start_byte(), "feed");
        let mut fired = 0;
        for event in &mut self.events {
            let Some(found) = first_match(&event.name, &event.patterns, node, ctx) else {
                continue;
            };
            debug!(
                target: TRACKER_TARGET,
                event = %event.name,
                kind = node.kind(),
                start = node.start_byte(),
                captures = found.captures.len(),
                "event fired"
            );
            for listener in &mut event.listeners {
                listener(&found, ctx);
            }
            fired += 1;
        }
        fired
    }

    /// Collects the events that would fire at `node` without running any
    /// listener.
    #[must_use]
    pub fn matches<'t>(&self, node: tree_sitter::Node<'t>, ctx: &FileContext<'t>) -> Vec<TrackedMatch<'t>> {
        self.events
            .iter()
            .filter_map(|event| first_match(&event.name, &event.patterns, node, ctx))
            .collect()
    }
}

fn first_match<'t>(
    event: &str,
    patterns: &[Pattern],
    node: tree_sitter::Node<'t>,
    ctx: &FileContext<'t>,
) -> Option<TrackedMatch<'t>> {
    patterns.iter().find_map(|pattern| {
        pattern.matches(node, ctx).map(|captures| TrackedMatch {
            event: event.to_owned(),
            node,
            captures,
        })
    })
}

impl std::fmt::Debug for Tracker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for event in &self.events {
            list.entry(&format_args!(
                "{} ({} patterns, {} listeners)",
                event.name,
                event.patterns.len(),
                event.listeners.len()
            ));
        }
        list.finish()
    }
}

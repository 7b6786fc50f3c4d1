//! Column and row containers over a retained tree of event nodes.
//!
//! A container owns the items, the timeline style and one mounted node per
//! item. Mutations only mark the tree dirty; the next [`layout`] pass
//! reconciles nodes by key, rebuilding just the ones whose item or position
//! changed, then measures and stacks them along the main axis.
//!
//! [`layout`]: JetLimeContainer::layout

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use jetlime_core::{JetLimeError, Rect, Result, Size, Vec2};
use tracing::{debug, warn};

use crate::animation::{radius_factor, PulseDriver};
use crate::content::EventContent;
use crate::draw::{paint_event, Canvas, DrawList};
use crate::extended::{layout_extended, DEFAULT_ADDITIONAL_MAX_WIDTH};
use crate::layout::{EventGeometry, LayoutDirection};
use crate::position::EventPosition;
use crate::style::{Arrangement, EventStyle, JetLimeStyle};

// ── ItemsList ───────────────────────────────────────────────────

/// Ordered items compared by value, so an unchanged list is a no-op update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemsList<T> {
    items: Vec<T>,
}

impl<T> ItemsList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for ItemsList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ItemsList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ItemsList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ── Nodes ───────────────────────────────────────────────────────

/// A plain event: point, lines and one content block.
pub struct EventNode {
    pub style: EventStyle,
    pub content: Box<dyn EventContent>,
}

/// An event with an additional block on the far side of the line.
pub struct ExtendedEventNode {
    pub style: EventStyle,
    pub primary: Option<Box<dyn EventContent>>,
    pub additional: Option<Box<dyn EventContent>>,
    pub max_additional_width: f32,
}

impl ExtendedEventNode {
    pub fn new(style: EventStyle) -> Self {
        Self {
            style,
            primary: None,
            additional: None,
            max_additional_width: DEFAULT_ADDITIONAL_MAX_WIDTH,
        }
    }

    pub fn primary(mut self, content: impl EventContent + 'static) -> Self {
        self.primary = Some(Box::new(content));
        self
    }

    pub fn additional(mut self, content: impl EventContent + 'static) -> Self {
        self.additional = Some(Box::new(content));
        self
    }

    pub fn max_additional_width(mut self, width: f32) -> Self {
        self.max_additional_width = width;
        self
    }
}

/// Node of the retained timeline tree, one per item.
pub enum TimelineNode {
    Event(EventNode),
    Extended(ExtendedEventNode),
}

impl TimelineNode {
    pub fn event(style: EventStyle, content: impl EventContent + 'static) -> Self {
        TimelineNode::Event(EventNode {
            style,
            content: Box::new(content),
        })
    }

    pub fn style(&self) -> &EventStyle {
        match self {
            TimelineNode::Event(node) => &node.style,
            TimelineNode::Extended(node) => &node.style,
        }
    }

    /// Same node with its style moved to `position`.
    pub fn with_position(mut self, position: EventPosition) -> Self {
        match &mut self {
            TimelineNode::Event(node) => node.style = node.style.clone().with_position(position),
            TimelineNode::Extended(node) => node.style = node.style.clone().with_position(position),
        }
        self
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, TimelineNode::Extended(_))
    }
}

impl From<ExtendedEventNode> for TimelineNode {
    fn from(node: ExtendedEventNode) -> Self {
        TimelineNode::Extended(node)
    }
}

impl fmt::Debug for TimelineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_extended() { "Extended" } else { "Event" };
        f.debug_struct(kind).field("style", self.style()).finish_non_exhaustive()
    }
}

// ── Layout output ───────────────────────────────────────────────

/// One event placed in container coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub index: usize,
    /// Top-left corner of the event box in content coordinates.
    pub offset: Vec2,
    pub geometry: EventGeometry,
    /// Additional block of an extended event, event-local.
    pub additional: Option<Rect>,
}

impl PlacedEvent {
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.offset, self.geometry.size)
    }

    /// Anchor in content coordinates.
    pub fn anchor(&self) -> Vec2 {
        self.offset + self.geometry.anchor
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub arrangement: Arrangement,
    pub direction: LayoutDirection,
    pub viewport: Size,
    pub events: Vec<PlacedEvent>,
    /// Total length of all events along the main axis.
    pub content_extent: f32,
    /// Largest event extent across the main axis.
    pub cross_extent: f32,
    generation: u64,
}

impl TimelineLayout {
    fn viewport_main(&self) -> f32 {
        match self.arrangement {
            Arrangement::Vertical => self.viewport.height,
            Arrangement::Horizontal => self.viewport.width,
        }
    }

    /// Furthest the content can scroll.
    pub fn max_scroll(&self) -> f32 {
        let viewport = self.viewport_main();
        if viewport.is_finite() {
            (self.content_extent - viewport).max(0.0)
        } else {
            0.0
        }
    }

    /// Shift from content to viewport coordinates at `scroll`.
    pub fn scroll_translation(&self, scroll: f32) -> Vec2 {
        match (self.arrangement, self.direction) {
            (Arrangement::Vertical, _) => Vec2::new(0.0, -scroll),
            (Arrangement::Horizontal, LayoutDirection::Ltr) => Vec2::new(-scroll, 0.0),
            // RTL rows start at the right edge and scroll towards the left.
            (Arrangement::Horizontal, LayoutDirection::Rtl) => {
                Vec2::new(scroll - self.max_scroll(), 0.0)
            }
        }
    }

    /// Whether `rect` (viewport coordinates) intersects the viewport along the
    /// main axis, with `slack` extra room on both ends.
    fn is_visible(&self, rect: Rect, slack: f32) -> bool {
        let viewport = self.viewport_main();
        if !viewport.is_finite() {
            return true;
        }
        let (start, len) = match self.arrangement {
            Arrangement::Vertical => (rect.y, rect.height),
            Arrangement::Horizontal => (rect.x, rect.width),
        };
        start + len >= -slack && start <= viewport + slack
    }
}

/// What the last reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub built: usize,
    pub reused: usize,
    pub removed: usize,
}

// ── Containers ──────────────────────────────────────────────────

/// Main axis of a container.
pub trait ContainerAxis {
    const ARRANGEMENT: Arrangement;
}

/// Marker for vertical containers.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAxis;

/// Marker for horizontal containers.
#[derive(Debug, Clone, Copy)]
pub struct RowAxis;

impl ContainerAxis for ColumnAxis {
    const ARRANGEMENT: Arrangement = Arrangement::Vertical;
}

impl ContainerAxis for RowAxis {
    const ARRANGEMENT: Arrangement = Arrangement::Horizontal;
}

/// Vertical timeline.
pub type JetLimeColumn<T, K> = JetLimeContainer<T, K, ColumnAxis>;
/// Horizontal timeline.
pub type JetLimeRow<T, K> = JetLimeContainer<T, K, RowAxis>;

type KeyFn<T, K> = Box<dyn Fn(&T) -> K>;
type BuildFn<T> = Box<dyn Fn(usize, &T, EventPosition) -> TimelineNode>;

struct Mounted<T, K> {
    key: K,
    index: usize,
    item: T,
    position: EventPosition,
    node: TimelineNode,
    pulse: Option<PulseDriver>,
}

/// Scrollable timeline container. Use [`JetLimeColumn`] or [`JetLimeRow`].
pub struct JetLimeContainer<T, K, A> {
    items: ItemsList<T>,
    style: JetLimeStyle,
    key_fn: KeyFn<T, K>,
    builder: BuildFn<T>,
    mounted: Vec<Mounted<T, K>>,
    dirty: bool,
    generation: u64,
    last_sync: SyncStats,
    scroll: f32,
    max_scroll: f32,
    _axis: PhantomData<A>,
}

impl<T, K> JetLimeContainer<T, K, ColumnAxis>
where
    T: Clone + PartialEq,
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a vertical timeline. `key` must be unique per item.
    pub fn new(
        items: impl Into<ItemsList<T>>,
        style: JetLimeStyle,
        key: impl Fn(&T) -> K + 'static,
        builder: impl Fn(usize, &T, EventPosition) -> TimelineNode + 'static,
    ) -> Self {
        Self::with_axis(items.into(), style, Box::new(key), Box::new(builder))
    }
}

impl<T, K> JetLimeContainer<T, K, RowAxis>
where
    T: Clone + PartialEq,
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a horizontal timeline. `key` must be unique per item.
    pub fn new(
        items: impl Into<ItemsList<T>>,
        style: JetLimeStyle,
        key: impl Fn(&T) -> K + 'static,
        builder: impl Fn(usize, &T, EventPosition) -> TimelineNode + 'static,
    ) -> Self {
        Self::with_axis(items.into(), style, Box::new(key), Box::new(builder))
    }
}

impl<T, K, A> JetLimeContainer<T, K, A>
where
    T: Clone + PartialEq,
    K: Eq + Hash + Clone + fmt::Debug,
    A: ContainerAxis,
{
    fn with_axis(items: ItemsList<T>, style: JetLimeStyle, key_fn: KeyFn<T, K>, builder: BuildFn<T>) -> Self {
        Self {
            items,
            style: style.with_arrangement(A::ARRANGEMENT),
            key_fn,
            builder,
            mounted: Vec::new(),
            dirty: true,
            generation: 0,
            last_sync: SyncStats::default(),
            scroll: 0.0,
            max_scroll: 0.0,
            _axis: PhantomData,
        }
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        self.generation += 1;
    }

    pub fn items(&self) -> &ItemsList<T> {
        &self.items
    }

    /// Replace all items. Equal lists are ignored.
    pub fn set_items(&mut self, items: impl Into<ItemsList<T>>) {
        let items = items.into();
        if items != self.items {
            self.items = items;
            self.invalidate();
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.invalidate();
    }

    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
        self.invalidate();
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        let removed = self.items.remove(index);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    pub fn style(&self) -> &JetLimeStyle {
        &self.style
    }

    /// Replace the timeline style; the arrangement stays fixed.
    pub fn set_style(&mut self, style: JetLimeStyle) {
        self.style = style.with_arrangement(A::ARRANGEMENT);
        self.generation += 1;
    }

    pub fn last_sync(&self) -> SyncStats {
        self.last_sync
    }

    /// Mounted node for `index`, as of the last layout pass.
    pub fn node(&self, index: usize) -> Option<&TimelineNode> {
        self.mounted.get(index).map(|m| &m.node)
    }

    pub fn position_of(&self, index: usize) -> Option<EventPosition> {
        self.mounted.get(index).map(|m| m.position)
    }

    pub fn pulse(&self, index: usize) -> Option<&PulseDriver> {
        self.mounted.get(index).and_then(|m| m.pulse.as_ref())
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll
    }

    /// Scroll along the main axis, clamped to the content. Returns the new
    /// offset.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.scroll = (self.scroll + delta).clamp(0.0, self.max_scroll);
        }
        self.scroll
    }

    /// Advance every pulse by `dt` seconds. Returns whether any pulse is
    /// still running, i.e. whether another frame is needed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let mut running = false;
        for pulse in self.mounted.iter_mut().filter_map(|m| m.pulse.as_mut()) {
            pulse.tick(dt);
            running |= pulse.is_running();
        }
        running
    }

    /// Reconcile mounted nodes with the items.
    fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let count = self.items.len();
        let keys: Vec<K> = self.items.iter().map(|item| (self.key_fn)(item)).collect();
        let duplicate = {
            let mut seen = HashSet::with_capacity(count);
            keys.iter().find(|k| !seen.insert(*k)).cloned()
        };
        if let Some(duplicate) = duplicate {
            warn!(key = ?duplicate, "duplicate item key");
            return Err(JetLimeError::config(format!(
                "item key {duplicate:?} is used more than once"
            )));
        }

        let mut previous: HashMap<K, Mounted<T, K>> = self
            .mounted
            .drain(..)
            .map(|m| (m.key.clone(), m))
            .collect();
        let mut stats = SyncStats::default();
        let mut next = Vec::with_capacity(count);

        for ((index, item), key) in self.items.iter().enumerate().zip(keys) {
            let position = EventPosition::dynamic(index, count);
            match previous.remove(&key) {
                Some(m) if m.index == index && m.position == position && m.item == *item => {
                    stats.reused += 1;
                    next.push(m);
                }
                old => {
                    let node = (self.builder)(index, item, position).with_position(position);
                    let old_pulse = old.and_then(|m| m.pulse);
                    let pulse = node.style().point_animation().copied().map(|spec| match old_pulse {
                        Some(p) if p.spec() == &spec => p,
                        _ => PulseDriver::new(spec),
                    });
                    stats.built += 1;
                    next.push(Mounted {
                        key,
                        index,
                        item: item.clone(),
                        position,
                        node,
                        pulse,
                    });
                }
            }
        }

        for (_, mut m) in previous {
            if let Some(pulse) = m.pulse.as_mut() {
                pulse.stop();
            }
            stats.removed += 1;
        }

        debug!(
            built = stats.built,
            reused = stats.reused,
            removed = stats.removed,
            "timeline nodes reconciled"
        );
        self.mounted = next;
        self.last_sync = stats;
        self.dirty = false;
        Ok(())
    }

    /// Measure and place every event inside `viewport`.
    ///
    /// The viewport's cross extent is filled; its main extent bounds
    /// scrolling. Either may be infinite.
    pub fn layout(&mut self, viewport: Size, direction: LayoutDirection) -> Result<TimelineLayout> {
        self.sync()?;

        let arrangement = A::ARRANGEMENT;
        let style = &self.style;
        let cross_viewport = match arrangement {
            Arrangement::Vertical => viewport.width,
            Arrangement::Horizontal => viewport.height,
        };

        let cross_of = |geometry: &EventGeometry| match arrangement {
            Arrangement::Vertical => geometry.size.width,
            Arrangement::Horizontal => geometry.size.height,
        };

        // (measured content of plain events, geometry, additional block)
        let mut measured = Vec::with_capacity(self.mounted.len());
        for mounted in &self.mounted {
            match &mounted.node {
                TimelineNode::Event(node) => {
                    let available = match arrangement {
                        Arrangement::Vertical => Size::new(cross_viewport, f32::INFINITY),
                        Arrangement::Horizontal => Size::new(f32::INFINITY, cross_viewport),
                    };
                    let max = EventGeometry::content_max_size(available, style, &node.style);
                    let content = node.content.measure(max);
                    let geometry = EventGeometry::compute(content, cross_viewport, style, &node.style, direction);
                    measured.push((Some(content), geometry, None));
                }
                TimelineNode::Extended(node) => {
                    let extended = layout_extended(
                        node.primary.as_deref(),
                        node.additional.as_deref(),
                        cross_viewport,
                        node.max_additional_width,
                        style,
                        &node.style,
                    )?;
                    measured.push((None, extended.event, extended.additional));
                }
            }
        }

        // Unbounded cross axis: every plain event spans the widest one so
        // end-aligned anchors stay on one line.
        if !cross_viewport.is_finite() {
            let widest = measured.iter().map(|(_, g, _)| cross_of(g)).fold(0.0f32, f32::max);
            for (mounted, (content, geometry, _)) in self.mounted.iter().zip(measured.iter_mut()) {
                if let (TimelineNode::Event(node), Some(content)) = (&mounted.node, content) {
                    *geometry = EventGeometry::compute(*content, widest, style, &node.style, direction);
                }
            }
        }

        let mut events = Vec::with_capacity(measured.len());
        let mut cursor = 0.0f32;
        let mut cross_extent = 0.0f32;

        for (index, (_, geometry, additional)) in measured.into_iter().enumerate() {
            let (offset, main) = match arrangement {
                Arrangement::Vertical => (Vec2::new(0.0, cursor), geometry.size.height),
                Arrangement::Horizontal => (Vec2::new(cursor, 0.0), geometry.size.width),
            };
            cursor += main;
            cross_extent = cross_extent.max(cross_of(&geometry));
            events.push(PlacedEvent {
                index,
                offset,
                geometry,
                additional,
            });
        }

        let mut layout = TimelineLayout {
            arrangement,
            direction,
            viewport,
            events,
            content_extent: cursor,
            cross_extent,
            generation: self.generation,
        };

        if arrangement == Arrangement::Horizontal && direction == LayoutDirection::Rtl {
            // First item at the right end of the content span.
            let viewport_main = layout.viewport_main();
            let span = if viewport_main.is_finite() {
                cursor.max(viewport_main)
            } else {
                cursor
            };
            for placed in &mut layout.events {
                placed.offset.x = span - placed.offset.x - placed.geometry.size.width;
            }
        }

        self.max_scroll = layout.max_scroll();
        self.scroll = self.scroll.clamp(0.0, self.max_scroll);
        debug!(
            items = layout.events.len(),
            extent = layout.content_extent,
            max_scroll = self.max_scroll,
            "timeline laid out"
        );
        Ok(layout)
    }

    /// Paint the visible events of `layout` onto `canvas`. Returns how many
    /// events were painted.
    ///
    /// Fails if the items or style changed since `layout` was computed.
    pub fn paint(&self, layout: &TimelineLayout, canvas: &mut dyn Canvas) -> Result<usize> {
        if layout.generation != self.generation || self.dirty {
            return Err(JetLimeError::config(
                "layout is stale; run layout again after changing items or style",
            ));
        }

        let shift = layout.scroll_translation(self.scroll);
        let mut list = DrawList::new();
        let mut painted = 0;

        for placed in &layout.events {
            let Some(mounted) = self.mounted.get(placed.index) else {
                continue;
            };
            let event_style = mounted.node.style();
            let slack = event_style.point_radius() * 2.0;
            if !layout.is_visible(placed.bounds().translate(shift), slack) {
                continue;
            }

            list.clear();
            let factor = radius_factor(mounted.pulse.as_ref());
            paint_event(&placed.geometry, &self.style, event_style, factor, &mut list);
            match &mounted.node {
                TimelineNode::Event(node) => node.content.paint(placed.geometry.content, &mut list),
                TimelineNode::Extended(node) => {
                    if let Some(primary) = &node.primary {
                        primary.paint(placed.geometry.content, &mut list);
                    }
                    if let (Some(additional), Some(rect)) = (&node.additional, placed.additional) {
                        additional.paint(rect, &mut list);
                    }
                }
            }
            list.replay(canvas, placed.offset + shift);
            painted += 1;
        }
        Ok(painted)
    }
}

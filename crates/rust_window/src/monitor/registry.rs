//! Fixed-capacity monitor registry
//!
//! Wayland announces outputs from inside a registry listener, where the
//! library must not allocate. The registry therefore owns a pool of nodes
//! created up front and threads them onto two singly linked lists:
//!
//! ```text
//!   active: head ─► [n2] ─► [n0] ─► [n4] ◄─ tail
//!   free:   head ─► [n1] ─► [n3]
//! ```
//!
//! Adding pops a node from `free` and appends it to `active`; removing
//! splices a node out of `active` (O(1) given its predecessor) and pushes
//! it onto `free`. Every node is on exactly one list, and the pool never
//! grows or shrinks after construction.

use crate::foundation::geometry::Point;

use super::{Monitor, MonitorId};

#[derive(Debug, Clone)]
struct MonitorNode {
    monitor: Option<Monitor>,
    next: Option<MonitorId>,
}

/// Pool of monitor nodes split into active and free lists
#[derive(Debug, Clone)]
pub struct MonitorRegistry {
    nodes: Box<[MonitorNode]>,
    active_head: Option<MonitorId>,
    active_tail: Option<MonitorId>,
    free_head: Option<MonitorId>,
    count: usize,
}

impl MonitorRegistry {
    /// Create a registry holding at most `capacity` monitors
    ///
    /// Capacity is clamped to `u16::MAX` nodes.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(usize::from(u16::MAX));
        let nodes: Box<[MonitorNode]> = (0..capacity)
            .map(|i| MonitorNode {
                monitor: None,
                // Pre-link the free list in index order.
                next: (i + 1 < capacity).then(|| Self::id_of(i + 1)),
            })
            .collect();

        Self {
            free_head: (capacity > 0).then(|| Self::id_of(0)),
            nodes,
            active_head: None,
            active_tail: None,
            count: 0,
        }
    }

    /// Pool size
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of registered monitors
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no monitor is registered
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Register a monitor; `None` when the pool is exhausted
    pub fn add(&mut self, monitor: Monitor) -> Option<MonitorId> {
        let id = self.free_head?;
        let node = &mut self.nodes[id.index()];
        self.free_head = node.next;
        node.monitor = Some(monitor);
        node.next = None;

        match self.active_tail {
            Some(tail) => self.nodes[tail.index()].next = Some(id),
            None => self.active_head = Some(id),
        }
        self.active_tail = Some(id);
        self.count += 1;
        Some(id)
    }

    /// Unregister `node`, whose predecessor in the active list is `prev`
    ///
    /// `prev` must be `None` exactly when `node` is the head of the active
    /// list (see [`find`](Self::find)). Returns the removed monitor, or
    /// `None` if the pair does not describe an active link.
    pub fn remove(&mut self, node: MonitorId, prev: Option<MonitorId>) -> Option<Monitor> {
        // Only occupied nodes are on the active list.
        let active = |id: MonitorId| self.nodes.get(id.index()).is_some_and(|n| n.monitor.is_some());
        let linked = active(node)
            && match prev {
                None => self.active_head == Some(node),
                Some(p) => active(p) && self.nodes[p.index()].next == Some(node),
            };
        if !linked {
            log::warn!("Monitor node {:?} is not linked after {:?}", node, prev);
            return None;
        }

        let next = self.nodes[node.index()].next;
        match prev {
            None => self.active_head = next,
            Some(p) => self.nodes[p.index()].next = next,
        }
        if self.active_tail == Some(node) {
            self.active_tail = prev;
        }

        let slot = &mut self.nodes[node.index()];
        slot.next = self.free_head;
        self.free_head = Some(node);
        self.count -= 1;
        slot.monitor.take()
    }

    /// First active monitor matching `predicate`, with its predecessor
    pub fn find(
        &self,
        mut predicate: impl FnMut(&Monitor) -> bool,
    ) -> Option<(MonitorId, Option<MonitorId>)> {
        let mut prev = None;
        let mut cursor = self.active_head;
        while let Some(id) = cursor {
            let node = &self.nodes[id.index()];
            if node.monitor.as_ref().is_some_and(&mut predicate) {
                return Some((id, prev));
            }
            prev = Some(id);
            cursor = node.next;
        }
        None
    }

    /// Monitor stored in an active node
    pub fn get(&self, id: MonitorId) -> Option<&Monitor> {
        self.nodes.get(id.index())?.monitor.as_ref()
    }

    /// Mutable access to a monitor stored in an active node
    pub fn get_mut(&mut self, id: MonitorId) -> Option<&mut Monitor> {
        self.nodes.get_mut(id.index())?.monitor.as_mut()
    }

    /// Active monitors in connection order
    pub fn iter(&self) -> impl Iterator<Item = (MonitorId, &Monitor)> + '_ {
        let mut cursor = self.active_head;
        std::iter::from_fn(move || {
            let id = cursor?;
            let node = &self.nodes[id.index()];
            cursor = node.next;
            node.monitor.as_ref().map(|m| (id, m))
        })
    }

    /// The first connected monitor
    pub fn primary(&self) -> Option<&Monitor> {
        self.get(self.active_head?)
    }

    /// Monitor whose work area contains `point`
    pub fn monitor_at(&self, point: Point) -> Option<&Monitor> {
        self.iter().map(|(_, m)| m).find(|m| m.contains(point))
    }

    /// Return every active node to the free list
    pub fn clear(&mut self) {
        while let Some(head) = self.active_head {
            self.remove(head, None);
        }
    }

    /// Number of nodes on the free list
    pub fn free_len(&self) -> usize {
        let mut len = 0;
        let mut cursor = self.free_head;
        while let Some(id) = cursor {
            len += 1;
            cursor = self.nodes[id.index()].next;
        }
        len
    }

    #[allow(clippy::cast_possible_truncation)]
    fn id_of(index: usize) -> MonitorId {
        // Capacity is clamped to u16::MAX in `new`.
        MonitorId::from_index(index as u16)
    }
}

//! `OrderQueue` — timed release plus FIFO dispatch buffer.

use std::collections::{BTreeMap, VecDeque};

use gf_core::{OrderId, Tick};

use crate::Order;

/// Owns the whole order stream for a run.
///
/// Orders start *unreleased* in a tick-keyed map.  [`release_due`]
/// moves everything with `created <= now` into the pending FIFO, preserving
/// creation order (the artifact is sorted by tick, ties by position).  The
/// dispatcher scans `pending` in FIFO order, removes an order on assignment
/// with [`take`], and puts it back at the head with [`push_front`] when an
/// assignment falls through.
///
/// [`release_due`]: Self::release_due
/// [`take`]: Self::take
/// [`push_front`]: Self::push_front
pub struct OrderQueue {
    /// All orders ever submitted, by id.
    orders: BTreeMap<OrderId, Order>,
    /// Not yet released: creation tick → ids in submission order.
    future: BTreeMap<Tick, Vec<OrderId>>,
    /// Released, awaiting assignment, FIFO.
    pending: VecDeque<OrderId>,
}

impl OrderQueue {
    pub fn new(orders: Vec<Order>) -> Self {
        let mut future: BTreeMap<Tick, Vec<OrderId>> = BTreeMap::new();
        let mut by_id = BTreeMap::new();
        for order in orders {
            future.entry(order.created).or_default().push(order.id);
            by_id.insert(order.id, order);
        }
        Self { orders: by_id, future, pending: VecDeque::new() }
    }

    // ── Release ───────────────────────────────────────────────────────────

    /// Move all orders with `created <= now` into the pending FIFO.
    ///
    /// Returns how many were released this call.
    pub fn release_due(&mut self, now: Tick) -> usize {
        let mut released = 0;
        // split_off keeps ticks > now in `future`; everything else drains
        // into the FIFO in ascending tick order.
        let still_future = self.future.split_off(&(now + 1));
        for (_, ids) in std::mem::replace(&mut self.future, still_future) {
            released += ids.len();
            self.pending.extend(ids);
        }
        released
    }

    // ── Dispatch interface ────────────────────────────────────────────────

    /// Released orders awaiting assignment, in FIFO order.
    pub fn pending(&self) -> impl Iterator<Item = &Order> + '_ {
        self.pending.iter().map(|id| &self.orders[id])
    }

    /// Remove `id` from the pending FIFO (it was assigned).
    ///
    /// Returns `false` if the order was not pending.
    pub fn take(&mut self, id: OrderId) -> bool {
        match self.pending.iter().position(|&p| p == id) {
            Some(pos) => {
                self.pending.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Return a failed assignment to the head of the queue.
    pub fn push_front(&mut self, id: OrderId) {
        debug_assert!(self.orders.contains_key(&id));
        self.pending.push_front(id);
    }

    // ── Lookups & counts ──────────────────────────────────────────────────

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Total orders ever submitted.
    pub fn total(&self) -> usize {
        self.orders.len()
    }

    /// Orders released but not yet assigned.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Orders whose creation tick has not come up yet.
    pub fn unreleased_count(&self) -> usize {
        self.future.values().map(Vec::len).sum()
    }

    /// Orders submitted with `created <= horizon` (the denominator of the
    /// conservation property).
    pub fn submitted_by(&self, horizon: Tick) -> usize {
        self.orders.values().filter(|o| o.created <= horizon).count()
    }
}

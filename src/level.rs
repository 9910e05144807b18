use crate::models::{Order, Side};
use crate::pool::Pool;

/// A resting order as stored in the order pool: the submitted fields plus
/// the residual quantity and the intrusive FIFO links for its price level.
/// `prev`/`next` are slot indices into the same pool.
#[derive(Debug, Clone)]
pub(crate) struct OrderEntry {
    pub id: u64,
    pub side: Side,
    pub price: f64,
    pub qty: u64,
    pub timestamp_ns: u64,
    pub is_active: bool,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl OrderEntry {
    pub fn new(order: &Order) -> Self {
        Self {
            id: order.id,
            side: order.side,
            price: order.price,
            qty: order.qty,
            timestamp_ns: order.timestamp_ns,
            is_active: true,
            prev: None,
            next: None,
        }
    }
}

/// All orders resting at one (side, price) pair: a FIFO of order slots
/// plus the running totals the snapshot reports.
#[derive(Debug, Clone)]
pub(crate) struct PriceLevel {
    pub price: f64,
    pub total_quantity: u64,
    pub order_count: usize,
    pub head: Option<usize>,
    pub tail: Option<usize>,
}

impl PriceLevel {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            total_quantity: 0,
            order_count: 0,
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Link an order at the FIFO tail and fold it into the totals.
    pub fn append(&mut self, slot: usize, orders: &mut Pool<OrderEntry>) {
        let tail = self.tail;
        {
            let order = &mut orders[slot];
            order.is_active = true;
            order.prev = tail;
            order.next = None;
            self.total_quantity += order.qty;
        }
        match tail {
            Some(t) => orders[t].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.order_count += 1;
    }

    /// Unlink an order from anywhere in the FIFO and mark it inactive,
    /// subtracting its residual from the totals. No-op if the order is
    /// already inactive.
    pub fn detach(&mut self, slot: usize, orders: &mut Pool<OrderEntry>) {
        let (prev, next, qty) = {
            let order = &mut orders[slot];
            if !order.is_active {
                return;
            }
            order.is_active = false;
            (order.prev, order.next, order.qty)
        };
        match prev {
            Some(p) => orders[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => orders[n].prev = prev,
            None => self.tail = prev,
        }
        self.total_quantity -= qty;
        self.order_count -= 1;
    }
}

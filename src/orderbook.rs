use rustc_hash::FxHashMap;
use tracing::warn;

use crate::error::RejectError;
use crate::level::{OrderEntry, PriceLevel};
use crate::models::{
    BookSnapshot, LevelSnapshot, Order, Side, Trade, MAX_ORDER_QUANTITY, MAX_PRICE, MIN_PRICE,
};
use crate::pool::Pool;
use crate::side::{AskBook, BidBook};

/// A single-instrument central limit order book with continuous
/// price-time priority matching.
///
/// All operations are synchronous and the book is not thread-safe;
/// callers serialize events externally. Trades produced while matching
/// are collected in an internal buffer exposed through
/// [`trades`](OrderBook::trades) until the caller drains it with
/// [`clear_trades`](OrderBook::clear_trades).
#[derive(Debug)]
pub struct OrderBook {
    pub(crate) bids: BidBook,
    pub(crate) asks: AskBook,
    pub(crate) index: FxHashMap<u64, usize>,
    pub(crate) orders: Pool<OrderEntry>,
    pub(crate) levels: Pool<PriceLevel>,
    pub(crate) trades: Vec<Trade>,
    pub(crate) last_trade: Option<Trade>,
    pub(crate) traded_volume: u64,
    pub(crate) matching_in_progress: bool,
    pub(crate) version: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

fn acknowledge(result: Result<(), RejectError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("{err}");
            false
        }
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            index: FxHashMap::default(),
            orders: Pool::new(),
            levels: Pool::new(),
            trades: Vec::new(),
            last_trade: None,
            traded_volume: 0,
            matching_in_progress: false,
            version: 0,
        }
    }

    /// Submit a limit order, then run matching. Returns `true` on
    /// acceptance, even if the order is fully consumed by matching within
    /// the same call; rejections are logged and return `false` with the
    /// book unchanged.
    pub fn add(&mut self, order: Order) -> bool {
        acknowledge(self.try_add(order))
    }

    /// [`add`](OrderBook::add) with the rejection reason.
    pub fn try_add(&mut self, order: Order) -> Result<(), RejectError> {
        if order.id == 0 {
            return Err(RejectError::InvalidIdentifier);
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&order.price) {
            return Err(RejectError::InvalidPrice { price: order.price });
        }
        if order.qty == 0 || order.qty > MAX_ORDER_QUANTITY {
            return Err(RejectError::InvalidQuantity {
                quantity: order.qty,
            });
        }
        if self.index.contains_key(&order.id) {
            return Err(RejectError::DuplicateId { id: order.id });
        }

        let slot = self.orders.allocate(OrderEntry::new(&order));
        let level = self.level_at(order.side, order.price);
        self.levels[level].append(slot, &mut self.orders);
        self.index.insert(order.id, slot);
        self.version += 1;
        self.match_orders();
        Ok(())
    }

    /// Cancel a resting order, erasing its level if it empties. Returns
    /// `false` for an unknown or already-inactive id, with the book
    /// unchanged.
    pub fn cancel(&mut self, id: u64) -> bool {
        acknowledge(self.try_cancel(id))
    }

    /// [`cancel`](OrderBook::cancel) with the rejection reason.
    pub fn try_cancel(&mut self, id: u64) -> Result<(), RejectError> {
        if id == 0 {
            return Err(RejectError::InvalidIdentifier);
        }
        let slot = *self.index.get(&id).ok_or(RejectError::UnknownId { id })?;
        if !self.orders[slot].is_active {
            // Reclaim the stale entry, but report the failure.
            self.index.remove(&id);
            self.orders.release(slot);
            return Err(RejectError::InactiveOrder { id });
        }

        let (side, price) = {
            let order = &self.orders[slot];
            (order.side, order.price)
        };
        if let Some(level) = self.level_lookup(side, price) {
            self.levels[level].detach(slot, &mut self.orders);
            self.erase_level_if_empty(level, side);
        }
        self.index.remove(&id);
        self.orders.release(slot);
        self.version += 1;
        Ok(())
    }

    /// Change the price and/or quantity of a resting order. A pure
    /// quantity change keeps the order's FIFO position; a price change
    /// moves it to the tail of the target level. Amending never triggers
    /// matching, so an amend that crosses the book leaves it crossed until
    /// the next [`add`](OrderBook::add) or explicit
    /// [`match_orders`](OrderBook::match_orders).
    pub fn amend(&mut self, id: u64, price: f64, qty: u64) -> bool {
        acknowledge(self.try_amend(id, price, qty))
    }

    /// [`amend`](OrderBook::amend) with the rejection reason.
    pub fn try_amend(&mut self, id: u64, price: f64, qty: u64) -> Result<(), RejectError> {
        if id == 0 {
            return Err(RejectError::InvalidIdentifier);
        }
        let slot = *self.index.get(&id).ok_or(RejectError::UnknownId { id })?;
        if !self.orders[slot].is_active {
            return Err(RejectError::InactiveOrder { id });
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
            return Err(RejectError::InvalidPrice { price });
        }
        if qty == 0 || qty > MAX_ORDER_QUANTITY {
            return Err(RejectError::InvalidQuantity { quantity: qty });
        }

        let (side, old_price, old_qty) = {
            let order = &self.orders[slot];
            (order.side, order.price, order.qty)
        };

        if price.to_bits() == old_price.to_bits() {
            if let Some(level) = self.level_lookup(side, old_price) {
                let entry = &mut self.levels[level];
                entry.total_quantity = entry.total_quantity - old_qty + qty;
            }
            self.orders[slot].qty = qty;
        } else {
            if let Some(level) = self.level_lookup(side, old_price) {
                self.levels[level].detach(slot, &mut self.orders);
                self.erase_level_if_empty(level, side);
            }
            {
                let order = &mut self.orders[slot];
                order.price = price;
                order.qty = qty;
            }
            let level = self.level_at(side, price);
            self.levels[level].append(slot, &mut self.orders);
        }
        self.version += 1;
        Ok(())
    }

    /// Aggregate the top `depth` levels of each side.
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        let snap = |level: usize| {
            let level = &self.levels[level];
            LevelSnapshot {
                price: level.price,
                total_quantity: level.total_quantity,
                order_count: level.order_count,
            }
        };
        BookSnapshot {
            depth,
            bids: self.bids.iter().take(depth).map(snap).collect(),
            asks: self.asks.iter().take(depth).map(snap).collect(),
        }
    }

    /// Best bid price, or `0.0` when no bids rest.
    #[inline(always)]
    pub fn best_bid(&self) -> f64 {
        self.bids.best().map_or(0.0, |level| self.levels[level].price)
    }

    /// Best ask price, or `+∞` when no asks rest.
    #[inline(always)]
    pub fn best_ask(&self) -> f64 {
        self.asks
            .best()
            .map_or(f64::INFINITY, |level| self.levels[level].price)
    }

    /// Best ask minus best bid, or `0.0` unless both sides rest.
    #[inline(always)]
    pub fn spread(&self) -> f64 {
        if self.bids.is_empty() || self.asks.is_empty() {
            0.0
        } else {
            self.best_ask() - self.best_bid()
        }
    }

    /// Monotonic counter, bumped once per successful mutating call.
    #[inline(always)]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of currently resting orders.
    #[inline(always)]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Number of distinct bid price levels.
    #[inline(always)]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask price levels.
    #[inline(always)]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Trades emitted since the last [`clear_trades`](OrderBook::clear_trades),
    /// in engine-emission order.
    #[inline(always)]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Drain the trade buffer.
    pub fn clear_trades(&mut self) {
        self.trades.clear();
    }

    /// The most recent fill, if any trade has ever happened.
    #[inline(always)]
    pub fn last_trade(&self) -> Option<Trade> {
        self.last_trade
    }

    /// Total quantity traded over the book's lifetime.
    #[inline(always)]
    pub fn traded_volume(&self) -> u64 {
        self.traded_volume
    }

    fn level_lookup(&self, side: Side, price: f64) -> Option<usize> {
        match side {
            Side::Bid => self.bids.get(price),
            Side::Ask => self.asks.get(price),
        }
    }

    /// Level slot for (side, price), created on demand.
    fn level_at(&mut self, side: Side, price: f64) -> usize {
        if let Some(level) = self.level_lookup(side, price) {
            return level;
        }
        let level = self.levels.allocate(PriceLevel::new(price));
        match side {
            Side::Bid => self.bids.insert(price, level),
            Side::Ask => self.asks.insert(price, level),
        }
        level
    }

    pub(crate) fn erase_level_if_empty(&mut self, level: usize, side: Side) {
        if !self.levels[level].is_empty() {
            return;
        }
        let price = self.levels[level].price;
        match side {
            Side::Bid => self.bids.remove(price),
            Side::Ask => self.asks.remove(price),
        };
        self.levels.release(level);
    }

    #[cfg(test)]
    #[doc(hidden)]
    pub fn _level_ids(&self, side: Side, price: f64) -> Vec<u64> {
        let mut ids = Vec::new();
        if let Some(level) = self.level_lookup(side, price) {
            let mut cur = self.levels[level].head;
            while let Some(slot) = cur {
                ids.push(self.orders[slot].id);
                cur = self.orders[slot].next;
            }
        }
        ids
    }

    #[cfg(test)]
    #[doc(hidden)]
    pub fn _level_totals(&self, side: Side, price: f64) -> Option<(u64, usize)> {
        self.level_lookup(side, price)
            .map(|level| (self.levels[level].total_quantity, self.levels[level].order_count))
    }

    #[cfg(test)]
    #[doc(hidden)]
    pub fn _pool_in_use(&self) -> (usize, usize) {
        (self.orders.in_use(), self.levels.in_use())
    }
}

use tracing::debug;

use crate::models::{Side, Trade};
use crate::orderbook::OrderBook;

impl OrderBook {
    /// Run continuous matching until the book is uncrossed or one side is
    /// empty. This is driven automatically by [`OrderBook::add`] and is
    /// safe to call at any time; on an uncrossed book it does nothing. It
    /// does not bump the version counter.
    ///
    /// Each iteration fills the FIFO heads of the two top levels against
    /// each other. The resting order with the earlier timestamp is the
    /// maker and sets the execution price; the bid wins a timestamp tie.
    pub fn match_orders(&mut self) {
        if self.matching_in_progress {
            return;
        }
        self.matching_in_progress = true;

        while let (Some(bid_level), Some(ask_level)) = (self.bids.best(), self.asks.best()) {
            let bid_price = self.levels[bid_level].price;
            let ask_price = self.levels[ask_level].price;
            if bid_price < ask_price {
                break;
            }

            let (Some(bid_slot), Some(ask_slot)) =
                (self.levels[bid_level].head, self.levels[ask_level].head)
            else {
                break;
            };

            let (bid_id, bid_ts, bid_qty) = {
                let order = &self.orders[bid_slot];
                (order.id, order.timestamp_ns, order.qty)
            };
            let (ask_id, ask_ts, ask_qty) = {
                let order = &self.orders[ask_slot];
                (order.id, order.timestamp_ns, order.qty)
            };

            let qty = bid_qty.min(ask_qty);
            let price = if bid_ts <= ask_ts { bid_price } else { ask_price };

            self.orders[bid_slot].qty -= qty;
            self.orders[ask_slot].qty -= qty;
            self.levels[bid_level].total_quantity -= qty;
            self.levels[ask_level].total_quantity -= qty;

            let trade = Trade {
                qty,
                price,
                bid_id,
                ask_id,
            };
            debug!(qty, price, bid_id, ask_id, "trade");
            self.traded_volume += qty;
            self.last_trade = Some(trade);
            self.trades.push(trade);

            if self.orders[bid_slot].qty == 0 {
                self.reclaim_filled(bid_slot, bid_level, Side::Bid);
            }
            if self.orders[ask_slot].qty == 0 {
                self.reclaim_filled(ask_slot, ask_level, Side::Ask);
            }
        }

        self.matching_in_progress = false;
    }

    /// Remove a fully filled order from its level, the index and the order
    /// pool, erasing the level if it emptied.
    fn reclaim_filled(&mut self, slot: usize, level: usize, side: Side) {
        let id = self.orders[slot].id;
        self.levels[level].detach(slot, &mut self.orders);
        self.index.remove(&id);
        self.orders.release(slot);
        self.erase_level_if_empty(level, side);
    }
}

/// An order book side.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    /// The bid (or buy) side.
    Bid,
    /// The ask (or sell) side.
    Ask,
}

/// Maximum quantity accepted for a single order.
pub const MAX_ORDER_QUANTITY: u64 = 1_000_000;

/// Lowest accepted limit price.
pub const MIN_PRICE: f64 = 0.01;

/// Highest accepted limit price.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// A limit order submitted to the book.
///
/// This is the input carrier for [`OrderBook::add`]; on acceptance its
/// contents are copied into book-owned storage and the draft plays no
/// further role.
///
/// [`OrderBook::add`]: crate::OrderBook::add
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Order {
    /// The unique, non-zero ID of this order.
    pub id: u64,
    /// The order side. It will be matched against resting orders on the
    /// other side of the book.
    pub side: Side,
    /// The limit price, within `[MIN_PRICE, MAX_PRICE]`.
    pub price: f64,
    /// The order quantity, within `[1, MAX_ORDER_QUANTITY]`.
    pub qty: u64,
    /// The submission timestamp in nanoseconds. Expected to be monotone
    /// across submissions; the earlier of two crossing orders is the maker
    /// and sets the execution price.
    pub timestamp_ns: u64,
}

/// A single fill between one resting bid and one resting ask.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Trade {
    /// The quantity that was traded.
    pub qty: u64,
    /// The price at which the trade happened.
    pub price: f64,
    /// The ID of the buy order.
    pub bid_id: u64,
    /// The ID of the sell order.
    pub ask_id: u64,
}

/// A snapshot of the order book up to a certain depth. Orders at the same
/// price point are merged into a single [`LevelSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookSnapshot {
    /// The requested depth. This field will always contain the depth that
    /// was requested, even if fewer levels exist.
    pub depth: usize,
    /// Aggregated bid levels, highest price first.
    pub bids: Vec<LevelSnapshot>,
    /// Aggregated ask levels, lowest price first.
    pub asks: Vec<LevelSnapshot>,
}

/// A single aggregated level in a [`BookSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSnapshot {
    /// The price point this level represents.
    pub price: f64,
    /// The total residual quantity of all orders resting at this price.
    pub total_quantity: u64,
    /// The number of orders resting at this price.
    pub order_count: usize,
}

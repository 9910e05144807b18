mod error;
mod level;
mod matcher;
mod models;
mod orderbook;
mod pool;
mod side;

pub use error::RejectError;
pub use models::{
    BookSnapshot, LevelSnapshot, Order, Side, Trade, MAX_ORDER_QUANTITY, MAX_PRICE, MIN_PRICE,
};
pub use orderbook::OrderBook;
pub use pool::MEMORY_POOL_BLOCK_SIZE;

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
mod book;
mod error;
mod level;

pub use book::OrderBook;
pub use error::BookError;

use crate::ids::TraderId;
use crate::order::{OrderStatus, Side};

/// Filter applied by `MatchingEngine::get_orders`. Every field is
/// optional; `None` means "don't filter on this".
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub side: Option<Side>,
    pub status: Option<OrderStatus>,
    pub trader_id: Option<TraderId>,
}

impl OrderFilter {
    #[must_use]
    pub fn matches(&self, side: Side, status: OrderStatus, trader_id: TraderId) -> bool {
        self.side.is_none_or(|s| s == side)
            && self.status.is_none_or(|s| s == status)
            && self.trader_id.is_none_or(|t| t == trader_id)
    }
}

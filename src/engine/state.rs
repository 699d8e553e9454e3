/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! Everything one contract's book needs behind its single lock (§5): the
//! resting book itself, the two monotonic sequence counters that give
//! orders and trades their priority keys, the trade log `get_trades_for_order`
//! reads from, and the halted flag a fatal invariant violation sets.

use crate::book::OrderBook;
use crate::contract::ContractCode;
use crate::ids::OrderId;
use crate::timestamp::SequenceCounter;
use crate::trade::Trade;
use std::collections::HashMap;

#[derive(Debug)]
pub(crate) struct ContractState {
    pub(crate) book: OrderBook,
    pub(crate) order_seq: SequenceCounter,
    pub(crate) trade_seq: SequenceCounter,
    trades: Vec<Trade>,
    trades_by_order: HashMap<OrderId, Vec<usize>>,
    /// Set once a mutating call observes a book invariant violation
    /// A halted book rejects every further mutating
    /// call with `EngineError::Internal` without re-entering the match
    /// loop; it never auto-recovers.
    pub(crate) halted: bool,
}

impl ContractState {
    pub(crate) fn new(contract_id: ContractCode) -> Self {
        Self {
            book: OrderBook::new(contract_id),
            order_seq: SequenceCounter::default(),
            trade_seq: SequenceCounter::default(),
            trades: Vec::new(),
            trades_by_order: HashMap::new(),
            halted: false,
        }
    }

    pub(crate) fn record_trades(&mut self, trades: Vec<Trade>) {
        for trade in trades {
            let index = self.trades.len();
            self.trades_by_order.entry(trade.buy_order_id()).or_default().push(index);
            self.trades_by_order.entry(trade.sell_order_id()).or_default().push(index);
            self.trades.push(trade);
        }
    }

    pub(crate) fn trades_for_order(&self, order_id: OrderId) -> Vec<Trade> {
        self.trades_by_order
            .get(&order_id)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.trades.get(index).cloned())
            .collect()
    }
}

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! `OrderBook` (§4.2): the resting side of one contract — two price-sorted
//! ladders of FIFO queues, plus the authoritative id → order index.
//! Terminal (filled/cancelled) orders are retained in that index rather
//! than deleted, so history queries keep seeing them.

use super::error::BookError;
use super::level::PriceLevelQueue;
use crate::contract::ContractCode;
use crate::ids::OrderId;
use crate::numeric::Price;
use crate::order::{Order, Side};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
pub struct OrderBook {
    contract_id: ContractCode,
    bids: BTreeMap<Price, PriceLevelQueue>,
    asks: BTreeMap<Price, PriceLevelQueue>,
    /// Every order ever submitted to this contract, including terminal
    /// ones; the source of truth queries read from.
    orders: HashMap<OrderId, Order>,
    /// Where a *currently resting* order sits; absent for terminal orders.
    locations: HashMap<OrderId, (Side, Price)>,
}

impl OrderBook {
    pub(crate) fn new(contract_id: ContractCode) -> Self {
        Self {
            contract_id,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            orders: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    pub(crate) fn contract_id(&self) -> &ContractCode {
        &self.contract_id
    }

    fn ladder(&self, side: Side) -> &BTreeMap<Price, PriceLevelQueue> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut BTreeMap<Price, PriceLevelQueue> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Highest resting bid.
    #[must_use]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest resting ask.
    #[must_use]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// The order id at the front of the opposite-side queue at `price`.
    pub(crate) fn front_of(&self, side: Side, price: Price) -> Option<OrderId> {
        self.ladder(side).get(&price).and_then(PriceLevelQueue::front)
    }

    /// Iterates price levels on `side` in match priority order: ascending
    /// for asks (a buy sweeps the cheapest ask first), descending for bids
    /// (a sell sweeps the richest bid first).
    pub(crate) fn price_levels_in_match_order(&self, side: Side) -> Box<dyn Iterator<Item = Price> + '_> {
        match side {
            Side::Sell => Box::new(self.bids.keys().rev().copied()),
            Side::Buy => Box::new(self.asks.keys().copied()),
        }
    }

    pub(crate) fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id)
    }

    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Records a brand-new order as known to the book, without resting it.
    /// Every submitted order passes through this, whether or not it ends
    /// up resting (a fully filled or unfilled-market order still needs to
    /// be queryable).
    pub(crate) fn record(&mut self, order: Order) {
        self.orders.insert(order.id(), order);
    }

    /// Moves a limit order with remaining quantity into its price level.
    /// Caller guarantees the order was already `record`ed and is
    /// resting-eligible (§4.3 step 5).
    pub(crate) fn rest(&mut self, id: OrderId, side: Side, price: Price) {
        self.ladder_mut(side).entry(price).or_default().push_back(id);
        self.locations.insert(id, (side, price));
    }

    /// Removes the order at the front of `side`'s queue at `price` — used
    /// once a resting order is fully consumed by a match. Drops the price
    /// level entirely if it becomes empty.
    pub(crate) fn pop_filled(&mut self, side: Side, price: Price) -> Result<OrderId, BookError> {
        let ladder = self.ladder_mut(side);
        let level = ladder.get_mut(&price).ok_or(BookError::PriceLevelEmpty)?;
        let id = level.pop_front().ok_or(BookError::PriceLevelEmpty)?;
        if level.is_empty() {
            ladder.remove(&price);
        }
        self.locations.remove(&id);
        Ok(id)
    }

    /// Cancels a resting order: removes it from its price level and marks
    /// it terminal in the order index, but keeps the `Order` itself for
    /// history (§B).
    pub(crate) fn cancel(&mut self, id: OrderId) -> Result<(), BookError> {
        let (side, price) = self
            .locations
            .remove(&id)
            .ok_or(BookError::OrderNotFound(id))?;
        let ladder = self.ladder_mut(side);
        let level = ladder.get_mut(&price).ok_or(BookError::BookIndexDesync(id))?;
        if !level.remove(id) {
            return Err(BookError::BookIndexDesync(id));
        }
        if level.is_empty() {
            ladder.remove(&price);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_resting(&self, id: OrderId) -> bool {
        self.locations.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TraderId;
    use crate::order::OrderKind;
    use crate::timestamp::Timestamp;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn limit_order(side: Side, price: rust_decimal::Decimal, qty: rust_decimal::Decimal) -> Order {
        Order::new(
            OrderId::new(),
            ContractCode::new("PWR-CAISO-JAN26"),
            TraderId::new(),
            side,
            OrderKind::Limit,
            Price::new(price),
            crate::numeric::Quantity::new(qty).unwrap(),
            Timestamp::new(0, Utc::now()),
        )
    }

    #[test]
    fn best_bid_and_ask_track_resting_orders() {
        let mut book = OrderBook::new(ContractCode::new("PWR-CAISO-JAN26"));
        let bid = limit_order(Side::Buy, dec!(49.00), dec!(10));
        let ask = limit_order(Side::Sell, dec!(51.00), dec!(10));
        let (bid_id, ask_id) = (bid.id(), ask.id());
        let bid_price = bid.price().unwrap();
        let ask_price = ask.price().unwrap();
        book.record(bid);
        book.rest(bid_id, Side::Buy, bid_price);
        book.record(ask);
        book.rest(ask_id, Side::Sell, ask_price);

        assert_eq!(book.best_bid(), Price::new(dec!(49.00)));
        assert_eq!(book.best_ask(), Price::new(dec!(51.00)));
    }

    #[test]
    fn cancel_removes_from_ladder_but_keeps_order_for_history() {
        let mut book = OrderBook::new(ContractCode::new("PWR-CAISO-JAN26"));
        let order = limit_order(Side::Buy, dec!(49.00), dec!(10));
        let id = order.id();
        let price = order.price().unwrap();
        book.record(order);
        book.rest(id, Side::Buy, price);

        book.cancel(id).unwrap();
        assert!(!book.is_resting(id));
        assert!(book.get(id).is_some(), "order must remain queryable after cancel");
        assert!(book.best_bid().is_none());
    }

    #[test]
    fn pop_filled_drops_empty_price_level() {
        let mut book = OrderBook::new(ContractCode::new("PWR-CAISO-JAN26"));
        let order = limit_order(Side::Sell, dec!(51.00), dec!(10));
        let id = order.id();
        let price = order.price().unwrap();
        book.record(order);
        book.rest(id, Side::Sell, price);

        let popped = book.pop_filled(Side::Sell, price).unwrap();
        assert_eq!(popped, id);
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn price_levels_in_match_order_sweeps_bids_richest_first() {
        let mut book = OrderBook::new(ContractCode::new("PWR-CAISO-JAN26"));
        for price in [dec!(48.00), dec!(50.00), dec!(49.00)] {
            let order = limit_order(Side::Buy, price, dec!(1));
            let id = order.id();
            let p = order.price().unwrap();
            book.record(order);
            book.rest(id, Side::Buy, p);
        }
        let levels: Vec<_> = book.price_levels_in_match_order(Side::Sell).collect();
        assert_eq!(
            levels,
            vec![
                Price::new(dec!(50.00)).unwrap(),
                Price::new(dec!(49.00)).unwrap(),
                Price::new(dec!(48.00)).unwrap(),
            ]
        );
    }
}

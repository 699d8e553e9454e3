/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! The match loop (§4.3): price-time priority matching for one incoming
//! order against one contract's resting book.
//!
//! Walks price levels in priority order, consumes the front of each
//! level's FIFO queue, emits a trade per fill, and stops at the first
//! level a limit order's price guard rejects. Self-trade prevention and
//! order-object pooling are out of scope here; what remains is the
//! level-walk/FIFO-consume/trade-emit shape.

use crate::book::OrderBook;
use crate::book::BookError;
use crate::ids::TradeId;
use crate::numeric::Quantity;
use crate::order::{CancelReason, Order, OrderKind, Side};
use crate::timestamp::SequenceCounter;
use crate::trade::Trade;
use chrono::Utc;
use tracing::{debug, trace};

/// Matches `incoming` against `book`, mutating both, and returns every
/// trade produced. `incoming` has already passed validation; it is
/// `record`ed into the book before this returns, whatever the outcome.
pub(crate) fn match_order(
    book: &mut OrderBook,
    mut incoming: Order,
    trade_seq: &mut SequenceCounter,
) -> Result<Vec<Trade>, BookError> {
    let mut trades = Vec::new();
    let incoming_side = incoming.side();
    let limit_price = incoming.price();

    loop {
        if incoming.remaining_quantity().is_zero() {
            break;
        }
        let Some(level_price) = book.price_levels_in_match_order(incoming_side).next() else {
            break;
        };

        if incoming.kind() == OrderKind::Limit {
            let limit = limit_price.expect("limit order always carries a price");
            let guard_rejects = match incoming_side {
                Side::Buy => level_price.raw() > limit.raw(),
                Side::Sell => level_price.raw() < limit.raw(),
            };
            if guard_rejects {
                trace!(?level_price, ?limit, "price guard stops the sweep");
                break;
            }
        }

        let opposite_side = incoming_side.opposite();
        let Some(maker_id) = book.front_of(opposite_side, level_price) else {
            return Err(BookError::PriceLevelEmpty);
        };
        let maker = book
            .order_mut(maker_id)
            .ok_or(BookError::BookIndexDesync(maker_id))?;

        let fill_amount = incoming.remaining_quantity().min(maker.remaining_quantity());
        let fill_quantity =
            Quantity::new(fill_amount).expect("both operands were positive residuals");
        let now = Utc::now();

        maker
            .apply_fill(fill_quantity, now)
            .ok_or(BookError::ResidualUnderflow(maker_id))?;
        let maker_filled = maker.status() == crate::order::OrderStatus::Filled;
        incoming
            .apply_fill(fill_quantity, now)
            .ok_or(BookError::ResidualUnderflow(incoming.id()))?;

        let (buy_order_id, sell_order_id) = match incoming_side {
            Side::Buy => (incoming.id(), maker_id),
            Side::Sell => (maker_id, incoming.id()),
        };
        let trade = Trade::new(
            TradeId::new(),
            book.contract_id().clone(),
            buy_order_id,
            sell_order_id,
            level_price,
            fill_quantity,
            trade_seq.next(now),
        );
        debug!(
            trade_id = %trade.id(),
            price = %level_price,
            quantity = %fill_quantity,
            "trade emitted"
        );
        trades.push(trade);

        if maker_filled {
            book.pop_filled(opposite_side, level_price)?;
        }
    }

    let remainder = incoming.remaining_quantity();
    let incoming_id = incoming.id();
    let incoming_price = incoming.price();
    let incoming_side_again = incoming.side();
    let resting_eligible = incoming.kind() == OrderKind::Limit && !remainder.is_zero();

    if incoming.kind() == OrderKind::Market && !remainder.is_zero() {
        incoming.cancel(CancelReason::UnfilledMarketRemainder, Utc::now());
        trace!(order_id = %incoming_id, "unfilled market remainder discarded");
    }

    book.record(incoming);

    if resting_eligible {
        let price = incoming_price.expect("limit order always carries a price");
        book.rest(incoming_id, incoming_side_again, price);
        trace!(order_id = %incoming_id, %price, "order rests in book");
    }

    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractCode;
    use crate::ids::{OrderId, TraderId};
    use crate::numeric::Price;
    use crate::timestamp::Timestamp;
    use rust_decimal_macros::dec;

    fn book() -> OrderBook {
        OrderBook::new(ContractCode::new("PWR-CAISO-JAN26"))
    }

    fn order(side: Side, kind: OrderKind, price: Option<rust_decimal::Decimal>, qty: rust_decimal::Decimal, seq: u64) -> Order {
        Order::new(
            OrderId::new(),
            ContractCode::new("PWR-CAISO-JAN26"),
            TraderId::new(),
            side,
            kind,
            price.map(|p| Price::new(p).unwrap()),
            Quantity::new(qty).unwrap(),
            Timestamp::new(seq, Utc::now()),
        )
    }

    #[test]
    fn exact_match_fills_both_sides() {
        let mut b = book();
        let mut seq = SequenceCounter::default();
        let resting = order(Side::Sell, OrderKind::Limit, Some(dec!(50.00)), dec!(10), 0);
        let resting_id = resting.id();
        let price = resting.price().unwrap();
        b.record(resting);
        b.rest(resting_id, Side::Sell, price);

        let taker = order(Side::Buy, OrderKind::Limit, Some(dec!(50.00)), dec!(10), 1);
        let taker_id = taker.id();
        let trades = match_order(&mut b, taker, &mut seq).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity().raw(), dec!(10));
        assert_eq!(b.get(resting_id).unwrap().status(), crate::order::OrderStatus::Filled);
        assert_eq!(b.get(taker_id).unwrap().status(), crate::order::OrderStatus::Filled);
        assert!(b.best_ask().is_none());
    }

    #[test]
    fn partial_fill_leaves_resting_residual() {
        let mut b = book();
        let mut seq = SequenceCounter::default();
        let resting = order(Side::Sell, OrderKind::Limit, Some(dec!(50.00)), dec!(10), 0);
        let resting_id = resting.id();
        let price = resting.price().unwrap();
        b.record(resting);
        b.rest(resting_id, Side::Sell, price);

        let taker = order(Side::Buy, OrderKind::Limit, Some(dec!(50.00)), dec!(4), 1);
        let trades = match_order(&mut b, taker, &mut seq).unwrap();

        assert_eq!(trades[0].quantity().raw(), dec!(4));
        let maker = b.get(resting_id).unwrap();
        assert_eq!(maker.status(), crate::order::OrderStatus::PartiallyFilled);
        assert_eq!(maker.remaining_quantity(), dec!(6));
        assert!(b.is_resting(resting_id));
    }

    #[test]
    fn market_buy_sweeps_two_levels() {
        let mut b = book();
        let mut seq = SequenceCounter::default();
        for (price, qty, s) in [(dec!(50.00), dec!(5), 0), (dec!(51.00), dec!(5), 1)] {
            let resting = order(Side::Sell, OrderKind::Limit, Some(price), qty, s);
            let id = resting.id();
            let p = resting.price().unwrap();
            b.record(resting);
            b.rest(id, Side::Sell, p);
        }

        let taker = order(Side::Buy, OrderKind::Market, None, dec!(8), 2);
        let trades = match_order(&mut b, taker, &mut seq).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].price().raw(), dec!(50.00));
        assert_eq!(trades[0].quantity().raw(), dec!(5));
        assert_eq!(trades[1].price().raw(), dec!(51.00));
        assert_eq!(trades[1].quantity().raw(), dec!(3));
    }

    #[test]
    fn price_guard_prevents_match_outside_limit() {
        let mut b = book();
        let mut seq = SequenceCounter::default();
        let resting = order(Side::Sell, OrderKind::Limit, Some(dec!(52.00)), dec!(10), 0);
        let id = resting.id();
        let p = resting.price().unwrap();
        b.record(resting);
        b.rest(id, Side::Sell, p);

        let taker = order(Side::Buy, OrderKind::Limit, Some(dec!(50.00)), dec!(5), 1);
        let taker_id = taker.id();
        let trades = match_order(&mut b, taker, &mut seq).unwrap();

        assert!(trades.is_empty());
        assert!(b.is_resting(taker_id));
        assert_eq!(b.best_bid(), Some(Price::new(dec!(50.00)).unwrap()));
    }

    #[test]
    fn unfilled_market_remainder_is_cancelled_not_rested() {
        let mut b = book();
        let mut seq = SequenceCounter::default();
        let taker = order(Side::Buy, OrderKind::Market, None, dec!(10), 0);
        let taker_id = taker.id();
        let trades = match_order(&mut b, taker, &mut seq).unwrap();

        assert!(trades.is_empty());
        assert!(!b.is_resting(taker_id));
        let recorded = b.get(taker_id).unwrap();
        assert_eq!(recorded.status(), crate::order::OrderStatus::Cancelled);
        assert_eq!(recorded.cancel_reason(), Some(CancelReason::UnfilledMarketRemainder));
    }

    #[test]
    fn time_priority_at_equal_price_fills_earlier_order_first() {
        let mut b = book();
        let mut seq = SequenceCounter::default();
        let first = order(Side::Sell, OrderKind::Limit, Some(dec!(50.00)), dec!(5), 0);
        let first_id = first.id();
        let p = first.price().unwrap();
        b.record(first);
        b.rest(first_id, Side::Sell, p);

        let second = order(Side::Sell, OrderKind::Limit, Some(dec!(50.00)), dec!(5), 1);
        let second_id = second.id();
        b.record(second);
        b.rest(second_id, Side::Sell, p);

        let taker = order(Side::Buy, OrderKind::Limit, Some(dec!(50.00)), dec!(5), 2);
        let trades = match_order(&mut b, taker, &mut seq).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].sell_order_id(), first_id);
        assert_eq!(b.get(first_id).unwrap().status(), crate::order::OrderStatus::Filled);
        assert_eq!(b.get(second_id).unwrap().status(), crate::order::OrderStatus::Open);
    }
}

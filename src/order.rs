/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! The `Order` entity (§3) and its lifecycle.
//!
//! Mutation is only ever done through the methods below so the status ↔
//! residual-quantity invariant (§3 Invariant 4/5, §8 "status–residual
//! consistency") can never be broken from outside this module: callers
//! cannot set `status` and `remaining_quantity` independently.

use crate::contract::ContractCode;
use crate::ids::{OrderId, TraderId};
use crate::numeric::{Price, Quantity};
use crate::timestamp::Timestamp;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Limit,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses never transition further (§3 Invariant 5).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }

    /// True for `Open`/`PartiallyFilled`: orders that may still rest in a
    /// book or still be eligible to match.
    #[must_use]
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }
}

/// Why a terminal `Cancelled` order left the book without a user request.
/// A supplement to §3, not a replacement for it: the base spec only
/// requires the `Cancelled` status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// `MatchingEngine::cancel` was called by a trader.
    UserRequested,
    /// A market order swept the book and still had quantity left (§4.3
    /// step 5): the remainder is discarded, never rested.
    UnfilledMarketRemainder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    contract_id: ContractCode,
    trader_id: TraderId,
    side: Side,
    kind: OrderKind,
    /// `None` for market orders; always `Some` for limit orders.
    price: Option<Price>,
    quantity: Quantity,
    /// Unlike `quantity`, legitimately reaches zero once an order is
    /// fully filled — see the note on `Quantity` in `numeric.rs`.
    remaining_quantity: Decimal,
    status: OrderStatus,
    /// Engine-assigned monotonic priority key (§9); the sole tie-breaker
    /// for price-time priority.
    placed_at: Timestamp,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancel_reason: Option<CancelReason>,
}

impl Order {
    /// Constructs a brand-new resting-eligible order. Only called by
    /// `MatchingEngine::submit` after validation, so `remaining_quantity`
    /// always starts equal to `quantity` and `status` always starts `Open`.
    pub(crate) fn new(
        id: OrderId,
        contract_id: ContractCode,
        trader_id: TraderId,
        side: Side,
        kind: OrderKind,
        price: Option<Price>,
        quantity: Quantity,
        placed_at: Timestamp,
    ) -> Self {
        let now = placed_at.wall_clock();
        Self {
            id,
            contract_id,
            trader_id,
            side,
            kind,
            price,
            quantity,
            remaining_quantity: quantity.raw(),
            status: OrderStatus::Open,
            placed_at,
            created_at: now,
            updated_at: now,
            cancel_reason: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[must_use]
    pub fn contract_id(&self) -> &ContractCode {
        &self.contract_id
    }

    #[must_use]
    pub fn trader_id(&self) -> TraderId {
        self.trader_id
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    #[must_use]
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Zero once the order is `Filled`; never negative (§3 Invariant 4).
    #[must_use]
    pub fn remaining_quantity(&self) -> Decimal {
        self.remaining_quantity
    }

    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        self.cancel_reason
    }

    #[must_use]
    pub fn is_resting_eligible(&self) -> bool {
        self.kind == OrderKind::Limit && self.status.is_active() && !self.remaining_quantity.is_zero()
    }

    /// Applies one fill of `fill_quantity`, moving `status` to
    /// `PartiallyFilled` or `Filled` as `remaining_quantity` dictates.
    /// Returns `None` (an invariant violation — §7 "residual underflow")
    /// if `fill_quantity` exceeds what remains.
    pub(crate) fn apply_fill(&mut self, fill_quantity: Quantity, now: DateTime<Utc>) -> Option<()> {
        let remaining = self.remaining_quantity - fill_quantity.raw();
        if remaining < Decimal::ZERO {
            return None;
        }
        self.remaining_quantity = remaining;
        self.status = if remaining.is_zero() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
        self.updated_at = now;
        Some(())
    }

    /// Marks the order cancelled, whatever its current residual quantity.
    pub(crate) fn cancel(&mut self, reason: CancelReason, now: DateTime<Utc>) {
        self.status = OrderStatus::Cancelled;
        self.cancel_reason = Some(reason);
        self.updated_at = now;
    }
}

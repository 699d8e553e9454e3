/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! `MatchingEngine`: the per-contract registry of books plus the public
//! submit/cancel/query API.
//!
//! One contract's book is a `parking_lot::RwLock`-guarded `ContractState`
//! kept in a `DashMap` keyed by contract code, so one contract's match
//! loop never blocks another's — orders never match across contracts, and
//! serializing within a contract is what price-time priority requires.

use crate::book::OrderFilter;
use crate::contract::{ContractCode, ContractRegistry};
use crate::engine::error::EngineError;
use crate::engine::matching;
use crate::engine::state::ContractState;
use crate::ids::{OrderId, TraderId};
use crate::numeric::{Price, Quantity};
use crate::order::{Order, OrderKind, Side};
use crate::trade::Trade;
use dashmap::DashMap;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Caller-supplied fields for a new order (§4.3 step 1). The engine
/// assigns `id` when absent, and always assigns `placed_at`/status/
/// `remaining_quantity` itself.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Option<OrderId>,
    pub contract_id: ContractCode,
    pub trader_id: TraderId,
    pub side: Side,
    pub kind: OrderKind,
    pub price: Option<Decimal>,
    pub quantity: Decimal,
}

/// The default and maximum page size for `get_orders`.
const MAX_PAGE_LIMIT: usize = 500;

pub struct MatchingEngine {
    registry: ContractRegistry,
    books: DashMap<ContractCode, RwLock<ContractState>>,
}

impl MatchingEngine {
    /// Brings the engine up with a fixed contract registry (§4.4): one
    /// empty book per known contract, ready to accept orders.
    #[must_use]
    pub fn start(registry: ContractRegistry) -> Self {
        let books = DashMap::new();
        for code in registry.codes() {
            books.insert(code.clone(), RwLock::new(ContractState::new(code.clone())));
        }
        info!(contracts = books.len(), "matching engine started");
        Self { registry, books }
    }

    /// Decommissions the engine: every contract's book is dropped along
    /// with its resting orders and trade history. Out-of-scope persistence
    /// (§1) means nothing survives this beyond what the caller already
    /// captured via queries.
    pub fn stop(&self) {
        self.books.clear();
        info!("matching engine stopped");
    }

    fn validate(&self, input: &NewOrder) -> Result<(), EngineError> {
        let spec = self
            .registry
            .get(&input.contract_id)
            .ok_or(EngineError::UnknownContract)?;

        match input.kind {
            OrderKind::Limit => {
                let Some(raw_price) = input.price else {
                    return Err(EngineError::BadPrice {
                        reason: "limit order requires a price".to_string(),
                    });
                };
                let price = Price::new(raw_price).ok_or_else(|| EngineError::BadPrice {
                    reason: "price must be strictly positive".to_string(),
                })?;
                if !price.is_aligned_to(spec.tick_size) {
                    return Err(EngineError::BadPrice {
                        reason: format!("price must be a multiple of tick size {}", spec.tick_size),
                    });
                }
            }
            OrderKind::Market => {
                if input.price.is_some() {
                    return Err(EngineError::BadPrice {
                        reason: "market order must not carry a price".to_string(),
                    });
                }
            }
        }

        if Quantity::new(input.quantity).is_none() {
            return Err(EngineError::BadQuantity {
                reason: "quantity must be strictly positive".to_string(),
            });
        }

        Ok(())
    }

    /// Submits a new order for matching (§4.3). Returns the assigned
    /// `OrderId` and every trade the submission produced, in emission
    /// order.
    pub fn submit(&self, input: NewOrder) -> Result<(OrderId, Vec<Trade>), EngineError> {
        self.validate(&input)?;

        let guard = self
            .books
            .get(&input.contract_id)
            .ok_or(EngineError::UnknownContract)?;
        let mut state = guard.write();
        if state.halted {
            return Err(EngineError::Internal {
                message: "book is halted after a prior invariant violation".to_string(),
            });
        }

        let order_id = input.id.unwrap_or_else(OrderId::new);
        let now = chrono::Utc::now();
        let placed_at = state.order_seq.next(now);
        let price = input.price.and_then(Price::new);
        let quantity =
            Quantity::new(input.quantity).expect("validated strictly positive above");

        let order = Order::new(
            order_id,
            input.contract_id.clone(),
            input.trader_id,
            input.side,
            input.kind,
            price,
            quantity,
            placed_at,
        );

        match matching::match_order(&mut state.book, order, &mut state.trade_seq) {
            Ok(trades) => {
                state.record_trades(trades.clone());
                Ok((order_id, trades))
            }
            Err(error) => {
                warn!(contract = %input.contract_id, %error, "book invariant violated, halting");
                state.halted = true;
                Err(EngineError::from(error))
            }
        }
    }

    /// Cancels a resting order (§4.3 Cancellation). No-op from the
    /// matching perspective if the order already reached a terminal
    /// status; that's reported as `NotResting`, not as success.
    pub fn cancel(&self, contract_id: &ContractCode, order_id: OrderId) -> Result<(), EngineError> {
        let guard = self.books.get(contract_id).ok_or(EngineError::UnknownContract)?;
        let mut state = guard.write();
        if state.halted {
            return Err(EngineError::Internal {
                message: "book is halted after a prior invariant violation".to_string(),
            });
        }

        if !state.book.is_resting(order_id) {
            return if state.book.get(order_id).is_some() {
                Err(EngineError::NotResting)
            } else {
                Err(EngineError::NotFound)
            };
        }

        state.book.cancel(order_id)?;
        let now = chrono::Utc::now();
        if let Some(order) = state.book.order_mut(order_id) {
            order.cancel(crate::order::CancelReason::UserRequested, now);
        }
        Ok(())
    }

    /// Looks up a single order by id, whatever its current status (§B:
    /// terminal orders remain visible).
    pub fn get_order(&self, contract_id: &ContractCode, order_id: OrderId) -> Result<Order, EngineError> {
        let guard = self.books.get(contract_id).ok_or(EngineError::UnknownContract)?;
        let state = guard.read();
        state.book.get(order_id).cloned().ok_or(EngineError::NotFound)
    }

    /// Lists orders for a contract, filtered and paginated
    /// `page` is 1-indexed; `limit` is capped at 500.
    pub fn get_orders(
        &self,
        contract_id: &ContractCode,
        filter: OrderFilter,
        page: usize,
        limit: usize,
    ) -> Result<Vec<Order>, EngineError> {
        let guard = self.books.get(contract_id).ok_or(EngineError::UnknownContract)?;
        let state = guard.read();
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let page = page.max(1);

        let mut matching: Vec<Order> = state
            .book
            .orders()
            .filter(|order| filter.matches(order.side(), order.status(), order.trader_id()))
            .cloned()
            .collect();
        matching.sort_by_key(|order| order.placed_at().sequence());

        let start = (page - 1).saturating_mul(limit);
        Ok(matching.into_iter().skip(start).take(limit).collect())
    }

    /// Every trade that filled (any part of) the given order, in emission
    /// order.
    pub fn get_trades_for_order(
        &self,
        contract_id: &ContractCode,
        order_id: OrderId,
    ) -> Result<Vec<Trade>, EngineError> {
        let guard = self.books.get(contract_id).ok_or(EngineError::UnknownContract)?;
        let state = guard.read();
        if state.book.get(order_id).is_none() {
            return Err(EngineError::NotFound);
        }
        Ok(state.trades_for_order(order_id))
    }
}

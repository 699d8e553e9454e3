//! # Continuous Double-Auction Matching Engine
//!
//! A price-time-priority matching engine core for standardized commodity
//! contracts: limit and market orders, an order book per contract, and a
//! trade stream — with no transport, persistence, or risk layer baked in.
//!
//! ## Scope
//!
//! - **Price-time priority matching.** Incoming orders sweep the opposite
//!   side's price levels best-price-first, consuming each level's FIFO
//!   queue in arrival order. Execution price is always the resting
//!   (maker) order's price.
//! - **Limit and market orders.** A limit order rests at its price if it
//!   isn't fully filled; a market order's unfilled remainder is discarded,
//!   never rested.
//! - **One lock per contract.** Each contract's book is an independent
//!   unit of mutual exclusion — matching one contract never blocks
//!   submissions to another (see [`MatchingEngine`]).
//! - **Fixed-point decimal arithmetic.** [`Price`] and [`Quantity`] wrap
//!   [`rust_decimal::Decimal`]; there is no floating point anywhere in the
//!   matching path.
//!
//! Explicitly out of scope: iceberg/stop/fill-or-kill/immediate-or-cancel/
//! good-till-time order types, self-trade prevention, cross-contract
//! matching, market-data multicast, order modification, long-term
//! persistence, transport, and authentication/risk. An embedding
//! application builds those around this crate.
//!
//! ## Example
//!
//! ```
//! use continuous_auction_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let mut registry = ContractRegistry::new();
//! registry.register(ContractSpec {
//!     code: ContractCode::new("PWR-CAISO-JAN26"),
//!     commodity: Commodity::Power,
//!     delivery_period: DeliveryPeriod::Monthly,
//!     window: DeliveryWindow {
//!         start: chrono::Utc::now(),
//!         end: chrono::Utc::now() + chrono::Duration::days(30),
//!     },
//!     location: "CAISO".to_string(),
//!     tick_size: dec!(0.05),
//!     contract_size: dec!(1),
//! });
//! let engine = MatchingEngine::start(registry);
//! let contract = ContractCode::new("PWR-CAISO-JAN26");
//!
//! engine.submit(NewOrder {
//!     id: None,
//!     contract_id: contract.clone(),
//!     trader_id: TraderId::new(),
//!     side: Side::Sell,
//!     kind: OrderKind::Limit,
//!     price: Some(dec!(50.00)),
//!     quantity: dec!(10),
//! }).unwrap();
//!
//! let (_, trades) = engine.submit(NewOrder {
//!     id: None,
//!     contract_id: contract,
//!     trader_id: TraderId::new(),
//!     side: Side::Buy,
//!     kind: OrderKind::Limit,
//!     price: Some(dec!(50.00)),
//!     quantity: dec!(4),
//! }).unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity().raw(), dec!(4));
//! ```

pub mod book;
pub mod contract;
pub mod engine;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod prelude;
pub mod timestamp;
pub mod trade;

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types from this crate. Instead of importing each type individually, you
//! can use:
//!
//! ```rust
//! use continuous_auction_core::prelude::*;
//! ```

pub use crate::book::{BookError, OrderFilter};
pub use crate::contract::{
    Commodity, ContractCode, ContractRegistry, ContractSpec, DeliveryPeriod, DeliveryWindow,
};
pub use crate::engine::{EngineError, MatchingEngine, NewOrder};
pub use crate::ids::{OrderId, TradeId, TraderId};
pub use crate::numeric::{Price, Quantity};
pub use crate::order::{CancelReason, Order, OrderKind, OrderStatus, Side};
pub use crate::timestamp::Timestamp;
pub use crate::trade::Trade;

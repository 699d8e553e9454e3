/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! Internal errors raised by the price-level queue and `OrderBook`.
//! These don't cross the public API — `MatchingEngine` catches them at
//! the boundary of every mutating call and maps them to
//! `EngineError::Internal`, halting the contract's book.

use crate::ids::OrderId;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookError {
    #[error("order {0} not found in book")]
    OrderNotFound(OrderId),

    #[error("price level unexpectedly empty during match")]
    PriceLevelEmpty,

    #[error("residual quantity underflowed below zero for order {0}")]
    ResidualUnderflow(OrderId),

    #[error("book index and price-level queues disagree about order {0}")]
    BookIndexDesync(OrderId),
}

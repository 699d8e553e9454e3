/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! The `Trade` entity (§3): an immutable record of one match, emitted by
//! the matching loop and never mutated again.

use crate::contract::ContractCode;
use crate::ids::{OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    id: TradeId,
    contract_id: ContractCode,
    buy_order_id: OrderId,
    sell_order_id: OrderId,
    /// Always the resting (maker) order's price (§4.3 step 3).
    price: Price,
    quantity: Quantity,
    /// Strictly increasing per contract (§3); the trade-stream ordering key.
    generated_at: Timestamp,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: TradeId,
        contract_id: ContractCode,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        generated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            contract_id,
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            generated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> TradeId {
        self.id
    }

    #[must_use]
    pub fn contract_id(&self) -> &ContractCode {
        &self.contract_id
    }

    #[must_use]
    pub fn buy_order_id(&self) -> OrderId {
        self.buy_order_id
    }

    #[must_use]
    pub fn sell_order_id(&self) -> OrderId {
        self.sell_order_id
    }

    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub fn generated_at(&self) -> Timestamp {
        self.generated_at
    }

    /// The order on the given side of this trade.
    #[must_use]
    pub fn order_id_for(&self, side: crate::order::Side) -> OrderId {
        match side {
            crate::order::Side::Buy => self.buy_order_id,
            crate::order::Side::Sell => self.sell_order_id,
        }
    }
}

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! The contract registry (§4.4): read-only metadata loaded once at engine
//! start, one entry per tradeable commodity contract. Commodity and
//! delivery period are typed `enum`s rather than open strings, so the
//! registry is exhaustive at compile time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifies one contract, e.g. `"PWR-CAISO-JAN26"`. Cheap to clone since
/// every order and trade carries one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractCode(Arc<str>);

impl ContractCode {
    #[must_use]
    pub fn new(code: impl Into<Arc<str>>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContractCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The physical commodity underlying a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Power,
    NaturalGas,
    Crude,
    RefinedProducts,
    Coal,
    Emissions,
}

/// The cadence of the delivery period a contract settles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Seasonal,
    Annual,
}

/// The delivery window a contract settles against, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Static, read-only metadata for one contract (§4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSpec {
    pub code: ContractCode,
    pub commodity: Commodity,
    pub delivery_period: DeliveryPeriod,
    pub window: DeliveryWindow,
    pub location: String,
    /// Minimum price increment; every order price must be an integer
    /// multiple of this (§4.3 validation).
    pub tick_size: Decimal,
    /// Notional size of one unit of quantity.
    pub contract_size: Decimal,
}

/// The full set of contracts a `MatchingEngine` knows about, built once and
/// handed to `MatchingEngine::start` (§1 Out of scope: "settings and
/// environment handling" — this is the one piece of configuration the
/// engine does take, and it is plain data, not environment-sourced).
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<ContractCode, ContractSpec>,
}

impl ContractRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `spec`, replacing any previous entry for the same code.
    pub fn register(&mut self, spec: ContractSpec) -> &mut Self {
        self.contracts.insert(spec.code.clone(), spec);
        self
    }

    #[must_use]
    pub fn get(&self, code: &ContractCode) -> Option<&ContractSpec> {
        self.contracts.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &ContractCode) -> bool {
        self.contracts.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &ContractCode> {
        self.contracts.keys()
    }
}

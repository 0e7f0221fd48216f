use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{Conversion, ConversionError, Value};

/// Chains known to the attestation network, identified by their wire chain
/// id. The table is the bidirectional id↔chain mapping used inside chain-id
/// layout items; an id outside it is a decode error, never a silent pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Solana,
    Ethereum,
    Bsc,
    Polygon,
    Avalanche,
    Fantom,
    Celo,
    Near,
    Moonbeam,
    Sui,
    Aptos,
    Arbitrum,
    Optimism,
    Base,
}

const CHAIN_IDS: &[(Chain, u16)] = &[
    (Chain::Solana, 1),
    (Chain::Ethereum, 2),
    (Chain::Bsc, 4),
    (Chain::Polygon, 5),
    (Chain::Avalanche, 6),
    (Chain::Fantom, 10),
    (Chain::Celo, 14),
    (Chain::Near, 15),
    (Chain::Moonbeam, 16),
    (Chain::Sui, 21),
    (Chain::Aptos, 22),
    (Chain::Arbitrum, 23),
    (Chain::Optimism, 24),
    (Chain::Base, 30),
];

impl Chain {
    pub fn id(&self) -> u16 {
        match self {
            Chain::Solana => 1,
            Chain::Ethereum => 2,
            Chain::Bsc => 4,
            Chain::Polygon => 5,
            Chain::Avalanche => 6,
            Chain::Fantom => 10,
            Chain::Celo => 14,
            Chain::Near => 15,
            Chain::Moonbeam => 16,
            Chain::Sui => 21,
            Chain::Aptos => 22,
            Chain::Arbitrum => 23,
            Chain::Optimism => 24,
            Chain::Base => 30,
        }
    }

    pub fn from_id(id: u16) -> Option<Chain> {
        CHAIN_IDS
            .iter()
            .find(|(_, chain_id)| *chain_id == id)
            .map(|(chain, _)| *chain)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Solana => "Solana",
            Chain::Ethereum => "Ethereum",
            Chain::Bsc => "Bsc",
            Chain::Polygon => "Polygon",
            Chain::Avalanche => "Avalanche",
            Chain::Fantom => "Fantom",
            Chain::Celo => "Celo",
            Chain::Near => "Near",
            Chain::Moonbeam => "Moonbeam",
            Chain::Sui => "Sui",
            Chain::Aptos => "Aptos",
            Chain::Arbitrum => "Arbitrum",
            Chain::Optimism => "Optimism",
            Chain::Base => "Base",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CHAIN_IDS
            .iter()
            .map(|(chain, _)| *chain)
            .find(|chain| chain.name() == s)
            .ok_or_else(|| format!("unknown chain '{s}'"))
    }
}

/// Layout conversion for chain-id items: wire `u16` ↔ logical chain name.
pub struct ChainIdConversion;

impl Conversion for ChainIdConversion {
    fn to_logical(&self, wire: Value) -> Result<Value, ConversionError> {
        let id = wire
            .as_uint()
            .ok_or_else(|| ConversionError::new("expected uint chain id"))?;
        let id = u16::try_from(id).map_err(|_| ConversionError::new("chain id exceeds u16"))?;
        let chain = Chain::from_id(id)
            .ok_or_else(|| ConversionError::new(format!("unknown chain id {id}")))?;
        Ok(Value::str(chain.name()))
    }

    fn to_wire(&self, logical: &Value) -> Result<Value, ConversionError> {
        let name = logical
            .as_str()
            .ok_or_else(|| ConversionError::new("expected chain name"))?;
        let chain = Chain::from_str(name)
            .map_err(|_| ConversionError::new(format!("unknown chain '{name}'")))?;
        Ok(Value::Uint(chain.id() as u128))
    }
}

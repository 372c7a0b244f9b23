use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decoder::Decoded;

/// A trailing data word, declared as `Var<ordinal>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub ordinal: usize,
    pub value: u16,
}

impl Variable {
    pub fn name(&self) -> String {
        format!("Var{}", self.ordinal)
    }
}

/// One decoded entry of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Code(Decoded),
    Data(Variable),
}

impl Unit {
    pub fn width(&self) -> u32 {
        match self {
            Unit::Code(d) => u32::from(d.width),
            Unit::Data(_) => 1,
        }
    }
}

/// Memory address -> decoded unit. Addresses are only ever appended in
/// increasing order, so iteration order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyMap {
    units: BTreeMap<u32, Unit>,
}

impl AssemblyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: u32, unit: Unit) {
        debug_assert!(self.units.keys().next_back().map_or(true, |&last| last < addr));
        self.units.insert(addr, unit);
    }

    pub fn get(&self, addr: u32) -> Option<&Unit> {
        self.units.get(&addr)
    }

    pub fn get_mut(&mut self, addr: u32) -> Option<&mut Unit> {
        self.units.get_mut(&addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Unit)> + '_ {
        self.units.iter().map(|(&a, u)| (a, u))
    }

    pub fn variables(&self) -> impl Iterator<Item = (u32, &Variable)> + '_ {
        self.iter().filter_map(|(a, u)| match u {
            Unit::Data(v) => Some((a, v)),
            Unit::Code(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

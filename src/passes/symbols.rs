/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Flat label-to-address map. RV32I has no bank concept, so this is a
//! plain `HashMap` rather than the wrapped-struct-per-symbol shape a
//! banked target would need.

use serde::Serialize;
use std::collections::HashMap;

pub type SymbolTable = HashMap<String, u32>;

/// A `{ name, address }` snapshot of a `SymbolTable`, sorted by address
/// for deterministic JSON output.
#[derive(Debug, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub address: u32,
}

pub fn snapshot(table: &SymbolTable) -> Vec<SymbolEntry> {
    let mut entries: Vec<SymbolEntry> = table
        .iter()
        .map(|(name, &address)| SymbolEntry {
            name: name.clone(),
            address,
        })
        .collect();
    entries.sort_by_key(|e| e.address);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_sorted_by_address() {
        let mut table = SymbolTable::new();
        table.insert("late".to_string(), 8);
        table.insert("early".to_string(), 0);
        let snap = snapshot(&table);
        assert_eq!(snap[0].name, "early");
        assert_eq!(snap[1].name, "late");
    }
}

// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, fmt::Display};

use log::trace;

use crate::{Operator, RuntimeErrorKind, Value};

/// Identifies the private variable table of one function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    value: Value,
    immutable: bool,
}

type Table = HashMap<String, Cell>;

/// Every variable of a running program. Array elements are stored as
/// separate cells under their composite key, e.g. `T[1][2]`.
#[derive(Debug, Default)]
pub struct Memory {
    globals: Table,
    scopes: HashMap<ScopeId, Table>,
    next_scope: u64,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the key of an array cell out of its evaluated indices.
    #[must_use]
    pub fn composite_key(name: &str, indices: &[Value]) -> String {
        let mut key = name.to_string();

        for index in indices {
            key.push('[');
            key += &index.key_fragment();
            key.push(']');
        }

        key
    }

    /// Writes a variable, creating the cell on first use.
    pub fn save(&mut self, key: &str, value: Value, scope: Option<ScopeId>) -> Result<(), RuntimeErrorKind> {
        let table = self.table_for_write(key, scope);

        match table.get_mut(key) {
            Some(cell) if cell.immutable => Err(RuntimeErrorKind::AssignToIterator { name: key.to_string() }),
            Some(cell) => {
                cell.value = value;
                Ok(())
            }
            None => {
                table.insert(key.to_string(), Cell { value, immutable: false });
                Ok(())
            }
        }
    }

    /// Creates the variable of a `dla` loop, which only [`Memory::increment`]
    /// may change afterwards.
    pub fn bind_iterator(&mut self, key: &str, value: Value, scope: Option<ScopeId>) -> Result<(), RuntimeErrorKind> {
        let table = self.table_for_write(key, scope);

        if table.get(key).is_some_and(|cell| cell.immutable) {
            return Err(RuntimeErrorKind::AssignToIterator { name: key.to_string() });
        }

        table.insert(key.to_string(), Cell { value, immutable: true });
        Ok(())
    }

    /// Binds a parameter in the table of `scope`, shadowing any global.
    pub fn define_local(&mut self, key: &str, value: Value, scope: ScopeId) {
        self.scopes.entry(scope)
            .or_default()
            .insert(key.to_string(), Cell { value, immutable: false });
    }

    #[must_use]
    pub fn get(&self, key: &str, scope: Option<ScopeId>) -> Value {
        self.find(key, scope)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    pub fn delete(&mut self, key: &str, scope: Option<ScopeId>) {
        if let Some(table) = scope.and_then(|scope| self.scopes.get_mut(&scope)) {
            if table.remove(key).is_some() {
                return;
            }
        }

        self.globals.remove(key);
    }

    pub fn increment(&mut self, key: &str, scope: Option<ScopeId>) -> Result<(), RuntimeErrorKind> {
        let next = Value::apply(Operator::Add, self.get(key, scope), Value::Int(1))?;

        match self.find_mut(key, scope) {
            Some(cell) => {
                cell.value = next;
                Ok(())
            }
            None => self.save(key, next, scope),
        }
    }

    pub fn open_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.next_scope);
        self.next_scope += 1;

        self.scopes.insert(id, Table::new());
        trace!("Opened scope {id}");
        id
    }

    pub fn close_scope(&mut self, id: ScopeId) {
        if let Some(table) = self.scopes.remove(&id) {
            trace!("Closed scope {id} holding {} variables", table.len());
        }
    }

    fn find(&self, key: &str, scope: Option<ScopeId>) -> Option<&Cell> {
        scope.and_then(|scope| self.scopes.get(&scope))
            .and_then(|table| table.get(key))
            .or_else(|| self.globals.get(key))
    }

    fn find_mut(&mut self, key: &str, scope: Option<ScopeId>) -> Option<&mut Cell> {
        if let Some(table) = scope.and_then(|scope| self.scopes.get_mut(&scope)) {
            if let Some(cell) = table.get_mut(key) {
                return Some(cell);
            }
        }

        self.globals.get_mut(key)
    }

    /// A call writes to its own table, unless the name only exists globally.
    fn table_for_write(&mut self, key: &str, scope: Option<ScopeId>) -> &mut Table {
        if let Some(scope) = scope {
            let local = self.scopes.get(&scope).is_some_and(|table| table.contains_key(key));
            if local || !self.globals.contains_key(key) {
                return self.scopes.entry(scope).or_default();
            }
        }

        &mut self.globals
    }
}

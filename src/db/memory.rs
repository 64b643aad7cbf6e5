// src/db/memory.rs

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::error::AppError;

/// Mapa id -> registro mais o próximo id a emitir.
/// BTreeMap mantém a listagem estável (ordem de id) entre leituras.
#[derive(Debug)]
pub struct Table<T> {
    pub records: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    /// Ids começam em 1 e nunca são reutilizados, nem depois de um delete.
    pub fn issue_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

// Um lock por repositório: escrita exclusiva, leituras concorrentes.
#[derive(Debug)]
pub struct MemoryTable<T> {
    resource: &'static str,
    inner: RwLock<Table<T>>,
}

impl<T> MemoryTable<T> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            inner: RwLock::new(Table::default()),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Table<T>>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::lock_poisoned(self.resource))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Table<T>>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::lock_poisoned(self.resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let table: MemoryTable<&str> = MemoryTable::new("teste");
        let mut guard = table.write().unwrap();
        let a = guard.issue_id();
        guard.records.insert(a, "a");
        guard.records.remove(&a);
        let b = guard.issue_id();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }
}

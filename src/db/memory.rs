//! In-memory employee store for development and tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{EmployeeStore, EmployeeTransaction, StoreError};
use crate::models::employee::Employee;

#[derive(Debug, Clone, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, Employee>,
}

/// A transaction holds the store lock until it is committed or dropped, so
/// concurrent operations are serialized.
#[derive(Clone, Default)]
pub struct MemoryEmployeeStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn begin(&self) -> Result<Box<dyn EmployeeTransaction>, StoreError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = (*guard).clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl EmployeeTransaction for MemoryTransaction {
    async fn save(&mut self, mut employee: Employee) -> Result<Employee, StoreError> {
        let taken = self
            .staged
            .rows
            .values()
            .any(|row| row.email == employee.email && row.id != employee.id);
        if taken {
            return Err(StoreError::UniqueViolation(format!(
                "email {} is already in use",
                employee.email
            )));
        }

        let id = match employee.id {
            Some(id) if self.staged.rows.contains_key(&id) => id,
            Some(id) => return Err(StoreError::NotFound(id)),
            None => {
                self.staged.last_id += 1;
                self.staged.last_id
            }
        };
        employee.id = Some(id);
        self.staged.rows.insert(id, employee.clone());

        Ok(employee)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(self.staged.rows.get(&id).cloned())
    }

    async fn find_all(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.staged.rows.values().cloned().collect())
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
        self.staged.rows.remove(&id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

use std::fmt;
use std::sync::Arc;
use log::{info, warn};

use crate::db::{EmployeeStore, EmployeeTransaction, StoreError};
use crate::models::employee::Employee;

#[derive(Debug, PartialEq, Eq)]
pub enum ServiceError {
    NotFound(i64),
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(id) => write!(f, "Employee with id {} does not exist", id),
            ServiceError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Store(other),
        }
    }
}

/// Business rules over the employee store. Every public operation runs its
/// store calls inside a single transaction and commits only on success.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        EmployeeService { store }
    }

    pub async fn add_employee(&self, employee: Employee) -> Result<Employee, ServiceError> {
        let mut tx = self.store.begin().await?;
        let saved = tx.save(employee).await?;
        tx.commit().await?;

        info!("Created employee {:?}", saved.id);
        Ok(saved)
    }

    pub async fn find_all_employees(&self) -> Result<Vec<Employee>, ServiceError> {
        let mut tx = self.store.begin().await?;
        let employees = tx.find_all().await?;
        tx.commit().await?;
        Ok(employees)
    }

    pub async fn find_employee_by_id(&self, id: i64) -> Result<Employee, ServiceError> {
        let mut tx = self.store.begin().await?;
        let employee = require_employee(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(employee)
    }

    /// Replaces every field of the employee stored at `id`.
    pub async fn update_employee(&self, id: i64, mut employee: Employee) -> Result<Employee, ServiceError> {
        let mut tx = self.store.begin().await?;
        require_employee(&mut *tx, id).await?;

        employee.id = Some(id);
        let saved = tx.save(employee).await?;
        tx.commit().await?;

        info!("Updated employee {}", id);
        Ok(saved)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), ServiceError> {
        let mut tx = self.store.begin().await?;
        require_employee(&mut *tx, id).await?;

        tx.delete_by_id(id).await?;
        tx.commit().await?;

        info!("Deleted employee {}", id);
        Ok(())
    }
}

async fn require_employee(tx: &mut dyn EmployeeTransaction, id: i64) -> Result<Employee, ServiceError> {
    match tx.find_by_id(id).await? {
        Some(employee) => Ok(employee),
        None => {
            warn!("Employee {} not found", id);
            Err(ServiceError::NotFound(id))
        }
    }
}

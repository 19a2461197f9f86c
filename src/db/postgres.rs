use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{EmployeeStore, EmployeeTransaction, StoreError};
use crate::models::employee::Employee;

const SELECT_COLUMNS: &str = "id, name, email, job_title, profile_picture";

pub struct PostgresEmployeeStore {
    pool: PgPool,
}

impl PostgresEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresEmployeeStore { pool }
    }
}

#[async_trait]
impl EmployeeStore for PostgresEmployeeStore {
    async fn begin(&self) -> Result<Box<dyn EmployeeTransaction>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresTransaction { tx }))
    }
}

pub struct PostgresTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl EmployeeTransaction for PostgresTransaction {
    async fn save(&mut self, employee: Employee) -> Result<Employee, StoreError> {
        let saved = match employee.id {
            None => {
                sqlx::query_as::<_, Employee>(&format!(
                    "INSERT INTO employees (name, email, job_title, profile_picture) \
                     VALUES ($1, $2, $3, $4) RETURNING {}",
                    SELECT_COLUMNS
                ))
                .bind(&employee.name)
                .bind(&employee.email)
                .bind(&employee.job_title)
                .bind(&employee.profile_picture)
                .fetch_one(&mut *self.tx)
                .await?
            }
            Some(id) => {
                sqlx::query_as::<_, Employee>(&format!(
                    "UPDATE employees SET name = $2, email = $3, job_title = $4, profile_picture = $5 \
                     WHERE id = $1 RETURNING {}",
                    SELECT_COLUMNS
                ))
                .bind(id)
                .bind(&employee.name)
                .bind(&employee.email)
                .bind(&employee.job_title)
                .bind(&employee.profile_picture)
                .fetch_optional(&mut *self.tx)
                .await?
                .ok_or(StoreError::NotFound(id))?
            }
        };

        Ok(saved)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(employee)
    }

    async fn find_all(&mut self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees ORDER BY id",
            SELECT_COLUMNS
        ))
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(employees)
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}

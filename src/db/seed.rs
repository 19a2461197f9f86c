use log::info;

use super::{EmployeeStore, StoreError};
use crate::models::employee::Employee;

const SAMPLE_EMPLOYEES: [(&str, &str, &str, &str); 5] = [
    ("John Smith", "john.smith@company.com", "Senior Software Engineer", "John"),
    ("Maria Garcia", "maria.garcia@company.com", "Product Manager", "Maria"),
    ("David Chen", "david.chen@company.com", "DevOps Engineer", "David"),
    ("Sarah Wilson", "sarah.wilson@company.com", "UX/UI Designer", "Sarah"),
    ("Robert Johnson", "robert.johnson@company.com", "QA Lead", "Robert"),
];

/// Replaces the whole directory with the sample employees. Returns how many were stored.
pub async fn seed_employees(store: &dyn EmployeeStore) -> Result<usize, StoreError> {
    info!("Initializing sample employee data...");

    let mut tx = store.begin().await?;
    for existing in tx.find_all().await? {
        if let Some(id) = existing.id {
            tx.delete_by_id(id).await?;
        }
    }

    for (name, email, job_title, first_name) in SAMPLE_EMPLOYEES {
        let picture = format!("https://via.placeholder.com/150?text={}", first_name);
        tx.save(Employee::new(name, email, job_title, Some(picture.as_str()))).await?;
    }
    tx.commit().await?;

    info!("Sample data initialized: {} employees loaded", SAMPLE_EMPLOYEES.len());
    Ok(SAMPLE_EMPLOYEES.len())
}

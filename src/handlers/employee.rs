use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::services::employee::EmployeeService;
use crate::utils::validation::validate_payload;

pub async fn get_employees(
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, AppError> {
    let employees = service.find_all_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee = service.find_employee_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    new_employee: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    let mut employee = new_employee.into_inner();
    validate_payload(&employee)?;

    // ids are assigned by the store
    employee.id = None;
    let created = service.add_employee(employee).await?;

    Ok(HttpResponse::Created().json(created))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
    updates: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let mut employee = updates.into_inner();
    employee.id = Some(id);
    validate_payload(&employee)?;

    let updated = service.update_employee(id, employee).await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_employee(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

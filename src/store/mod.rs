//! Repository seams between handlers and persistence.
//!
//! Handlers receive each trait as `web::Data<dyn …Store>`, so the MySQL
//! backend and the in-process backend are interchangeable.

pub mod memory;
pub mod mysql;

use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Display;

use crate::model::{
    Employee, EmployeeDraft, Expense, ExpenseDraft, FinancialData, FinancialDraft, Payroll,
    PayrollDraft, PayrollFilter,
};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "Not found: {}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Duplicate(String),

    #[display(fmt = "Database error: {}", _0)]
    Database(String),
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // MySQL duplicate-key violations surface as SQLSTATE 23000
            if db_err.code().as_deref() == Some("23000") {
                return StoreError::Duplicate(db_err.message().to_string());
            }
        }
        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Newest-created first.
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;
    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;
    async fn insert_employee(&self, draft: EmployeeDraft) -> StoreResult<Employee>;
    async fn update_employee(
        &self,
        employee_id: &str,
        draft: EmployeeDraft,
    ) -> StoreResult<Option<Employee>>;
    async fn delete_employee(&self, employee_id: &str) -> StoreResult<bool>;
    async fn count_active_employees(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Newest-created first.
    async fn list_payrolls(&self, filter: &PayrollFilter) -> StoreResult<Vec<Payroll>>;
    async fn insert_payroll(&self, draft: PayrollDraft) -> StoreResult<Payroll>;
    /// Acts on the employee's most recent payroll record.
    async fn update_payroll(
        &self,
        employee_id: &str,
        draft: PayrollDraft,
    ) -> StoreResult<Option<Payroll>>;
    /// Removes the employee's most recent payroll record.
    async fn delete_payroll(&self, employee_id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn list_expenses(&self) -> StoreResult<Vec<Expense>>;
    async fn insert_expense(&self, draft: ExpenseDraft) -> StoreResult<Expense>;
    async fn update_expense(&self, id: u64, draft: ExpenseDraft) -> StoreResult<Option<Expense>>;
    async fn delete_expense(&self, id: u64) -> StoreResult<bool>;
}

#[async_trait]
pub trait FinancialStore: Send + Sync {
    async fn list_financial_for_year(&self, year: i32) -> StoreResult<Vec<FinancialData>>;
    async fn insert_financial(&self, draft: FinancialDraft) -> StoreResult<FinancialData>;
    async fn update_financial(
        &self,
        id: u64,
        draft: FinancialDraft,
    ) -> StoreResult<Option<FinancialData>>;
}

/// One handle per collection, all backed by the same store.
#[derive(Clone)]
pub struct Stores {
    pub employees: Arc<dyn EmployeeStore>,
    pub payrolls: Arc<dyn PayrollStore>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub financial: Arc<dyn FinancialStore>,
}

impl Stores {
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: EmployeeStore + PayrollStore + ExpenseStore + FinancialStore + 'static,
    {
        Self {
            employees: backend.clone(),
            payrolls: backend.clone(),
            expenses: backend.clone(),
            financial: backend,
        }
    }
}

//! In-process backend. Used by the HTTP tests and for running the API
//! without a database.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::{
    EmployeeStore, ExpenseStore, FinancialStore, PayrollStore, StoreError, StoreResult,
};
use crate::model::{
    Employee, EmployeeDraft, Expense, ExpenseDraft, FinancialData, FinancialDraft, Month, Payroll,
    PayrollDraft, PayrollFilter,
};

#[derive(Default)]
struct Tables {
    next_id: u64,
    employees: Vec<Employee>,
    payrolls: Vec<Payroll>,
    expenses: Vec<Expense>,
    financial: Vec<FinancialData>,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Database("memory store poisoned".into()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Database("memory store poisoned".into()))
    }
}

fn duplicate_employee(employee_id: &str) -> StoreError {
    StoreError::Duplicate(format!(
        "Employee with employeeId '{employee_id}' already exists"
    ))
}

/// Newest first; ids break ties between records created in the same instant.
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, u64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let mut employees = self.read()?.employees.clone();
        newest_first(&mut employees, |e| (e.created_at, e.id));
        Ok(employees)
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned())
    }

    async fn insert_employee(&self, draft: EmployeeDraft) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        if tables.employees.iter().any(|e| e.employee_id == draft.employee_id) {
            return Err(duplicate_employee(&draft.employee_id));
        }
        let id = tables.next_id();
        let employee = Employee::from_draft(id, draft, Utc::now());
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        draft: EmployeeDraft,
    ) -> StoreResult<Option<Employee>> {
        let mut tables = self.write()?;
        if draft.employee_id != employee_id
            && tables.employees.iter().any(|e| e.employee_id == draft.employee_id)
        {
            return Err(duplicate_employee(&draft.employee_id));
        }
        let Some(employee) = tables
            .employees
            .iter_mut()
            .find(|e| e.employee_id == employee_id)
        else {
            return Ok(None);
        };
        employee.apply(draft, Utc::now());
        Ok(Some(employee.clone()))
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.employee_id != employee_id);
        Ok(tables.employees.len() != before)
    }

    async fn count_active_employees(&self) -> StoreResult<u64> {
        Ok(self.read()?.employees.iter().filter(|e| e.is_active()).count() as u64)
    }
}

/// Index of the employee's most recently created payroll record.
fn latest_payroll(payrolls: &[Payroll], employee_id: &str) -> Option<usize> {
    payrolls
        .iter()
        .enumerate()
        .filter(|(_, p)| p.employee_id == employee_id)
        .max_by_key(|(_, p)| (p.created_at, p.id))
        .map(|(idx, _)| idx)
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn list_payrolls(&self, filter: &PayrollFilter) -> StoreResult<Vec<Payroll>> {
        let mut payrolls: Vec<Payroll> = self
            .read()?
            .payrolls
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        newest_first(&mut payrolls, |p| (p.created_at, p.id));
        Ok(payrolls)
    }

    async fn insert_payroll(&self, draft: PayrollDraft) -> StoreResult<Payroll> {
        let now = Utc::now();
        let today = now.date_naive();
        let mut tables = self.write()?;
        let id = tables.next_id();
        let payroll = Payroll::from_draft(
            id,
            draft,
            &Month::of(today).to_string(),
            today.year(),
            now,
        );
        tables.payrolls.push(payroll.clone());
        Ok(payroll)
    }

    async fn update_payroll(
        &self,
        employee_id: &str,
        draft: PayrollDraft,
    ) -> StoreResult<Option<Payroll>> {
        let mut tables = self.write()?;
        let Some(idx) = latest_payroll(&tables.payrolls, employee_id) else {
            return Ok(None);
        };
        let payroll = &mut tables.payrolls[idx];
        payroll.apply(draft, Utc::now());
        Ok(Some(payroll.clone()))
    }

    async fn delete_payroll(&self, employee_id: &str) -> StoreResult<bool> {
        let mut tables = self.write()?;
        match latest_payroll(&tables.payrolls, employee_id) {
            Some(idx) => {
                tables.payrolls.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn list_expenses(&self) -> StoreResult<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    async fn insert_expense(&self, draft: ExpenseDraft) -> StoreResult<Expense> {
        let mut tables = self.write()?;
        let id = tables.next_id();
        let expense = Expense::from_draft(id, draft, Utc::now());
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn update_expense(&self, id: u64, draft: ExpenseDraft) -> StoreResult<Option<Expense>> {
        let mut tables = self.write()?;
        let Some(expense) = tables.expenses.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        expense.apply(draft, Utc::now());
        Ok(Some(expense.clone()))
    }

    async fn delete_expense(&self, id: u64) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let before = tables.expenses.len();
        tables.expenses.retain(|e| e.id != id);
        Ok(tables.expenses.len() != before)
    }
}

#[async_trait]
impl FinancialStore for MemoryStore {
    async fn list_financial_for_year(&self, year: i32) -> StoreResult<Vec<FinancialData>> {
        Ok(self
            .read()?
            .financial
            .iter()
            .filter(|f| f.year == year)
            .cloned()
            .collect())
    }

    async fn insert_financial(&self, draft: FinancialDraft) -> StoreResult<FinancialData> {
        let mut tables = self.write()?;
        let id = tables.next_id();
        let record = FinancialData::from_draft(id, draft, Utc::now());
        tables.financial.push(record.clone());
        Ok(record)
    }

    async fn update_financial(
        &self,
        id: u64,
        draft: FinancialDraft,
    ) -> StoreResult<Option<FinancialData>> {
        let mut tables = self.write()?;
        let Some(record) = tables.financial.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        record.apply(draft, Utc::now());
        Ok(Some(record.clone()))
    }
}

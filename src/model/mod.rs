pub mod employee;
pub mod expense;
pub mod financial;
pub mod month;
pub mod payroll;
pub mod serde_helpers;

pub use employee::{Employee, EmployeeDraft, EmployeeStatus};
pub use expense::{Expense, ExpenseDraft};
pub use financial::{ExpenseBreakdown, FinancialData, FinancialDraft, IncomeBreakdown};
pub use month::Month;
pub use payroll::{FuelExpense, Payroll, PayrollDraft, PayrollFilter};

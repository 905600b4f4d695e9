pub mod dashboard;
pub mod employee;
pub mod expense;
pub mod financial;
pub mod health;
pub mod payroll;

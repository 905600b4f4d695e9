//! Pure reducers turning stored records into the view-models the frontend renders.

pub mod dashboard;
pub mod expense;
pub mod financial;
pub mod format;
pub mod payroll;

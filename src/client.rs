//! Typed HTTP client for the reports API, as used by dashboard frontends and scripts.
//!
//! Every call unwraps the `{ success, data }` envelope and turns failures into
//! [`ClientError`]. A refused connection gets a message naming the usual causes.

use std::env;
use std::time::Duration;

use derive_more::Display;
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error};

use crate::model::{Employee, Expense, FinancialData, Payroll, PayrollFilter};
use crate::report::dashboard::{Hiring, Overview};
use crate::report::expense::{ExpenseRow, ExpenseSummary};
use crate::report::financial::FinancialAnalytics;
use crate::report::payroll::{PayrollRow, PayrollSummary, SalaryTotals};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Display)]
pub enum ClientError {
    #[display(
        fmt = "Cannot connect to backend server at {}. Please ensure: 1) the server is running, 2) it listens on the expected port, 3) no firewall is blocking the connection.",
        base_url
    )]
    Connection { base_url: String },

    /// Non-2xx answer; `message` is the body's `error` field when present
    #[display(fmt = "{}", message)]
    Api { status: u16, message: String },

    #[display(fmt = "request failed: {}", _0)]
    Request(String),

    #[display(fmt = "unexpected response body: {}", _0)]
    Decode(String),
}

impl std::error::Error for ClientError {}

pub type ClientResult<T> = Result<T, ClientError>;

/// `data` when the body is an envelope carrying a truthy `data`, else the whole body.
pub fn unwrap_envelope(body: Value) -> Value {
    if body.get("success").is_none() {
        return body;
    }
    match body.get("data") {
        Some(data) if is_truthy(data) => data.clone(),
        _ => body,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Message for a failed response: the body's `error`, or a status line.
fn error_message(status: StatusCode, body: Option<&Value>) -> String {
    match body {
        None => "Request failed".to_string(),
        Some(body) => body
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16())),
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Base URL from `REPORTS_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        Self::new(env::var("REPORTS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the unwrapped payload.
    pub async fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "API request");

        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            error!(endpoint, error = %e, "API request failed");
            if e.is_connect() {
                ClientError::Connection {
                    base_url: self.base_url.clone(),
                }
            } else {
                ClientError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = error_message(status, body.as_ref());
            error!(endpoint, status = status.as_u16(), error = %message, "API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(unwrap_envelope(body))
    }

    async fn call<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.request(method, endpoint, query, body).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> ClientResult<T> {
        self.call::<T, Value>(Method::GET, endpoint, query, None).await
    }

    async fn send<T, B>(&self, method: Method, endpoint: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(method, endpoint, &[], Some(body)).await
    }

    async fn delete(&self, endpoint: &str) -> ClientResult<Value> {
        self.request::<Value>(Method::DELETE, endpoint, &[], None).await
    }

    pub async fn health(&self) -> ClientResult<Value> {
        self.request::<Value>(Method::GET, "/health", &[], None).await
    }

    // dashboard

    pub async fn dashboard_overview(&self, year: Option<i32>) -> ClientResult<Overview> {
        let query: Vec<(&str, String)> = year.map(|y| ("year", y.to_string())).into_iter().collect();
        self.get("/dashboard/overview", &query).await
    }

    pub async fn dashboard_hiring(&self) -> ClientResult<Hiring> {
        self.get("/dashboard/hiring", &[]).await
    }

    // employees

    pub async fn employees(&self) -> ClientResult<Vec<Employee>> {
        self.get("/employees", &[]).await
    }

    pub async fn employee(&self, employee_id: &str) -> ClientResult<Employee> {
        self.get(&format!("/employees/{employee_id}"), &[]).await
    }

    pub async fn create_employee<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<Employee> {
        self.send(Method::POST, "/employees", body).await
    }

    pub async fn update_employee<B: Serialize + ?Sized>(
        &self,
        employee_id: &str,
        body: &B,
    ) -> ClientResult<Employee> {
        self.send(Method::PUT, &format!("/employees/{employee_id}"), body).await
    }

    pub async fn delete_employee(&self, employee_id: &str) -> ClientResult<Value> {
        self.delete(&format!("/employees/{employee_id}")).await
    }

    // payroll

    pub async fn payrolls(&self, filter: &PayrollFilter) -> ClientResult<Vec<PayrollRow>> {
        let mut query = Vec::new();
        if let Some(month) = &filter.month {
            query.push(("month", month.clone()));
        }
        if let Some(year) = filter.year {
            query.push(("year", year.to_string()));
        }
        self.get("/payroll", &query).await
    }

    pub async fn payroll_summary(&self) -> ClientResult<PayrollSummary> {
        self.get("/payroll/summary", &[]).await
    }

    pub async fn total_salaries(&self) -> ClientResult<SalaryTotals> {
        self.get("/payroll/total-salaries", &[]).await
    }

    pub async fn create_payroll<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<Payroll> {
        self.send(Method::POST, "/payroll", body).await
    }

    pub async fn update_payroll<B: Serialize + ?Sized>(
        &self,
        employee_id: &str,
        body: &B,
    ) -> ClientResult<Payroll> {
        self.send(Method::PUT, &format!("/payroll/{employee_id}"), body).await
    }

    pub async fn delete_payroll(&self, employee_id: &str) -> ClientResult<Value> {
        self.delete(&format!("/payroll/{employee_id}")).await
    }

    // expenses

    pub async fn expenses(&self) -> ClientResult<Vec<ExpenseRow>> {
        self.get("/expenses", &[]).await
    }

    pub async fn expense_summary(&self) -> ClientResult<ExpenseSummary> {
        self.get("/expenses/summary", &[]).await
    }

    pub async fn create_expense<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<Expense> {
        self.send(Method::POST, "/expenses", body).await
    }

    pub async fn update_expense<B: Serialize + ?Sized>(&self, id: u64, body: &B) -> ClientResult<Expense> {
        self.send(Method::PUT, &format!("/expenses/{id}"), body).await
    }

    pub async fn delete_expense(&self, id: u64) -> ClientResult<Value> {
        self.delete(&format!("/expenses/{id}")).await
    }

    // financial

    pub async fn financial_analytics(&self, year: i32) -> ClientResult<FinancialAnalytics> {
        self.get("/financial/analytics", &[("year", year.to_string())]).await
    }

    pub async fn create_financial<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<FinancialData> {
        self.send(Method::POST, "/financial", body).await
    }

    pub async fn update_financial<B: Serialize + ?Sized>(
        &self,
        id: u64,
        body: &B,
    ) -> ClientResult<FinancialData> {
        self.send(Method::PUT, &format!("/financial/{id}"), body).await
    }
}

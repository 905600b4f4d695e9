use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use utoipa::ToSchema;

/// Fuel allowance. Older payroll rows stored a bare number, newer ones an
/// object with the vehicle; both are resolved into this type when read.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FuelExpense {
    #[default]
    None,
    Flat(f64),
    WithVehicle { amount: f64, vehicle_number: String },
}

pub const DEFAULT_VEHICLE: &str = "Company Shuttle";

impl FuelExpense {
    /// Decodes any stored or submitted shape. Malformed values fall back to `None`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self::flat(n.as_f64().unwrap_or(0.0)),
            Value::Object(obj) => {
                let amount = obj.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
                let vehicle = obj
                    .get("vehicleNumber")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|v| !v.is_empty());
                match vehicle {
                    Some(v) => Self::WithVehicle {
                        amount: sanitize(amount),
                        vehicle_number: v.to_string(),
                    },
                    None => Self::flat(amount),
                }
            }
            _ => Self::None,
        }
    }

    fn flat(amount: f64) -> Self {
        Self::Flat(sanitize(amount))
    }

    pub fn amount(&self) -> f64 {
        match self {
            FuelExpense::None => 0.0,
            FuelExpense::Flat(amount) => *amount,
            FuelExpense::WithVehicle { amount, .. } => *amount,
        }
    }

    pub fn vehicle(&self) -> &str {
        match self {
            FuelExpense::WithVehicle { vehicle_number, .. } => vehicle_number,
            _ => DEFAULT_VEHICLE,
        }
    }

    /// Canonical stored shape: `null` or `{amount, vehicleNumber?}`.
    pub fn to_value(&self) -> Value {
        match self {
            FuelExpense::None => Value::Null,
            FuelExpense::Flat(amount) => serde_json::json!({ "amount": amount }),
            FuelExpense::WithVehicle {
                amount,
                vehicle_number,
            } => serde_json::json!({ "amount": amount, "vehicleNumber": vehicle_number }),
        }
    }
}

fn sanitize(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

impl Serialize for FuelExpense {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("amount", &self.amount())?;
        if let FuelExpense::WithVehicle { vehicle_number, .. } = self {
            map.serialize_entry("vehicleNumber", vehicle_number)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FuelExpense {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(FuelExpense::from_value(&value))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub id: u64,
    /// References `Employee.employeeId`; not enforced
    pub employee_id: String,
    pub employee_name: String,
    pub monthly_salary: f64,
    pub annual_package: f64,
    pub mobile_recharge: f64,
    #[schema(value_type = Object, example = json!({"amount": 300, "vehicleNumber": "MH12AB1234"}))]
    pub fuel_expense: FuelExpense,
    pub monthly_incentive: f64,
    pub gift_voucher: f64,
    #[schema(example = "January")]
    pub month: String,
    pub year: i32,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollDraft {
    pub employee_id: String,
    pub employee_name: String,
    pub monthly_salary: f64,
    pub annual_package: f64,
    pub mobile_recharge: Option<f64>,
    pub fuel_expense: Option<FuelExpense>,
    pub monthly_incentive: Option<f64>,
    pub gift_voucher: Option<f64>,
    pub month: Option<String>,
    pub year: Option<i32>,
}

/// Optional `?month=&year=` narrowing for payroll listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayrollFilter {
    pub month: Option<String>,
    pub year: Option<i32>,
}

impl PayrollFilter {
    pub fn matches(&self, payroll: &Payroll) -> bool {
        self.month.as_ref().is_none_or(|m| &payroll.month == m)
            && self.year.is_none_or(|y| payroll.year == y)
    }
}

impl Payroll {
    /// `default_month`/`default_year` fill a draft that omitted its period.
    pub fn from_draft(
        id: u64,
        draft: PayrollDraft,
        default_month: &str,
        default_year: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            employee_id: draft.employee_id,
            employee_name: draft.employee_name,
            monthly_salary: draft.monthly_salary,
            annual_package: draft.annual_package,
            mobile_recharge: draft.mobile_recharge.unwrap_or(0.0),
            fuel_expense: draft.fuel_expense.unwrap_or_default(),
            monthly_incentive: draft.monthly_incentive.unwrap_or(0.0),
            gift_voucher: draft.gift_voucher.unwrap_or(0.0),
            month: draft.month.unwrap_or_else(|| default_month.to_string()),
            year: draft.year.unwrap_or(default_year),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: PayrollDraft, now: DateTime<Utc>) {
        self.employee_id = draft.employee_id;
        self.employee_name = draft.employee_name;
        self.monthly_salary = draft.monthly_salary;
        self.annual_package = draft.annual_package;
        if let Some(v) = draft.mobile_recharge {
            self.mobile_recharge = v;
        }
        if let Some(v) = draft.fuel_expense {
            self.fuel_expense = v;
        }
        if let Some(v) = draft.monthly_incentive {
            self.monthly_incentive = v;
        }
        if let Some(v) = draft.gift_voucher {
            self.gift_voucher = v;
        }
        if let Some(v) = draft.month {
            self.month = v;
        }
        if let Some(v) = draft.year {
            self.year = v;
        }
        self.updated_at = now;
    }
}

//! Wire schema for the Blaze admin REST API and live feed.
//!
//! The backend is a DRF service: decimals may arrive as strings, lists
//! may be plain arrays or paginated `{results: [...]}` envelopes, and
//! most fields beyond identifiers are optional. Types here absorb that
//! variance so pages never touch raw JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::net::http::ApiError;

/// Staff roles that may access any admin page at all.
const STAFF_ROLES: &[&str] = &["admin", "manager_staff", "employee_staff", "staff"];

/// The authenticated staff member, as returned by `users/me/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

impl UserProfile {
    /// "First Last", falling back to the email when names are absent.
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_owned()
        }
    }

    pub fn is_manager(&self) -> bool {
        self.user_type.as_deref() == Some("manager_staff")
    }

    pub fn is_employee(&self) -> bool {
        self.user_type.as_deref() == Some("employee_staff")
    }

    pub fn is_staff(&self) -> bool {
        self.user_type
            .as_deref()
            .is_some_and(|role| STAFF_ROLES.contains(&role))
    }
}

/// Lenient deserializer for DRF decimals that may be strings or numbers.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }))
}

/// Decode a list body that is either a plain array or a DRF-paginated
/// `{results}` envelope.
///
/// # Errors
///
/// `MalformedResponse` when the body is neither shape.
pub fn rows_from_value<T: serde::de::DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    let rows = match body {
        Value::Array(_) => body,
        Value::Object(mut map) => map
            .remove("results")
            .ok_or_else(|| ApiError::MalformedResponse("list body without results".to_owned()))?,
        _ => return Err(ApiError::MalformedResponse("list body is not a list".to_owned())),
    };
    serde_json::from_value(rows).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

#[derive(Clone, Debug, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub seats: Option<u32>,
    pub registration_number: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_price: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_phone: Option<String>,
}

/// Payload for creating a vehicle.
#[derive(Clone, Debug, Serialize)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub transmission: String,
    pub fuel_type: String,
    pub seats: u32,
    pub registration_number: String,
    pub daily_price: f64,
    pub city: String,
    pub category: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub must_reset_password: Option<bool>,
    #[serde(default)]
    pub onboarding_completed: Option<bool>,
    #[serde(default)]
    pub is_blocked: Option<bool>,
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub license_file: Option<String>,
    #[serde(default)]
    pub id_card_file: Option<String>,
    #[serde(default)]
    pub insurance_file: Option<String>,
}

/// Payload for inviting a ride driver.
#[derive(Clone, Debug, Serialize)]
pub struct DriverInvite {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_plate: String,
    pub category: String,
    pub role: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeliveryDriver {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_blocked: Option<bool>,
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for inviting a delivery driver.
#[derive(Clone, Debug, Serialize)]
pub struct DeliveryDriverInvite {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub vehicle_type: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub vehicle: i64,
    pub user: i64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub identification_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub renter_name: Option<String>,
    #[serde(default)]
    pub renter_phone: Option<String>,
}

/// Aggregate counters from `admin/analytics/summary/`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Summary {
    #[serde(default)]
    pub rides_live: i64,
    #[serde(default)]
    pub rides_waiting_pickup: i64,
    #[serde(default)]
    pub rides_completed: i64,
    #[serde(default)]
    pub cancel_rate: f64,
    #[serde(default)]
    pub avg_pickup_time_sec: f64,
    #[serde(default)]
    pub avg_ride_duration_sec: f64,
    #[serde(default)]
    pub rentals_active: i64,
    #[serde(default)]
    pub incidents_last_hour: i64,
    #[serde(default)]
    pub tickets_open: i64,
    #[serde(default)]
    pub gmv: f64,
    #[serde(default)]
    pub drivers_earnings: f64,
    #[serde(default)]
    pub platform_commission: f64,
}

/// One row of the live ride/rental stream.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LiveRow {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
}

/// One operational issue row.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct IssueRow {
    pub ts: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HourPoint {
    pub t: String,
    #[serde(default)]
    pub rides: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub d: String,
    #[serde(default)]
    pub gmv: f64,
    #[serde(default)]
    pub commission: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PaymentSplit {
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub mobile_money: f64,
    #[serde(default)]
    pub wallet: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TopDriver {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rides: i64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub revenue: f64,
}

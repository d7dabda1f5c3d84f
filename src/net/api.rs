//! Typed endpoints over the authenticated client.
//!
//! One method per backend operation; pages call these and never build
//! paths or JSON bodies themselves. List endpoints go through
//! `rows_from_value` so pagination envelopes and plain arrays both work.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::{Value, json};

use crate::net::http::{ApiError, ApiRequest, HttpClient, describe_error_body};
use crate::net::types::{
    DeliveryDriver, DeliveryDriverInvite, Driver, DriverInvite, HourPoint, IssueRow, LiveRow,
    NewVehicle, PaymentSplit, Rental, RevenuePoint, Summary, TopDriver, UserRow, Vehicle,
    rows_from_value,
};

/// Analytics query window shared by the dashboard endpoints.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsFilter {
    pub city: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl AnalyticsFilter {
    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(city) = &self.city {
            if !city.is_empty() {
                query.push(("city".to_owned(), city.clone()));
            }
        }
        if let Some(from) = &self.from {
            if !from.is_empty() {
                query.push(("from".to_owned(), from.clone()));
            }
        }
        if let Some(to) = &self.to {
            if !to.is_empty() {
                query.push(("to".to_owned(), to.clone()));
            }
        }
        query
    }
}

#[derive(Clone)]
pub struct Api {
    http: HttpClient,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        req: ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        let body: Value = self.http.fetch_json(req).await?;
        rows_from_value(body)
    }

    /// Send a mutation and map non-2xx bodies to their human message.
    async fn execute(&self, req: ApiRequest, fallback: &str) -> Result<Value, ApiError> {
        let resp = self.http.request(req).await?;
        if resp.ok() {
            Ok(resp.body)
        } else {
            Err(ApiError::NetworkOrServer(describe_error_body(&resp.body, fallback)))
        }
    }

    // Vehicles ------------------------------------------------------------

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        self.fetch_rows(ApiRequest::get("vehicles/")).await
    }

    pub async fn get_vehicle(&self, id: i64) -> Result<Vehicle, ApiError> {
        self.http.fetch_json(ApiRequest::get(format!("vehicles/{id}/"))).await
    }

    pub async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<(), ApiError> {
        let body = serde_json::to_value(vehicle)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        self.execute(ApiRequest::post("vehicles/", body), "Could not create the vehicle")
            .await?;
        Ok(())
    }

    // Ride drivers --------------------------------------------------------

    pub async fn list_drivers(&self) -> Result<Vec<Driver>, ApiError> {
        self.fetch_rows(ApiRequest::get("drivers/")).await
    }

    pub async fn get_driver(&self, id: i64) -> Result<Driver, ApiError> {
        self.http.fetch_json(ApiRequest::get(format!("drivers/{id}/"))).await
    }

    pub async fn invite_driver(&self, invite: &DriverInvite) -> Result<(), ApiError> {
        let body = serde_json::to_value(invite)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        self.execute(ApiRequest::post("drivers/invite/", body), "Could not invite the driver")
            .await?;
        Ok(())
    }

    pub async fn resend_driver_invite(&self, id: i64) -> Result<(), ApiError> {
        self.execute(
            ApiRequest::post(format!("drivers/{id}/resend-invite/"), json!({})),
            "Could not resend the invite",
        )
        .await?;
        Ok(())
    }

    pub async fn set_driver_block(
        &self,
        id: i64,
        blocked: bool,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.execute(
            ApiRequest::post(
                format!("drivers/{id}/block/"),
                json!({ "is_blocked": blocked, "block_reason": reason }),
            ),
            "Could not update the block state",
        )
        .await?;
        Ok(())
    }

    /// Mark a driver's onboarding complete and lift the forced password
    /// reset.
    pub async fn validate_driver(&self, id: i64) -> Result<(), ApiError> {
        self.execute(
            ApiRequest::patch(
                format!("drivers/{id}/"),
                json!({ "onboarding_completed": true, "must_reset_password": false }),
            ),
            "Could not validate the driver",
        )
        .await?;
        Ok(())
    }

    // Delivery drivers ----------------------------------------------------

    pub async fn list_delivery_drivers(&self) -> Result<Vec<DeliveryDriver>, ApiError> {
        self.fetch_rows(ApiRequest::get("delivery/admin/drivers/")).await
    }

    pub async fn create_delivery_driver(
        &self,
        invite: &DeliveryDriverInvite,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(invite)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        self.execute(
            ApiRequest::post("delivery/drivers/create/", body),
            "Could not create the delivery driver",
        )
        .await?;
        Ok(())
    }

    pub async fn resend_delivery_invite(&self, id: i64) -> Result<(), ApiError> {
        self.execute(
            ApiRequest::post(format!("delivery/admin/drivers/{id}/resend_invite/"), json!({})),
            "Could not resend the invite",
        )
        .await?;
        Ok(())
    }

    pub async fn toggle_delivery_block(&self, id: i64, reason: &str) -> Result<(), ApiError> {
        self.execute(
            ApiRequest::post(
                format!("delivery/admin/drivers/{id}/toggle_block/"),
                json!({ "reason": reason }),
            ),
            "Could not update the block state",
        )
        .await?;
        Ok(())
    }

    pub async fn validate_delivery_driver(&self, id: i64) -> Result<(), ApiError> {
        self.execute(
            ApiRequest::post(format!("delivery/admin/drivers/{id}/validate_driver/"), json!({})),
            "Could not validate the driver",
        )
        .await?;
        Ok(())
    }

    // Users and rentals ---------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<UserRow>, ApiError> {
        self.fetch_rows(ApiRequest::get("users/")).await
    }

    pub async fn list_rentals(&self) -> Result<Vec<Rental>, ApiError> {
        self.fetch_rows(ApiRequest::get("rental/")).await
    }

    // Analytics -----------------------------------------------------------

    pub async fn analytics_summary(&self, filter: &AnalyticsFilter) -> Result<Summary, ApiError> {
        self.http
            .fetch_json(ApiRequest::get("admin/analytics/summary/").with_query(filter.query()))
            .await
    }

    pub async fn analytics_timeseries(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<HourPoint>, ApiError> {
        self.fetch_rows(ApiRequest::get("admin/analytics/timeseries/").with_query(filter.query()))
            .await
    }

    pub async fn analytics_revenue_daily(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<RevenuePoint>, ApiError> {
        self.fetch_rows(
            ApiRequest::get("admin/analytics/revenue_daily/").with_query(filter.query()),
        )
        .await
    }

    pub async fn analytics_payment_split(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<PaymentSplit, ApiError> {
        self.http
            .fetch_json(ApiRequest::get("admin/analytics/payment_split/").with_query(filter.query()))
            .await
    }

    pub async fn analytics_top_drivers(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<TopDriver>, ApiError> {
        self.fetch_rows(ApiRequest::get("admin/analytics/top_drivers/").with_query(filter.query()))
            .await
    }

    pub async fn analytics_issues(&self, filter: &AnalyticsFilter) -> Result<Vec<IssueRow>, ApiError> {
        self.fetch_rows(ApiRequest::get("admin/analytics/issues/").with_query(filter.query()))
            .await
    }

    pub async fn analytics_live(&self, filter: &AnalyticsFilter) -> Result<Vec<LiveRow>, ApiError> {
        self.fetch_rows(ApiRequest::get("admin/analytics/live/").with_query(filter.query()))
            .await
    }
}

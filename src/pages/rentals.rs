//! Rental bookings with vehicle names joined in client-side.

use std::collections::HashMap;

use leptos::prelude::*;

use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::Api;
use crate::util::format::format_xaf;

#[component]
pub fn RentalsPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <RentalsContent/>
        </ProtectedRoute>
    }
}

#[component]
fn RentalsContent() -> impl IntoView {
    let api = expect_context::<Api>();

    // Rentals reference vehicles by id only, so both lists load together.
    let data = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let (rentals, vehicles) = futures::join!(api.list_rentals(), api.list_vehicles());
                rentals.map(|rentals| (rentals, vehicles.unwrap_or_default()))
            }
        }
    });

    let status_filter = RwSignal::new("all".to_owned());

    view! {
        <div class="rentals-page">
            <PageHeader title="Rentals"/>

            <select
                class="rentals-page__filter"
                on:change=move |ev| status_filter.set(event_target_value(&ev))
            >
                <option value="all">"All statuses"</option>
                <option value="pending">"Pending"</option>
                <option value="confirmed">"Confirmed"</option>
                <option value="active">"Active"</option>
                <option value="completed">"Completed"</option>
                <option value="cancelled">"Cancelled"</option>
            </select>

            <Suspense fallback=move || view! { <p>"Loading rentals..."</p> }>
                {move || {
                    data.get()
                        .map(|result| match result {
                            Ok((rentals, vehicles)) => {
                                let names: HashMap<i64, String> = vehicles
                                    .into_iter()
                                    .map(|v| (v.id, format!("{} {}", v.brand, v.model)))
                                    .collect();
                                let wanted = status_filter.get();
                                let rows: Vec<_> = rentals
                                    .into_iter()
                                    .filter(|r| wanted == "all" || r.status == wanted)
                                    .collect();
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Code"</th>
                                                <th>"Vehicle"</th>
                                                <th>"Renter"</th>
                                                <th>"Dates"</th>
                                                <th>"Status"</th>
                                                <th>"Amount"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|r| {
                                                    let vehicle = names
                                                        .get(&r.vehicle)
                                                        .cloned()
                                                        .unwrap_or_else(|| format!("#{}", r.vehicle));
                                                    let renter = r
                                                        .renter_name
                                                        .clone()
                                                        .unwrap_or_else(|| format!("user #{}", r.user));
                                                    let amount = r
                                                        .total_amount
                                                        .map(format_xaf)
                                                        .unwrap_or_default();
                                                    view! {
                                                        <tr>
                                                            <td>{r.identification_code.unwrap_or_default()}</td>
                                                            <td>{vehicle}</td>
                                                            <td>{renter}</td>
                                                            <td>{format!("{} to {}", r.start_date, r.end_date)}</td>
                                                            <td>{r.status}</td>
                                                            <td>{amount}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
                            }
                            Err(e) => view! { <p class="page-error">{e.to_string()}</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

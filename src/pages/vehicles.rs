//! Rental fleet: vehicle list plus the add-vehicle form.

use leptos::prelude::*;

use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::Api;
use crate::net::types::NewVehicle;
use crate::util::format::format_xaf;

#[component]
pub fn VehiclesPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <VehiclesContent/>
        </ProtectedRoute>
    }
}

#[component]
fn VehiclesContent() -> impl IntoView {
    let api = expect_context::<Api>();

    let reload = RwSignal::new(0_u32);
    let vehicles = LocalResource::new({
        let api = api.clone();
        move || {
            reload.track();
            let api = api.clone();
            async move { api.list_vehicles().await }
        }
    });

    view! {
        <div class="vehicles-page">
            <PageHeader title="Vehicles"/>

            <AddVehicleForm on_created=Callback::new(move |()| reload.update(|n| *n += 1))/>

            <Suspense fallback=move || view! { <p>"Loading vehicles..."</p> }>
                {move || {
                    vehicles
                        .get()
                        .map(|result| match result {
                            Ok(rows) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Vehicle"</th>
                                                <th>"Plate"</th>
                                                <th>"City"</th>
                                                <th>"Daily price"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|v| {
                                                    let name = format!("{} {}", v.brand, v.model);
                                                    let price = v
                                                        .daily_price
                                                        .map(format_xaf)
                                                        .unwrap_or_default();
                                                    view! {
                                                        <tr>
                                                            <td>{name}</td>
                                                            <td>{v.registration_number}</td>
                                                            <td>{v.city.unwrap_or_default()}</td>
                                                            <td>{price}</td>
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

#[component]
fn AddVehicleForm(on_created: Callback<()>) -> impl IntoView {
    let api = expect_context::<Api>();

    let brand = RwSignal::new(String::new());
    let model = RwSignal::new(String::new());
    let transmission = RwSignal::new("manual".to_owned());
    let fuel_type = RwSignal::new("essence".to_owned());
    let seats = RwSignal::new("5".to_owned());
    let plate = RwSignal::new(String::new());
    let daily_price = RwSignal::new(String::new());
    let city = RwSignal::new("Libreville".to_owned());
    let category = RwSignal::new("berline".to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let Ok(seat_count) = seats.get().trim().parse::<u32>() else {
            error.set(Some("Seats must be a number".to_owned()));
            return;
        };
        let Ok(price) = daily_price.get().trim().parse::<f64>() else {
            error.set(Some("Daily price must be a number".to_owned()));
            return;
        };
        let vehicle = NewVehicle {
            brand: brand.get().trim().to_owned(),
            model: model.get().trim().to_owned(),
            transmission: transmission.get(),
            fuel_type: fuel_type.get(),
            seats: seat_count,
            registration_number: plate.get().trim().to_owned(),
            daily_price: price,
            city: city.get(),
            category: category.get(),
        };
        if vehicle.brand.is_empty() || vehicle.model.is_empty() || vehicle.registration_number.is_empty() {
            error.set(Some("Brand, model and plate are required".to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.create_vehicle(&vehicle).await {
                Ok(()) => {
                    busy.set(false);
                    brand.set(String::new());
                    model.set(String::new());
                    plate.set(String::new());
                    daily_price.set(String::new());
                    on_created.run(());
                }
                Err(e) => {
                    busy.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <form
            class="entry-form"
            on:submit=move |ev| {
                ev.prevent_default();
                submit.run(());
            }
        >
            <h2>"Add a vehicle"</h2>
            <div class="entry-form__grid">
                <input
                    placeholder="Brand"
                    prop:value=move || brand.get()
                    on:input=move |ev| brand.set(event_target_value(&ev))
                />
                <input
                    placeholder="Model"
                    prop:value=move || model.get()
                    on:input=move |ev| model.set(event_target_value(&ev))
                />
                <input
                    placeholder="Registration number"
                    prop:value=move || plate.get()
                    on:input=move |ev| plate.set(event_target_value(&ev))
                />
                <input
                    placeholder="Daily price (XAF)"
                    prop:value=move || daily_price.get()
                    on:input=move |ev| daily_price.set(event_target_value(&ev))
                />
                <input
                    placeholder="Seats"
                    prop:value=move || seats.get()
                    on:input=move |ev| seats.set(event_target_value(&ev))
                />
                <select on:change=move |ev| transmission.set(event_target_value(&ev))>
                    <option value="manual">"Manual"</option>
                    <option value="automatic">"Automatic"</option>
                </select>
                <select on:change=move |ev| fuel_type.set(event_target_value(&ev))>
                    <option value="essence">"Essence"</option>
                    <option value="diesel">"Diesel"</option>
                    <option value="hybrid">"Hybrid"</option>
                </select>
                <select on:change=move |ev| city.set(event_target_value(&ev))>
                    <option value="Libreville">"Libreville"</option>
                    <option value="Port-Gentil">"Port-Gentil"</option>
                    <option value="Franceville">"Franceville"</option>
                </select>
                <select on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="berline">"Berline"</option>
                    <option value="suv">"SUV"</option>
                    <option value="pickup">"Pickup"</option>
                    <option value="van">"Van"</option>
                </select>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="entry-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Saving..." } else { "Add vehicle" }}
            </button>
        </form>
    }
}

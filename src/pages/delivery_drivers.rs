//! Courier fleet management for the delivery vertical.

#[cfg(test)]
#[path = "delivery_drivers_test.rs"]
mod delivery_drivers_test;

use leptos::prelude::*;

use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::Api;
use crate::net::types::{DeliveryDriver, DeliveryDriverInvite};
use crate::state::session::SessionState;
use crate::util::nav;

/// Normalize a Gabonese phone number to the `241...` form the delivery
/// backend expects. Strips spaces and a leading `+` or `00`; bare local
/// numbers get the country code prefixed.
pub fn normalize_gabon_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.strip_prefix("00").unwrap_or(&digits);
    if digits.starts_with("241") {
        digits.to_owned()
    } else {
        format!("241{digits}")
    }
}

#[component]
pub fn DeliveryDriversPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DeliveryDriversContent/>
        </ProtectedRoute>
    }
}

#[component]
fn DeliveryDriversContent() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let api = expect_context::<Api>();

    Effect::new(move || {
        let state = session.get();
        if let Some(user) = state.user {
            if !user.is_staff() {
                nav::redirect("/dashboard");
            }
        }
    });

    let reload = RwSignal::new(0_u32);
    let drivers = LocalResource::new({
        let api = api.clone();
        move || {
            reload.track();
            let api = api.clone();
            async move { api.list_delivery_drivers().await }
        }
    });

    let feedback = RwSignal::new(None::<String>);

    let on_resend = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.resend_delivery_invite(id).await {
                    Ok(()) => feedback.set(Some("Invite re-sent".to_owned())),
                    Err(e) => feedback.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_toggle_block = {
        let api = api.clone();
        Callback::new(move |(id, reason): (i64, String)| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.toggle_delivery_block(id, &reason).await {
                    Ok(()) => reload.update(|n| *n += 1),
                    Err(e) => feedback.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_validate = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.validate_delivery_driver(id).await {
                    Ok(()) => reload.update(|n| *n += 1),
                    Err(e) => feedback.set(Some(e.to_string())),
                }
            });
        })
    };

    view! {
        <div class="delivery-page">
            <PageHeader title="Delivery drivers"/>

            <CreateDeliveryDriverForm on_created=Callback::new(move |()| reload.update(|n| *n += 1))/>

            <Show when=move || feedback.get().is_some()>
                <p class="page-notice">{move || feedback.get().unwrap_or_default()}</p>
            </Show>

            <Suspense fallback=move || view! { <p>"Loading couriers..."</p> }>
                {move || {
                    drivers
                        .get()
                        .map(|result| match result {
                            Ok(rows) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Courier"</th>
                                                <th>"Phone"</th>
                                                <th>"City"</th>
                                                <th>"Vehicle"</th>
                                                <th>"Status"</th>
                                                <th>"Actions"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|d| {
                                                    view! {
                                                        <CourierRow
                                                            driver=d
                                                            on_resend=on_resend
                                                            on_toggle_block=on_toggle_block
                                                            on_validate=on_validate
                                                        />
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

fn courier_status(driver: &DeliveryDriver) -> &'static str {
    if driver.is_blocked.unwrap_or(false) {
        "Blocked"
    } else if !driver.onboarding_completed {
        "Invited"
    } else if driver.is_available.unwrap_or(false) {
        "Available"
    } else {
        "Offline"
    }
}

#[component]
fn CourierRow(
    driver: DeliveryDriver,
    on_resend: Callback<i64>,
    on_toggle_block: Callback<(i64, String)>,
    on_validate: Callback<i64>,
) -> impl IntoView {
    let id = driver.id;
    let status = courier_status(&driver);
    let blocked = driver.is_blocked.unwrap_or(false);
    let invited = !driver.onboarding_completed;
    let unverified = !driver.is_verified.unwrap_or(false);
    let reason = RwSignal::new(String::new());

    view! {
        <tr>
            <td>{driver.full_name}</td>
            <td>{driver.phone}</td>
            <td>{driver.city}</td>
            <td>{driver.vehicle_type}</td>
            <td>{status}</td>
            <td class="data-table__actions">
                <Show when=move || invited>
                    <button class="btn btn--small" on:click=move |_| on_resend.run(id)>
                        "Resend invite"
                    </button>
                </Show>
                <Show when=move || unverified && !invited>
                    <button class="btn btn--small" on:click=move |_| on_validate.run(id)>
                        "Validate"
                    </button>
                </Show>
                {if blocked {
                    view! {
                        <button
                            class="btn btn--small"
                            on:click=move |_| on_toggle_block.run((id, String::new()))
                        >
                            "Unblock"
                        </button>
                    }
                        .into_any()
                } else {
                    view! {
                        <input
                            class="data-table__reason"
                            placeholder="Block reason"
                            prop:value=move || reason.get()
                            on:input=move |ev| reason.set(event_target_value(&ev))
                        />
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| on_toggle_block.run((id, reason.get()))
                        >
                            "Block"
                        </button>
                    }
                        .into_any()
                }}
            </td>
        </tr>
    }
}

#[component]
fn CreateDeliveryDriverForm(on_created: Callback<()>) -> impl IntoView {
    let api = expect_context::<Api>();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let city = RwSignal::new("Libreville".to_owned());
    let vehicle_type = RwSignal::new("moto".to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let name = full_name.get().trim().to_owned();
        let number = phone.get().trim().to_owned();
        if name.is_empty() || number.is_empty() {
            error.set(Some("Name and phone are required".to_owned()));
            return;
        }
        let address = email.get().trim().to_owned();
        let invite = DeliveryDriverInvite {
            full_name: name,
            email: (!address.is_empty()).then_some(address),
            phone: normalize_gabon_phone(&number),
            city: city.get(),
            vehicle_type: vehicle_type.get(),
        };
        busy.set(true);
        error.set(None);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.create_delivery_driver(&invite).await {
                Ok(()) => {
                    busy.set(false);
                    full_name.set(String::new());
                    email.set(String::new());
                    phone.set(String::new());
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
            <h2>"Add a courier"</h2>
            <div class="entry-form__grid">
                <input
                    placeholder="Full name"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
                <input
                    placeholder="Email (optional)"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    placeholder="Phone"
                    prop:value=move || phone.get()
                    on:input=move |ev| phone.set(event_target_value(&ev))
                />
                <select on:change=move |ev| city.set(event_target_value(&ev))>
                    <option value="Libreville">"Libreville"</option>
                    <option value="Port-Gentil">"Port-Gentil"</option>
                    <option value="Franceville">"Franceville"</option>
                </select>
                <select on:change=move |ev| vehicle_type.set(event_target_value(&ev))>
                    <option value="moto">"Moto"</option>
                    <option value="car">"Car"</option>
                    <option value="bicycle">"Bicycle"</option>
                </select>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="entry-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Saving..." } else { "Add courier" }}
            </button>
        </form>
    }
}

//! Single-driver view: documents and onboarding validation.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::Api;
use crate::net::types::Driver;
use crate::util::format::date_label;

#[component]
pub fn DriverDetailPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DriverDetailContent/>
        </ProtectedRoute>
    }
}

#[component]
fn DriverDetailContent() -> impl IntoView {
    let api = expect_context::<Api>();
    let params = use_params_map();
    let driver_id = Signal::derive(move || {
        params
            .get()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
    });

    let reload = RwSignal::new(0_u32);
    let driver = LocalResource::new({
        let api = api.clone();
        move || {
            reload.track();
            let id = driver_id.get();
            let api = api.clone();
            async move {
                match id {
                    Some(id) => api.get_driver(id).await.map(Some),
                    None => Ok(None),
                }
            }
        }
    });

    let feedback = RwSignal::new(None::<String>);
    let on_validate = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.validate_driver(id).await {
                    Ok(()) => {
                        feedback.set(Some("Driver validated".to_owned()));
                        reload.update(|n| *n += 1);
                    }
                    Err(e) => feedback.set(Some(e.to_string())),
                }
            });
        })
    };

    view! {
        <div class="driver-detail-page">
            <PageHeader title="Driver"/>

            <Show when=move || feedback.get().is_some()>
                <p class="page-notice">{move || feedback.get().unwrap_or_default()}</p>
            </Show>

            <Suspense fallback=move || view! { <p>"Loading driver..."</p> }>
                {move || {
                    driver
                        .get()
                        .map(|result| match result {
                            Ok(Some(d)) => view! { <DriverCard driver=d on_validate=on_validate/> }.into_any(),
                            Ok(None) => view! { <p class="page-error">"Unknown driver."</p> }.into_any(),
                            Err(e) => view! { <p class="page-error">{e.to_string()}</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn DriverCard(driver: Driver, on_validate: Callback<i64>) -> impl IntoView {
    let id = driver.id;
    let validated = driver.onboarding_completed.unwrap_or(false);
    let joined = driver
        .created_at
        .as_deref()
        .map(|ts| date_label(ts).to_owned())
        .unwrap_or_default();

    let document = |label: &'static str, url: Option<String>| match url {
        Some(url) => view! {
            <li>
                <a href=url target="_blank" rel="noopener">
                    {label}
                </a>
            </li>
        }
        .into_any(),
        None => view! { <li class="doc-missing">{format!("{label} (missing)")}</li> }.into_any(),
    };

    view! {
        <div class="driver-card">
            <h2>{driver.full_name}</h2>
            <dl class="driver-card__facts">
                <dt>"Email"</dt>
                <dd>{driver.email}</dd>
                <dt>"Phone"</dt>
                <dd>{driver.phone}</dd>
                <dt>"Plate"</dt>
                <dd>{driver.vehicle_plate.unwrap_or_default()}</dd>
                <dt>"Category"</dt>
                <dd>{driver.category.unwrap_or_default()}</dd>
                <dt>"Joined"</dt>
                <dd>{joined}</dd>
            </dl>

            <h3>"Documents"</h3>
            <ul class="driver-card__docs">
                {document("Driving licence", driver.license_file)}
                {document("ID card", driver.id_card_file)}
                {document("Insurance", driver.insurance_file)}
            </ul>

            <Show
                when=move || !validated
                fallback=|| view! { <p class="page-notice">"Onboarding complete."</p> }
            >
                <button class="btn btn--primary" on:click=move |_| on_validate.run(id)>
                    "Validate driver"
                </button>
            </Show>
        </div>
    }
}

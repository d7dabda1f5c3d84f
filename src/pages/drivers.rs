//! Ride-driver roster: invites, onboarding status, blocks.
//!
//! The list repolls every 30 seconds so invite acceptance and document
//! uploads show up without a manual refresh.

use leptos::prelude::*;

use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::Api;
use crate::net::types::{Driver, DriverInvite};
use crate::state::session::SessionState;
use crate::util::nav;

const POLL_INTERVAL_MS: u32 = 30_000;

#[component]
pub fn DriversPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DriversContent/>
        </ProtectedRoute>
    }
}

#[component]
fn DriversContent() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let api = expect_context::<Api>();

    // Drivers are manager/employee territory; everyone else bounces back.
    Effect::new(move || {
        let state = session.get();
        if let Some(user) = state.user {
            if !user.is_manager() && !user.is_employee() {
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
            async move { api.list_drivers().await }
        }
    });

    #[cfg(feature = "hydrate")]
    {
        use std::cell::Cell;
        use std::rc::Rc;

        let alive = Rc::new(Cell::new(true));
        let poll_alive = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if !poll_alive.get() {
                    return;
                }
                reload.update(|n| *n += 1);
            }
        });
        on_cleanup(move || alive.set(false));
    }

    let blocking = RwSignal::new(None::<Driver>);
    let feedback = RwSignal::new(None::<String>);

    let on_resend = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.resend_driver_invite(id).await {
                    Ok(()) => feedback.set(Some("Invite re-sent".to_owned())),
                    Err(e) => feedback.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_unblock = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.set_driver_block(id, false, "").await {
                    Ok(()) => reload.update(|n| *n += 1),
                    Err(e) => feedback.set(Some(e.to_string())),
                }
            });
        })
    };

    view! {
        <div class="drivers-page">
            <PageHeader title="Ride drivers"/>

            <InviteDriverForm on_invited=Callback::new(move |()| reload.update(|n| *n += 1))/>

            <Show when=move || feedback.get().is_some()>
                <p class="page-notice">{move || feedback.get().unwrap_or_default()}</p>
            </Show>

            <Suspense fallback=move || view! { <p>"Loading drivers..."</p> }>
                {move || {
                    drivers
                        .get()
                        .map(|result| match result {
                            Ok(rows) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Driver"</th>
                                                <th>"Contact"</th>
                                                <th>"Plate"</th>
                                                <th>"Status"</th>
                                                <th>"Actions"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|d| {
                                                    view! {
                                                        <DriverRow
                                                            driver=d
                                                            on_resend=on_resend
                                                            on_block=Callback::new(move |d| blocking.set(Some(d)))
                                                            on_unblock=on_unblock
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

            <Show when=move || blocking.get().is_some()>
                {move || {
                    blocking
                        .get()
                        .map(|driver| {
                            view! {
                                <BlockDriverDialog
                                    driver=driver
                                    on_done=Callback::new(move |changed: bool| {
                                        blocking.set(None);
                                        if changed {
                                            reload.update(|n| *n += 1);
                                        }
                                    })
                                />
                            }
                        })
                }}
            </Show>
        </div>
    }
}

fn status_label(driver: &Driver) -> &'static str {
    if driver.is_blocked.unwrap_or(false) {
        "Blocked"
    } else if driver.onboarding_completed.unwrap_or(false) {
        "Active"
    } else if driver.must_reset_password.unwrap_or(false) {
        "Invited"
    } else {
        "Onboarding"
    }
}

#[component]
fn DriverRow(
    driver: Driver,
    on_resend: Callback<i64>,
    on_block: Callback<Driver>,
    on_unblock: Callback<i64>,
) -> impl IntoView {
    let id = driver.id;
    let status = status_label(&driver);
    let blocked = driver.is_blocked.unwrap_or(false);
    let invited = driver.must_reset_password.unwrap_or(false);
    let detail_href = format!("/drivers/{id}");
    let block_target = driver.clone();

    view! {
        <tr>
            <td>
                <a href=detail_href>{driver.full_name}</a>
            </td>
            <td>{format!("{} / {}", driver.email, driver.phone)}</td>
            <td>{driver.vehicle_plate.unwrap_or_default()}</td>
            <td>{status}</td>
            <td class="data-table__actions">
                <Show when=move || invited>
                    <button class="btn btn--small" on:click=move |_| on_resend.run(id)>
                        "Resend invite"
                    </button>
                </Show>
                {if blocked {
                    view! {
                        <button class="btn btn--small" on:click=move |_| on_unblock.run(id)>
                            "Unblock"
                        </button>
                    }
                        .into_any()
                } else {
                    view! {
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| on_block.run(block_target.clone())
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
fn BlockDriverDialog(driver: Driver, on_done: Callback<bool>) -> impl IntoView {
    let api = expect_context::<Api>();
    let reason = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let id = driver.id;

    let submit = Callback::new(move |()| {
        let text = reason.get().trim().to_owned();
        if text.is_empty() {
            error.set(Some("A reason is required".to_owned()));
            return;
        }
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.set_driver_block(id, true, &text).await {
                Ok(()) => on_done.run(true),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_done.run(false)>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{format!("Block {}", driver.full_name)}</h2>
                <label class="dialog__label">
                    "Reason"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_done.run(false)>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| submit.run(())>
                        "Block"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn InviteDriverForm(on_invited: Callback<()>) -> impl IntoView {
    let api = expect_context::<Api>();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let plate = RwSignal::new(String::new());
    let category = RwSignal::new("eco".to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let full_name = format!("{} {}", first_name.get().trim(), last_name.get().trim())
            .trim()
            .to_owned();
        let invite = DriverInvite {
            full_name,
            email: email.get().trim().to_owned(),
            phone: phone.get().trim().to_owned(),
            vehicle_plate: plate.get().trim().to_owned(),
            category: category.get(),
            role: "driver".to_owned(),
        };
        if invite.full_name.is_empty() || invite.email.is_empty() || invite.phone.is_empty() {
            error.set(Some("Name, email and phone are required".to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.invite_driver(&invite).await {
                Ok(()) => {
                    busy.set(false);
                    first_name.set(String::new());
                    last_name.set(String::new());
                    email.set(String::new());
                    phone.set(String::new());
                    plate.set(String::new());
                    on_invited.run(());
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
            <h2>"Invite a driver"</h2>
            <div class="entry-form__grid">
                <input
                    placeholder="First name"
                    prop:value=move || first_name.get()
                    on:input=move |ev| first_name.set(event_target_value(&ev))
                />
                <input
                    placeholder="Last name"
                    prop:value=move || last_name.get()
                    on:input=move |ev| last_name.set(event_target_value(&ev))
                />
                <input
                    placeholder="Email"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    placeholder="Phone"
                    prop:value=move || phone.get()
                    on:input=move |ev| phone.set(event_target_value(&ev))
                />
                <input
                    placeholder="Vehicle plate"
                    prop:value=move || plate.get()
                    on:input=move |ev| plate.set(event_target_value(&ev))
                />
                <select on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="eco">"Eco"</option>
                    <option value="clim">"Clim"</option>
                    <option value="vip">"VIP"</option>
                </select>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="entry-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Inviting..." } else { "Send invite" }}
            </button>
        </form>
    }
}

//! Platform account list, manager only.

use leptos::prelude::*;

use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::Api;
use crate::state::session::SessionState;
use crate::util::format::date_label;
use crate::util::nav;

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <UsersContent/>
        </ProtectedRoute>
    }
}

#[component]
fn UsersContent() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let api = expect_context::<Api>();

    Effect::new(move || {
        let state = session.get();
        if let Some(user) = state.user {
            if !user.is_manager() {
                nav::redirect("/dashboard");
            }
        }
    });

    let reload = RwSignal::new(0_u32);
    let users = LocalResource::new({
        let api = api.clone();
        move || {
            reload.track();
            let api = api.clone();
            async move { api.list_users().await }
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
                gloo_timers::future::TimeoutFuture::new(30_000).await;
                if !poll_alive.get() {
                    return;
                }
                reload.update(|n| *n += 1);
            }
        });
        on_cleanup(move || alive.set(false));
    }

    let filter = RwSignal::new(String::new());

    view! {
        <div class="users-page">
            <PageHeader title="Users"/>

            <input
                class="users-page__search"
                placeholder="Filter by name or email"
                prop:value=move || filter.get()
                on:input=move |ev| filter.set(event_target_value(&ev))
            />

            <Suspense fallback=move || view! { <p>"Loading users..."</p> }>
                {move || {
                    users
                        .get()
                        .map(|result| match result {
                            Ok(rows) => {
                                let needle = filter.get().to_lowercase();
                                let rows: Vec<_> = rows
                                    .into_iter()
                                    .filter(|u| {
                                        needle.is_empty()
                                            || u.email.to_lowercase().contains(&needle)
                                            || u.first_name.to_lowercase().contains(&needle)
                                            || u.last_name.to_lowercase().contains(&needle)
                                    })
                                    .collect();
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Name"</th>
                                                <th>"Email"</th>
                                                <th>"Role"</th>
                                                <th>"Joined"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|u| {
                                                    let joined = u
                                                        .created_at
                                                        .as_deref()
                                                        .map(|ts| date_label(ts).to_owned())
                                                        .unwrap_or_default();
                                                    view! {
                                                        <tr>
                                                            <td>{format!("{} {}", u.first_name, u.last_name)}</td>
                                                            <td>{u.email}</td>
                                                            <td>{u.user_type}</td>
                                                            <td>{joined}</td>
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

//! Staff home: one card per admin area, filtered by role.

use leptos::prelude::*;

use crate::components::protected_route::ProtectedRoute;
use crate::net::session::SessionManager;
use crate::state::session::SessionState;
use crate::util::nav;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DashboardContent/>
        </ProtectedRoute>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let manager = expect_context::<SessionManager>();

    let greeting = move || {
        session
            .get()
            .user
            .map(|u| u.display_name())
            .unwrap_or_default()
    };
    let is_manager = move || session.get().user.is_some_and(|u| u.is_manager());
    let is_ops = move || {
        session
            .get()
            .user
            .is_some_and(|u| u.is_manager() || u.is_employee())
    };

    let on_logout = move |_| {
        manager.logout();
        session.update(|s| s.user = None);
        nav::redirect("/");
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Operations"</h1>
                <span class="dashboard-page__user">{greeting}</span>
                <button class="btn" on:click=on_logout>
                    "Sign out"
                </button>
            </header>

            <div class="dashboard-page__cards">
                <a class="dash-card" href="/analytics">
                    <h2>"Analytics"</h2>
                    <p>"Live rides, revenue and incidents"</p>
                </a>
                <Show when=is_ops>
                    <a class="dash-card" href="/drivers">
                        <h2>"Ride drivers"</h2>
                        <p>"Invites, onboarding and blocks"</p>
                    </a>
                </Show>
                <a class="dash-card" href="/delivery-drivers">
                    <h2>"Delivery drivers"</h2>
                    <p>"Courier fleet management"</p>
                </a>
                <a class="dash-card" href="/add-vehicle">
                    <h2>"Vehicles"</h2>
                    <p>"Rental fleet and new listings"</p>
                </a>
                <a class="dash-card" href="/rentals">
                    <h2>"Rentals"</h2>
                    <p>"Bookings and their status"</p>
                </a>
                <Show when=is_manager>
                    <a class="dash-card" href="/users">
                        <h2>"Users"</h2>
                        <p>"Platform accounts"</p>
                    </a>
                </Show>
            </div>
        </div>
    }
}

//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::Api;
use crate::net::http::HttpClient;
use crate::net::session::SessionManager;
use crate::net::token::TokenStore;
use crate::pages::{
    analytics::AnalyticsPage, dashboard::DashboardPage, delivery_drivers::DeliveryDriversPage,
    driver_detail::DriverDetailPage, drivers::DriversPage, landing::LandingPage, login::LoginPage,
    rentals::RentalsPage, users::UsersPage, vehicles::VehiclesPage,
};
use crate::state::{analytics::AnalyticsState, session::SessionState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Wires the token store, HTTP client, session manager and typed API
/// into context, kicks off the background session restore, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let tokens = TokenStore::platform();
    let http = HttpClient::new(
        crate::config::api_base(),
        tokens,
        crate::net::http::platform_transport(),
    );
    let manager = SessionManager::new(http.clone(), crate::util::storage::platform_store());
    let api = Api::new(http);

    let session = RwSignal::new(SessionState::default());
    let analytics = RwSignal::new(AnalyticsState::default());

    provide_context(session);
    provide_context(analytics);
    provide_context(manager.clone());
    provide_context(api);

    #[cfg(feature = "hydrate")]
    crate::net::session::spawn_restore(manager, session);
    #[cfg(not(feature = "hydrate"))]
    let _ = manager;

    view! {
        <Stylesheet id="leptos" href="/pkg/blaze-admin.css"/>
        <Title text="Blaze Admin"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("analytics") view=AnalyticsPage/>
                <Route path=StaticSegment("add-vehicle") view=VehiclesPage/>
                <Route path=StaticSegment("drivers") view=DriversPage/>
                <Route path=(StaticSegment("drivers"), ParamSegment("id")) view=DriverDetailPage/>
                <Route path=StaticSegment("delivery-drivers") view=DeliveryDriversPage/>
                <Route path=StaticSegment("users") view=UsersPage/>
                <Route path=StaticSegment("rentals") view=RentalsPage/>
            </Routes>
        </Router>
    }
}

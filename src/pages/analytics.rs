//! Operations analytics: REST aggregates plus the live ops feed.

use leptos::prelude::*;

use crate::components::kpi_card::KpiCard;
use crate::components::page_header::PageHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::{AnalyticsFilter, Api};
use crate::state::analytics::AnalyticsState;
use crate::util::format::{clock_label, format_xaf, minutes_label, percent_label};

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <AnalyticsContent/>
        </ProtectedRoute>
    }
}

#[component]
fn AnalyticsContent() -> impl IntoView {
    let api = expect_context::<Api>();
    let analytics = expect_context::<RwSignal<AnalyticsState>>();

    let city = RwSignal::new(String::new());
    let from = RwSignal::new(String::new());
    let to = RwSignal::new(String::new());
    let reload = RwSignal::new(0_u32);

    let filter = move || AnalyticsFilter {
        city: Some(city.get_untracked()),
        from: Some(from.get_untracked()),
        to: Some(to.get_untracked()),
    };

    // Load every aggregate in one go; a partial failure surfaces the
    // first error but keeps whatever loaded.
    let load = {
        let api = api.clone();
        Callback::new(move |()| {
            let api = api.clone();
            let filter = filter();
            analytics.update(|s| {
                s.loading = true;
                s.error = None;
            });
            leptos::task::spawn_local(async move {
                let (summary, hours, revenue, split, top, issues, live) = futures::join!(
                    api.analytics_summary(&filter),
                    api.analytics_timeseries(&filter),
                    api.analytics_revenue_daily(&filter),
                    api.analytics_payment_split(&filter),
                    api.analytics_top_drivers(&filter),
                    api.analytics_issues(&filter),
                    api.analytics_live(&filter),
                );
                analytics.update(|s| {
                    let mut first_error = None;
                    let mut keep = |e: crate::net::http::ApiError| {
                        if first_error.is_none() {
                            first_error = Some(e.to_string());
                        }
                    };
                    match summary {
                        Ok(v) => s.summary = v,
                        Err(e) => keep(e),
                    }
                    match hours {
                        Ok(v) => s.rides_per_hour = v,
                        Err(e) => keep(e),
                    }
                    match revenue {
                        Ok(v) => s.revenue_daily = v,
                        Err(e) => keep(e),
                    }
                    match split {
                        Ok(v) => s.payment_split = v,
                        Err(e) => keep(e),
                    }
                    match top {
                        Ok(v) => s.top_drivers = v,
                        Err(e) => keep(e),
                    }
                    match issues {
                        Ok(v) => s.issues = v,
                        Err(e) => keep(e),
                    }
                    match live {
                        Ok(v) => s.live = v,
                        Err(e) => keep(e),
                    }
                    s.error = first_error;
                    s.loading = false;
                });
            });
        })
    };

    Effect::new(move || {
        reload.track();
        load.run(());
    });

    #[cfg(feature = "hydrate")]
    {
        let tokens = api.http().tokens().clone();
        let feed = crate::net::live::spawn_feed(
            analytics,
            tokens,
            Callback::new(move |()| reload.update(|n| *n += 1)),
        );
        on_cleanup(move || feed.close());
    }

    let summary = move || analytics.get().summary;
    let feed_badge = move || analytics.get().feed_status.label();

    view! {
        <div class="analytics-page">
            <PageHeader title="Analytics">
                {move || view! { <span class="feed-badge">{feed_badge()}</span> }}
            </PageHeader>

            <form
                class="analytics-page__filters"
                on:submit=move |ev| {
                    ev.prevent_default();
                    reload.update(|n| *n += 1);
                }
            >
                <select on:change=move |ev| city.set(event_target_value(&ev))>
                    <option value="">"All cities"</option>
                    <option value="Libreville">"Libreville"</option>
                    <option value="Port-Gentil">"Port-Gentil"</option>
                    <option value="Franceville">"Franceville"</option>
                </select>
                <input
                    type="date"
                    prop:value=move || from.get()
                    on:input=move |ev| from.set(event_target_value(&ev))
                />
                <input
                    type="date"
                    prop:value=move || to.get()
                    on:input=move |ev| to.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">
                    "Apply"
                </button>
            </form>

            <Show when=move || analytics.get().error.is_some()>
                <p class="page-error">{move || analytics.get().error.unwrap_or_default()}</p>
            </Show>

            <div class="analytics-page__kpis">
                <KpiCard
                    label="Rides in progress"
                    value=Signal::derive(move || summary().rides_live.to_string())
                />
                <KpiCard
                    label="Waiting pickup"
                    value=Signal::derive(move || summary().rides_waiting_pickup.to_string())
                />
                <KpiCard
                    label="Completed"
                    value=Signal::derive(move || summary().rides_completed.to_string())
                />
                <KpiCard
                    label="Cancel rate"
                    value=Signal::derive(move || percent_label(summary().cancel_rate))
                />
                <KpiCard
                    label="Avg pickup"
                    value=Signal::derive(move || minutes_label(summary().avg_pickup_time_sec))
                />
                <KpiCard
                    label="Avg ride"
                    value=Signal::derive(move || minutes_label(summary().avg_ride_duration_sec))
                />
                <KpiCard
                    label="Active rentals"
                    value=Signal::derive(move || summary().rentals_active.to_string())
                />
                <KpiCard
                    label="GMV"
                    value=Signal::derive(move || format_xaf(summary().gmv))
                    hint=Signal::derive(move || {
                        format!("commission {}", format_xaf(summary().platform_commission))
                    })
                />
                <KpiCard
                    label="Driver earnings"
                    value=Signal::derive(move || format_xaf(summary().drivers_earnings))
                />
                <KpiCard
                    label="Open tickets"
                    value=Signal::derive(move || summary().tickets_open.to_string())
                    hint=Signal::derive(move || {
                        format!("{} incidents last hour", summary().incidents_last_hour)
                    })
                />
            </div>

            <div class="analytics-page__columns">
                <section class="panel">
                    <h2>"Rides per hour"</h2>
                    <table class="data-table data-table--compact">
                        <tbody>
                            {move || {
                                analytics
                                    .get()
                                    .rides_per_hour
                                    .into_iter()
                                    .map(|p| {
                                        view! {
                                            <tr>
                                                <td>{clock_label(&p.t).to_owned()}</td>
                                                <td>{p.rides}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </section>

                <section class="panel">
                    <h2>"Daily revenue"</h2>
                    <table class="data-table data-table--compact">
                        <tbody>
                            {move || {
                                analytics
                                    .get()
                                    .revenue_daily
                                    .into_iter()
                                    .map(|p| {
                                        view! {
                                            <tr>
                                                <td>{p.d}</td>
                                                <td>{format_xaf(p.gmv)}</td>
                                                <td>{format_xaf(p.commission)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </section>

                <section class="panel">
                    <h2>"Payments"</h2>
                    {move || {
                        let split = analytics.get().payment_split;
                        view! {
                            <ul class="payment-split">
                                <li>{format!("Cash: {}", percent_label(split.cash))}</li>
                                <li>{format!("Mobile money: {}", percent_label(split.mobile_money))}</li>
                                <li>{format!("Wallet: {}", percent_label(split.wallet))}</li>
                            </ul>
                        }
                    }}
                    <h2>"Top drivers"</h2>
                    <table class="data-table data-table--compact">
                        <tbody>
                            {move || {
                                analytics
                                    .get()
                                    .top_drivers
                                    .into_iter()
                                    .map(|d| {
                                        let rating = d
                                            .rating
                                            .map(|r| format!("{r:.1}"))
                                            .unwrap_or_default();
                                        view! {
                                            <tr>
                                                <td>{d.name}</td>
                                                <td>{format!("{} rides", d.rides)}</td>
                                                <td>{rating}</td>
                                                <td>{format_xaf(d.revenue)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </section>
            </div>

            <section class="panel">
                <h2>"Live"</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Kind"</th>
                            <th>"Status"</th>
                            <th>"City"</th>
                            <th>"Driver"</th>
                            <th>"Client"</th>
                            <th>"Amount"</th>
                            <th>"Updated"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            analytics
                                .get()
                                .live
                                .into_iter()
                                .map(|row| {
                                    let amount = row.amount.map(format_xaf).unwrap_or_default();
                                    view! {
                                        <tr>
                                            <td>{row.kind}</td>
                                            <td>{row.status}</td>
                                            <td>{row.city}</td>
                                            <td>{row.driver.unwrap_or_default()}</td>
                                            <td>{row.client.unwrap_or_default()}</td>
                                            <td>{amount}</td>
                                            <td>{clock_label(&row.updated_at).to_owned()}</td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
            </section>

            <section class="panel">
                <h2>"Issues"</h2>
                <ul class="issues-list">
                    {move || {
                        analytics
                            .get()
                            .issues
                            .into_iter()
                            .map(|issue| {
                                let count = if issue.count > 1 {
                                    format!(" (x{})", issue.count)
                                } else {
                                    String::new()
                                };
                                view! {
                                    <li class="issues-list__row">
                                        <span class="issues-list__ts">
                                            {clock_label(&issue.ts).to_owned()}
                                        </span>
                                        <span class="issues-list__kind">{issue.kind}</span>
                                        <span>{format!("{}{count}", issue.message)}</span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </section>
        </div>
    }
}

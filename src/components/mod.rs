//! Reusable UI components shared across admin pages.

pub mod kpi_card;
pub mod page_header;
pub mod protected_route;

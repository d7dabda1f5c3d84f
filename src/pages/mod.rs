//! Admin pages, one module per route.

pub mod analytics;
pub mod dashboard;
pub mod delivery_drivers;
pub mod driver_detail;
pub mod drivers;
pub mod landing;
pub mod login;
pub mod rentals;
pub mod users;
pub mod vehicles;

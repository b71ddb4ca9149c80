//! # Inscription
//!
//! Client logic behind the CEITBA benefit inscription flow.
//!
//! ## Overall Payloads
//!
//! Responses/requests between the portal pages and the proxy server.
//!
//! ### Catalogue
//! - `GET /api/benefits` returns the four benefit families at once:
//!   sports, activities, agreements and languages
//! - Sports and activities carry their offered time slots; agreements carry
//!   a single schedule and place; languages carry levels and prices
//!
//! ### Inscription
//! - `POST /api/inscription` with the flattened form: student id, names,
//!   contact data, benefit type/id, the joined schedule keys, level and notes
//! - Optional fields travel as explicit `null`, never omitted
//!
//! ### User Directory
//! - `GET /api/user?email=...` returns the member record, including the
//!   staff role used to gate the administrative back office
//! - Lookups are cached in memory for five minutes per email
//!
//!
//!
//! ## Flow
//!
//! - The listing page hands the selected benefit to the wizard as an explicit
//!   value, the wizard never reads ambient storage
//! - Step 1 collects personal data, step 2 contact data, step 3 schedules and
//!   preferences, step 4 is the confirmation screen
//! - Each forward transition is gated by the step validator, the first failing
//!   check is the one surfaced to the user
//! - Submission is a single attempt, a failed attempt keeps the wizard at
//!   step 3 so the member can fix the form and resubmit by hand

pub mod auth;
pub mod benefits;
pub mod careers;
pub mod client;
pub mod form;
pub mod validate;
pub mod wizard;

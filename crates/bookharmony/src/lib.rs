//! # bookharmony
//!
//! Collection, friend and lending services for BookHarmony, built on the
//! `anyx-client` query proxy.
//!
//! ## Features
//!
//! - Register books by ISBN, with catalog lookup for first-time registrations
//! - Read state and shelf management per user
//! - Friend search, friend lists and browsing friends' shelves
//! - Lending records with open-loan listings
//!
//! The proxy stores plain JSON rows and performs no joins; services stitch
//! related collections together client side.

pub mod catalog;
pub mod error;
pub mod models;
pub mod services;

pub use catalog::*;
pub use error::*;
pub use models::*;
pub use services::*;

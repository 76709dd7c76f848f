//! Route handlers.
//!
//! The auth domain (registration, login, session) lives under [`auth`];
//! [`pages`] holds the minimal page endpoints the access gate fronts.

pub mod auth;
pub mod health;
pub mod pages;

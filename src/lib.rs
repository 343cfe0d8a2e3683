//! Geofence Validation Engine for Employee Time Tracking
//!
//! This crate decides whether employee clock-in/out ("punch") events should be
//! accepted based on a device-reported GPS reading and a set of
//! administrator-defined work zones, accounting for GPS measurement
//! uncertainty. Punches that fail the geofence check are captured as pending
//! records with an exception for later admin adjudication.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod exceptions;
pub mod geofence;
pub mod models;
pub mod registry;
pub mod store;

//! Energy Advisor - Conversational Renewable Energy Planning
//!
//! This crate turns an unstructured homeowner conversation into a structured
//! energy profile, scores solar/wind/heat-pump suitability, computes the
//! economics of each option, and renders a final report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Multi-tenant item API.
//!
//! Requests arrive as API Gateway proxy events (Lambda) or plain HTTP (the
//! local dev server), pass through [`handlers`] and [`service`], and end in a
//! [`storage`] backend.

pub mod app;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod service;
pub mod state;
pub mod storage;

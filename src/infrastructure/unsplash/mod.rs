//! Unsplash API integration
//!
//! HTTP client for the three upstream endpoints the proxy fronts:
//! user collections, collection photos, and download registration.

pub mod client;
pub mod models;

pub use client::{UnsplashClient, UnsplashClientConfig};

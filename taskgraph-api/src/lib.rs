//! # Taskgraph API Server Library
//!
//! This library provides the core functionality for the Taskgraph GraphQL
//! API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error taxonomy and GraphQL error-extension mapping
//! - `graphql`: Schema, resolvers, and output types
//! - `identity`: Per-request identity resolution (session first, bearer fallback)
//! - `middleware`: Security headers
//! - `routes`: HTTP handlers (health, GraphQL endpoint)

pub mod app;
pub mod config;
pub mod error;
pub mod graphql;
pub mod identity;
pub mod middleware;
pub mod routes;

//! The core module defines the business logic of quizkit.
//! It provides the traits and models upstream adapters need to implement.

pub mod chunk;
pub mod corpus;
pub mod document;
pub mod embedder;
pub mod index;
pub mod model;
pub mod safety;
pub mod service;
pub mod store;
pub mod telemetry;

//! Unit tests for the studio CLI library
//!
//! These tests use in-memory ports, temporary directories, or an in-process
//! HTTP server, and need no running execution service.

mod property_tests;
mod registry_service;

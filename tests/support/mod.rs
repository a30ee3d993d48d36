//! Shared fixtures for integration tests
#![allow(dead_code)]

pub mod db;
pub mod fakes;
pub mod helpers;

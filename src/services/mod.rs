// src/services/mod.rs

pub mod study;

// src/models/mod.rs

pub mod progress;
pub mod question;
pub mod topic;

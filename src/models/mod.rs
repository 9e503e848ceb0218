// src/models/mod.rs
pub mod checklist;
pub mod company;
pub mod draft;
pub mod identity;
pub mod profile;
pub mod submission;

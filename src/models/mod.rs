// src/models/mod.rs

pub mod review;
pub mod team;
pub mod user;

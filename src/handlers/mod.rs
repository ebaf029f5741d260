// src/handlers/mod.rs

pub mod account;
pub mod auth;
pub mod movies;
pub mod teams;
pub mod users;

// src/models/mod.rs

pub mod question;
pub mod session;
pub mod word;

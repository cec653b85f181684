// src/config/mod.rs

pub mod consts;
pub mod smtp;

pub use smtp::SmtpConfig;

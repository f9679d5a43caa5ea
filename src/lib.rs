// src/lib.rs

//! Presswatch Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod utils;

pub mod common;
pub mod content;
pub mod db;
pub mod models;
pub mod services;

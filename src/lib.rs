pub mod app_config;
pub mod db;
pub mod email;
pub mod middleware;
pub mod notifications;
pub mod orm;
pub mod programs;
pub mod reports;
pub mod web;

pub mod credential;
pub mod repositories;
pub mod web;

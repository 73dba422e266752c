pub mod achievement;
pub mod activity;
pub mod repository;
pub mod search;
pub mod user;

pub mod admins;
pub mod auth;
pub mod guard;
pub mod pages;
pub mod responses;

pub mod admin;
pub mod claim;
pub mod draw;
pub mod emergency;
pub mod enter;
pub mod views;

pub mod app;
pub mod edit;
pub mod handlers;
pub mod settle;
pub mod ui;

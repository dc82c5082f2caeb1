pub mod capture;
pub mod restore;
pub mod snapshot;
pub mod store;

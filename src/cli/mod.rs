pub mod inquire;
pub mod server;

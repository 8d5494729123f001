pub mod domain;
pub mod handlers;
pub mod shared;
pub mod state;
pub mod system;
pub mod views;

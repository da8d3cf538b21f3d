pub mod health;
pub mod response;
pub mod state;
pub mod template;

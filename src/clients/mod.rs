pub mod health;
pub mod listmonk;

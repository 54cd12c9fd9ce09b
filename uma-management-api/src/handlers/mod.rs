pub mod auth;
pub mod configuration;
pub mod health;
pub mod resources;
pub mod scopes;

pub mod client;
pub mod common;
pub mod oxauth_config;
pub mod resource;
pub mod scope;

pub use client::*;
pub use common::*;
pub use oxauth_config::*;
pub use resource::*;
pub use scope::*;

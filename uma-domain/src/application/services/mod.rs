pub mod authorization_helper;
pub mod configuration_management;
pub mod directory;
pub mod resource_management;
pub mod scope_management;

pub use authorization_helper::*;
pub use configuration_management::*;
pub use directory::*;
pub use resource_management::*;
pub use scope_management::*;

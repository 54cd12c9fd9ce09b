/*!
# UMA Domain

Domain layer for administering UMA resources and scopes kept in a directory,
following hexagonal architecture principles.

This crate provides:
- Domain models for directory entries (UMA resources, UMA scopes, clients,
  the oxAuth configuration)
- Port definitions for the directory and the authorization check
- Application services implementing the management use cases
- Infrastructure adapters (in-memory directory, scope-based authorization)

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                    Primary Adapters                         │
│              HTTP Server (Axum Handlers)                    │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • ResourceManagementService  • ScopeManagementService      │
│  • ConfigurationService  • DirectoryService                 │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • ResourceRepository  • ScopeRepository  • ClientRepository│
│  • ConfigurationRepository  • DirectoryInfo                 │
│  • AuthorizationService  • EventPublisher                   │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • InMemoryDirectory   • ScopeAuthorizationService          │
│  • ChannelEventPublisher                                    │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,no_run
use std::sync::Arc;
use uma_domain::{
    application::{ports::AuthorizationContext, services::ResourceManagementService},
    infrastructure::adapters::{ChannelEventPublisher, InMemoryDirectory, ScopeAuthorizationService},
};

# async fn run() -> uma_domain::DomainResult<()> {
let directory = Arc::new(InMemoryDirectory::default());
let (publisher, _events) = ChannelEventPublisher::channel();

let service = ResourceManagementService::new(
    directory.clone(),
    directory.clone(),
    directory,
    Arc::new(publisher),
    Arc::new(ScopeAuthorizationService::new()),
);

let context = AuthorizationContext::full_access();
let resources = service.list_resources(&context).await?;
# Ok(())
# }
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;

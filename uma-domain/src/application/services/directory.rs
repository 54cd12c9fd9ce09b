use crate::{application::ports::DirectoryInfo, domain::entities::PersistenceType};
use std::sync::Arc;

/// Reports which storage backend serves the directory
#[derive(Clone)]
pub struct DirectoryService {
    info: Arc<dyn DirectoryInfo>,
}

impl DirectoryService {
    pub fn new(info: Arc<dyn DirectoryInfo>) -> Self {
        Self { info }
    }

    pub fn persistence_type(&self) -> PersistenceType {
        self.info.persistence_type()
    }

    pub fn is_ldap(&self) -> bool {
        self.persistence_type() == PersistenceType::Ldap
    }
}

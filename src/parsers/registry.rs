use std::collections::HashMap;

use crate::semantic::{Resource, ResourceKind};
use crate::utility::{attribute, non_empty_attribute};

/// Resource tables built from `[ext_resource]` and `[sub_resource]` headers.
/// Later declarations with the same key replace earlier ones.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    external: HashMap<String, Resource>,
    embedded: HashMap<String, Resource>,
    declarations: Vec<String>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ResourceKind, line: &str) -> Option<&Resource> {
        match kind {
            ResourceKind::External => self.register_external(line),
            ResourceKind::Embedded => self.register_embedded(line),
        }
    }

    /// Keyed by `id`, or by `uid` when there is no `id`. Dropped without either.
    pub fn register_external(&mut self, line: &str) -> Option<&Resource> {
        self.declarations.push(line.to_string());

        let id = non_empty_attribute(line, "id");
        let uid = non_empty_attribute(line, "uid");
        let key = id.or(uid)?.to_string();

        let resource = Resource {
            kind: ResourceKind::External,
            id: key.clone(),
            resource_type: attribute(line, "type").unwrap_or_default().to_string(),
            path: attribute(line, "path").map(str::to_string),
            uid: uid.map(str::to_string),
        };
        self.external.insert(key.clone(), resource);
        self.external.get(&key)
    }

    /// Keyed by `id` only.
    pub fn register_embedded(&mut self, line: &str) -> Option<&Resource> {
        self.declarations.push(line.to_string());

        let key = non_empty_attribute(line, "id")?.to_string();
        let resource = Resource {
            kind: ResourceKind::Embedded,
            id: key.clone(),
            resource_type: attribute(line, "type").unwrap_or_default().to_string(),
            path: None,
            uid: None,
        };
        self.embedded.insert(key.clone(), resource);
        self.embedded.get(&key)
    }

    pub fn external(&self, key: &str) -> Option<&Resource> {
        self.external.get(key)
    }

    pub fn embedded(&self, key: &str) -> Option<&Resource> {
        self.embedded.get(key)
    }

    pub fn into_parts(
        self,
    ) -> (
        HashMap<String, Resource>,
        HashMap<String, Resource>,
        Vec<String>,
    ) {
        (self.external, self.embedded, self.declarations)
    }
}

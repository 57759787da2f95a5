//! Template registry (C7): the catalog agents are instantiated from.

pub mod template_registry;

pub use template_registry::{
    RegistryHealthStatus, TemplateMatchResult, TemplatePerformance, TemplateRegistry,
};

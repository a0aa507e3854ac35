//! Skills registry: catalog types and on-disk resolution.

pub mod store;
pub mod types;

pub use store::{
    REGISTRY_FILE, RegistryStore, SkillStorage, SkillsSearch, find_registry_location,
    load_registry,
};
pub use types::{
    DanglingReference, DefaultsConfig, InferenceConfig, InferenceRule, Limits, ReferenceSource,
    Registry, SkillDescriptor,
};

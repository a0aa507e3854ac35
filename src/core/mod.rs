//! Skill selection and loading

pub mod block;
pub mod inference;
pub mod loader;
pub mod pipeline;
pub mod plan_header;
pub mod recorder;
pub mod selection;

pub use block::format_block;
pub use inference::{InferenceMatch, infer};
pub use loader::{LoadOutcome, LoadReport, LoadStep, LoadedSkill, load};
pub use pipeline::{LoadOptions, LoadSummary, PipelineResult, resolve_and_load, select_and_load};
pub use plan_header::{PlanDescriptor, SkillsMode};
pub use recorder::{LoadRecord, record_load};
pub use selection::{Selection, SelectionBasis, select};

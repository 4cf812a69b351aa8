//! Core types: ids, projects, categories, templates, tables, numeration

mod category;
mod ids;
mod name;
mod node;
mod numeration;
mod project;
mod table;
mod template;

pub use category::{Category, DeleteMode, DeleteOutcome, ROOT_DEPTH};
pub use ids::{CategoryId, ParseIdError, ProjectId, TemplateId};
pub use name::{MAX_NAME_LEN, Name, ParseNameError};
pub use node::{NodeKind, NodeRef};
pub use numeration::{Numeration, ParseNumerationError};
pub use project::Project;
pub use table::TableGrid;
pub use template::{Template, TemplateUpdate};

pub mod pipeline;

pub use pipeline::{OrganizeReport, OrganizerPipeline};

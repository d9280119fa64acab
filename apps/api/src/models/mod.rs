pub mod package;
pub mod profile;

pub use package::{CareerPackage, DocumentKind};
pub use profile::{CandidateProfile, Industry, Rank, TargetPosition};

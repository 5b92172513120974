pub mod builder;
pub mod detect;
pub mod tables;

pub use builder::{Exemptions, ExemptionsBuilder};
pub use detect::{PackageLookup, ProcessLookup, SystemProcesses, VdbPackages};

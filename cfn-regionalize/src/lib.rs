//! Rewrites hardcoded partition literals in CloudFormation templates so the
//! same template deploys in any AWS partition (standard, GovCloud, China)
pub mod cli;
pub mod commands;
pub mod regionalize;
pub mod walk;

pub use cli::{Cli, Commands};

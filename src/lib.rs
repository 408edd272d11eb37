pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod stack;
pub mod ui;

pub use error::{PrStackError, Result, Severity};

pub mod catalog;
pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod render;
pub mod resolve;
pub mod table;

pub use config::{MapConfig, NameFixups};
pub use error::ParseError;
pub use pipeline::{run, PipelineSummary};
pub use table::{Row, Table};

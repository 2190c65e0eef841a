pub mod failure_writer;
pub mod template_engine;

pub use failure_writer::FailureWriter;
pub use template_engine::TemplateEngine;

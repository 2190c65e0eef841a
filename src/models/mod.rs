pub mod loaders;
pub mod record;
pub mod report;
pub mod rule;
pub mod template;

pub use loaders::{collect_input_files, CsvRowSource, RowSource};
pub use record::Record;
pub use report::RunReport;
pub use rule::{RuleSet, RuleSpec, SubstitutionRule};
pub use template::Template;

pub mod args;
pub mod form;
pub mod output;

pub use args::{ConfigArgs, OutputArgs, SearchArgs};
pub use form::{DEFAULT_BUDGET, SearchForm};
pub use output::{print_check_report, print_outcome, print_view};

pub(crate) use dialoguer::console::Term;

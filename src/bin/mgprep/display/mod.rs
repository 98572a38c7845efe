mod error;
mod logging;
mod progress;
mod tables;

pub use error::print_error;
pub use logging::init_logging;
pub use progress::Progress;
pub use tables::{
    print_attribute_survey, print_bond_label_distribution, print_corpus_summary,
    print_element_distribution, print_prep_summary, print_vocabulary,
};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self { interactive: false }
        } else {
            self
        }
    }
}

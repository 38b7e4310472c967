//! Rules command - print the rules summary.

use crate::cli::output::print_rules;

pub fn execute() {
    print_rules();
}

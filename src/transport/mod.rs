/// Local filesystem line reading and atomic JSON output.
pub mod fs;

//! Interactive prompt loop

mod repl;

pub use repl::SolveRepl;

use clap::Parser;

/// Interactive calculator for `<number> <operator> <number>` expressions.
///
/// Reads one expression per line from standard input. Type `help` at the
/// prompt for the supported operators and `q` to quit.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {}

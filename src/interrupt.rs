use log::info;
use signal_hook::{consts::signal::SIGINT, iterator::Signals};
use std::{io, process, thread};

use crate::{error::Result, repl::farewell};

/// Ends the session on SIGINT the same way end of input does: the farewell
/// is printed and the process exits with status 0.
///
/// In the line editor a Ctrl-C keypress arrives as a key event instead, so
/// this only fires for piped input or a signal sent from elsewhere.
pub fn exit_on_interrupt() -> Result<()> {
    let mut signals = Signals::new([SIGINT])?;

    thread::spawn(move || {
        if signals.forever().next().is_some() {
            info!("interrupted");
            // The line editor may have left the terminal in raw mode
            crossterm::terminal::disable_raw_mode().ok();
            farewell(&mut io::stdout()).ok();
            process::exit(0);
        }
    });

    Ok(())
}

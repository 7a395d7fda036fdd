use clap::Parser;
use log::info;
use nu_ansi_term::{Color, Style};
use reedline::{DefaultHinter, Reedline, Signal};
use simple_calc::{
    cli::Args,
    error::Result,
    repl::{handle_line, run_piped, Control, REPLPrompt, SyntaxHighlighter, BANNER, EXITING},
};
use std::io::{self, IsTerminal};

fn run_repl() -> Result<()> {
    let mut line_editor = Reedline::create()
        .with_hinter(Box::new(
            DefaultHinter::default().with_style(Style::new().italic().fg(Color::LightGray)),
        ))
        .with_highlighter(Box::new(SyntaxHighlighter));

    let prompt = REPLPrompt;
    let mut stdout = io::stdout();

    println!("{}", BANNER);

    loop {
        match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => {
                if handle_line(&buffer, &mut stdout)? == Control::Quit {
                    break Ok(());
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("{}", EXITING);
                break Ok(());
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let _args = Args::parse();

    #[cfg(unix)]
    simple_calc::interrupt::exit_on_interrupt()
        .inspect_err(|err| {
            eprintln!("{}", err);
        })
        .ok();

    let session = if io::stdin().is_terminal() {
        info!("REPL MODE");
        run_repl()
    } else {
        info!("PIPE MODE");
        run_piped(io::stdin().lock(), &mut io::stdout())
    };

    session
        .inspect_err(|err| {
            eprintln!("{}", err);
        })
        .ok();

    Ok(())
}

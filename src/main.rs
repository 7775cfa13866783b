use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::fmt;

use cafedump::classfile::parse::ClassFileParser;
use cafedump::dump::Dump;
use cafedump::interface::cli::Cli;

fn main() -> Result<()> {
    let args = Cli::parse();

    let format = fmt::format()
        .with_ansi(true)
        .without_time()
        .with_level(true)
        .with_target(false)
        .with_thread_names(false)
        .compact();

    let level = if args.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };

    // logs go to stderr, keeping the dump on stdout clean
    tracing_subscriber::fmt()
        .with_max_level(level)
        .event_format(format)
        .with_writer(std::io::stderr)
        .init();

    let parser = ClassFileParser::from_path(&args.file)?;
    let class = parser.parse()?;

    print!("{}", Dump::new(&class, &args.file));

    Ok(())
}

use clap::Parser;

#[derive(Parser)]
#[clap(
    version = "0.1",
    about = "A structural dumper for JVM class files"
)]
pub struct Cli {
    /// Path to the class file to dump
    #[clap(value_name = "FILE")]
    pub file: String,

    /// Enable per-record trace logging
    #[clap(short, long)]
    pub verbose: bool,
}

use anyhow::Result;
use audio_transcribe::cli::{transcribe, Cli};
use clap::error::ErrorKind;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            eprintln!("Missing audio_path");
            eprintln!("Usage: audio-transcribe <AUDIO_PATH> [MODEL_SIZE] [LANGUAGE]");
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    transcribe::run(&cli)
}

mod app;
mod command;
mod config;
mod consts;
mod game;
mod options;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: lerpsnake [<options>]\n",
    "\n",
    "Options:\n",
    "  -c, --config <path>     Read configuration from the given file\n",
    "      --log-file <path>   Write log messages to the given file\n",
    "      --log-level <level> Set the log level (default: info)\n",
    "  -h, --help              Show this help and exit\n",
    "  -V, --version           Show the program version and exit\n",
);

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<LevelFilter>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Action {
    Run(Arguments),
    Help,
    Version,
}

impl Action {
    fn from_parser(mut parser: Parser) -> Result<Action, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => args.log_level = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Action::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Action::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Action::Run(args))
    }

    fn run(self) -> ExitCode {
        match self {
            Action::Run(args) => match run(args) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    if e.downcast_ref::<io::Error>()
                        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
                    {
                        return ExitCode::SUCCESS;
                    }
                    eprintln!("lerpsnake: {e:?}");
                    ExitCode::from(2)
                }
            },
            Action::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            Action::Version => {
                println!("lerpsnake {}", env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> ExitCode {
    match Action::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => {
            eprintln!("lerpsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => {
            let path = Config::default_path()?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
    };
    let log_file = args.log_file.or_else(|| config.logging.file.clone());
    if let Some(path) = log_file {
        let level = match args.log_level {
            Some(level) => level,
            None => config.logging.level_filter()?.unwrap_or(LevelFilter::Info),
        };
        let file = fs_err::File::create(&path)?;
        WriteLogger::init(level, simplelog::Config::default(), file)
            .context("failed to initialize logger")?;
    }
    log::info!("Starting lerpsnake {}", env!("CARGO_PKG_VERSION"));
    let game = Game::new(config.game);
    let terminal = ratatui::init();
    let r = App::new(game).run(terminal);
    ratatui::restore();
    r?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Action, lexopt::Error> {
        Action::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Action::Run(Arguments::default()));
    }

    #[rstest]
    #[case(&["-c", "foo.toml"])]
    #[case(&["--config", "foo.toml"])]
    #[case(&["--config=foo.toml"])]
    fn config_path(#[case] args: &[&str]) {
        assert_eq!(
            parse(args).unwrap(),
            Action::Run(Arguments {
                config: Some(PathBuf::from("foo.toml")),
                ..Arguments::default()
            })
        );
    }

    #[test]
    fn logging_args() {
        assert_eq!(
            parse(&["--log-file", "snake.log", "--log-level", "debug"]).unwrap(),
            Action::Run(Arguments {
                config: None,
                log_file: Some(PathBuf::from("snake.log")),
                log_level: Some(LevelFilter::Debug),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Action::Help)]
    #[case(&["--help"], Action::Help)]
    #[case(&["-V"], Action::Version)]
    #[case(&["--version"], Action::Version)]
    #[case(&["--config", "x.toml", "--help"], Action::Help)]
    fn info_flags(#[case] args: &[&str], #[case] cmd: Action) {
        assert_eq!(parse(args).unwrap(), cmd);
    }

    #[rstest]
    #[case(&["--log-level", "chatty"])]
    #[case(&["--config"])]
    #[case(&["--speed", "3"])]
    #[case(&["extra"])]
    fn bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}

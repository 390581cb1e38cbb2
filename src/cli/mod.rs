// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::Result;
use crate::types::{NotificationType, TileSize};
use clap::{Arg, ArgAction, Command, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PayloadKind {
    Tile,
    Toast,
}

impl From<PayloadKind> for NotificationType {
    fn from(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::Tile => NotificationType::Tile,
            PayloadKind::Toast => NotificationType::Toast,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SizeArg {
    Small,
    Medium,
    Wide,
    Large,
}

impl From<SizeArg> for TileSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Small => TileSize::Small,
            SizeArg::Medium => TileSize::Medium,
            SizeArg::Wide => TileSize::Wide,
            SizeArg::Large => TileSize::Large,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Debug,
}

pub struct TilecCli {
    config: config::ConfigFile,
    start_time: Instant,
}

impl Default for TilecCli {
    fn default() -> Self {
        Self::new()
    }
}

impl TilecCli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        self.setup_logging(matches.get_count("verbose"))?;

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        let outcome = match matches.subcommand() {
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            Some(("render", sub_matches)) => handlers::handle_render_command(self, sub_matches),
            Some(("watch", sub_matches)) => handlers::handle_watch_command(self, sub_matches),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        };

        log::debug!("Finished in {}ms", self.start_time.elapsed().as_millis());
        outcome
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .author("tilec contributors")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.toml or .json)")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("check")
                    .about("Validate payload files and print every issue")
                    .arg(Arg::new("input").help("Payload XML file or directory").required(true).index(1))
                    .arg(Arg::new("recursive").short('r').long("recursive").help("Check all XML files in directory recursively").action(ArgAction::SetTrue))
                    .arg(Arg::new("type").short('t').long("type").value_parser(clap::value_parser!(PayloadKind)).help("Payload notification type"))
                    .arg(Arg::new("deny-warnings").long("deny-warnings").help("Treat warnings as failures").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("render")
                    .about("Show the binding and chrome a tile size would display")
                    .arg(Arg::new("input").help("Payload XML file").required(true).index(1))
                    .arg(Arg::new("size").short('s').long("size").value_parser(clap::value_parser!(SizeArg)).help("Tile size to render"))
                    .arg(Arg::new("format").short('f').long("format").value_parser(clap::value_parser!(OutputFormat)).default_value("json").help("Output format"))
                    .arg(Arg::new("badge").long("badge").help("Render as if a badge were shown").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("watch")
                    .about("Re-check and re-render a payload whenever it changes")
                    .arg(Arg::new("input").help("Payload XML file").required(true).index(1))
                    .arg(Arg::new("size").short('s').long("size").value_parser(clap::value_parser!(SizeArg)).help("Tile size to render")),
            )
    }

    fn setup_logging(&self, verbose_count: u8) -> Result<()> {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
        Ok(())
    }

    pub(crate) fn config(&self) -> &config::ConfigFile {
        &self.config
    }

    /// Size from the command line, else the configured default.
    pub(crate) fn tile_size(&self, matches: &clap::ArgMatches) -> Result<TileSize> {
        match matches.get_one::<SizeArg>("size") {
            Some(size) => Ok((*size).into()),
            None => self.config.default_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        TilecCli::new().build_cli().debug_assert();
    }

    #[test]
    fn test_cli_metadata() {
        let command = TilecCli::new().build_cli();
        assert_eq!(command.get_name(), crate::NAME);
        assert_eq!(command.get_author(), Some("tilec contributors"));
    }

    #[test]
    fn test_check_arguments() {
        let matches = TilecCli::new()
            .build_cli()
            .try_get_matches_from(["tilec", "-vv", "check", "payloads", "-r", "-t", "toast", "--deny-warnings"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert!(sub.get_flag("recursive"));
        assert!(sub.get_flag("deny-warnings"));
        assert!(matches!(sub.get_one::<PayloadKind>("type"), Some(PayloadKind::Toast)));
    }

    #[test]
    fn test_size_falls_back_to_config() {
        let cli = TilecCli::new();
        let matches = cli
            .build_cli()
            .try_get_matches_from(["tilec", "render", "tile.xml"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(cli.tile_size(sub).unwrap(), TileSize::Medium);

        let matches = cli
            .build_cli()
            .try_get_matches_from(["tilec", "render", "tile.xml", "-s", "large"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(cli.tile_size(sub).unwrap(), TileSize::Large);
    }
}

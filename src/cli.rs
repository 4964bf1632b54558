use std::path::PathBuf;

use crate::app::App;
use crate::config::Config;
use crate::db::AnnotationStore;
use crate::error::{AppError, Result};
use crate::web;

const DEFAULT_PREVIEW_COUNT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    InitDb,
    Fetch { count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().peekable();
        let mut config_path = None;
        let mut command = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::Validation("--config needs a path".into()))?;
                    config_path = Some(PathBuf::from(path));
                }
                "--serve" => command = Some(Command::Serve),
                "--init-db" => command = Some(Command::InitDb),
                "--fetch" => {
                    let count = match args.peek() {
                        Some(next) if !next.starts_with("--") => {
                            let raw = args.next().unwrap_or_default();
                            raw.parse().map_err(|_| {
                                AppError::Validation(format!("--fetch count must be a number, got {raw:?}"))
                            })?
                        }
                        _ => DEFAULT_PREVIEW_COUNT,
                    };
                    command = Some(Command::Fetch { count });
                }
                other => {
                    return Err(AppError::Validation(format!("unknown argument {other:?}")));
                }
            }
        }

        Ok(Self {
            config_path,
            command: command.unwrap_or(Command::Serve),
        })
    }
}

pub async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Serve => {
            let app = App::new(config).await?;
            web::serve(app, &config.server.bind).await
        }
        Command::InitDb => {
            let store = AnnotationStore::open(config.database_path.clone()).await?;
            println!("Database created at: {}", store.path().display());
            Ok(())
        }
        Command::Fetch { count } => {
            let app = App::new(config).await?;
            for paper in app.fetch_papers(Some(count)).await? {
                println!("Title: {}", paper.title);
                println!("Authors: {}", paper.authors_display());
                println!("Published: {}", paper.published);
                println!("Summary: {}", paper.summary);
                println!("Link: {}\n", paper.link.as_deref().unwrap_or("None"));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_arguments_serves() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, Command::Serve);
        assert_eq!(args.config_path, None);
    }

    #[test]
    fn fetch_with_and_without_count() {
        assert_eq!(parse(&["--fetch"]).unwrap().command, Command::Fetch { count: 10 });
        assert_eq!(
            parse(&["--fetch", "3"]).unwrap().command,
            Command::Fetch { count: 3 }
        );
        assert!(parse(&["--fetch", "many"]).is_err());
    }

    #[test]
    fn config_path_before_command() {
        let args = parse(&["--config", "/tmp/dash.toml", "--init-db"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("/tmp/dash.toml")));
        assert_eq!(args.command, Command::InitDb);
    }

    #[test]
    fn fetch_followed_by_flag_uses_default_count() {
        let args = parse(&["--fetch", "--config", "c.toml"]).unwrap();
        assert_eq!(args.command, Command::Fetch { count: 10 });
        assert_eq!(args.config_path, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn unknown_and_incomplete_arguments_fail() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--config"]).is_err());
    }

    #[tokio::test]
    async fn init_db_creates_database_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: tmpdir.path().join("data").join("research_dashboard.db"),
            ..Config::default()
        };
        run(Command::InitDb, &config).await.unwrap();
        assert!(config.database_path.exists());
    }
}

//! JSON Line Viewer - Entry Point

use clap::Parser;
use jlv::model::{AppError, ParseFailure};
use jlv::source::DocumentSource;
use jlv::state::{DisplayState, Observable, Viewport};
use jlv::worker::{LineService, Request, Response};
use std::path::PathBuf;
use tracing::info;

/// Print a window of a large JSON document as flat, indented lines
#[derive(Parser, Debug)]
#[command(name = "jlv")]
#[command(version)]
#[command(about = "Windowed viewer for large JSON documents")]
pub struct Args {
    /// Path to JSON document (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// First line of the window to print (0-based)
    #[arg(short, long, default_value = "0")]
    pub position: usize,

    /// Maximum number of lines to print (default from config, else 100)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Emit the window as a JSON payload instead of indented text
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Resolve configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = jlv::config::load_config_with_precedence(args.config.clone())?;
        let merged = jlv::config::merge_config(config_file);
        let with_env = jlv::config::apply_env_overrides(merged);
        jlv::config::apply_cli_overrides(with_env, args.limit)
    };

    jlv::logging::init(&config.log_file_path)?;
    info!(config = ?config, "configuration resolved");

    let source = DocumentSource::detect(args.file.clone())?;
    let document = source.read_to_string()?;

    // The scroll calculator's job in one shot: turn the requested offset
    // into the (position, limit) pair for the worker.
    let viewport = Viewport::new(args.position, config.default_limit);
    let (position, limit) = viewport.window();

    let service = LineService::spawn();
    let handle = service.request(Request::load(document).with_window(position, limit));

    let as_json = args.json;
    let mut display = Observable::new(DisplayState::default());
    display.subscribe(move |state| render(state, as_json));

    match handle.wait()? {
        Response::Window { data, length } => {
            info!(length, window = data.len(), "window received");
            display.set(DisplayState::new(data, length));
        }
        Response::Failed { message } => return Err(ParseFailure { message }.into()),
        // The CLI never issues a clear request.
        Response::Cleared => {}
    }

    Ok(())
}

/// Render the latest display window to stdout.
fn render(state: &DisplayState, as_json: bool) {
    if as_json {
        match serde_json::to_string(state) {
            Ok(payload) => println!("{payload}"),
            Err(error) => tracing::error!(%error, "failed to serialize window"),
        }
    } else {
        for line in &state.data {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_does_not_error() {
        let result = Args::try_parse_from(["jlv", "--help"]);
        // Help returns Err with DisplayHelp, which is success
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }

    #[test]
    fn version_does_not_error() {
        let result = Args::try_parse_from(["jlv", "--version"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayVersion
        );
    }

    #[test]
    fn no_args_defaults() {
        let args = Args::parse_from(["jlv"]);
        assert_eq!(args.file, None);
        assert_eq!(args.position, 0);
        assert_eq!(args.limit, None);
        assert!(!args.json);
        assert_eq!(args.config, None);
    }

    #[test]
    fn file_path_populates_file_field() {
        let args = Args::parse_from(["jlv", "data.json"]);
        assert_eq!(args.file, Some(PathBuf::from("data.json")));
    }

    #[test]
    fn position_short_and_long_flags() {
        assert_eq!(Args::parse_from(["jlv", "-p", "50"]).position, 50);
        assert_eq!(Args::parse_from(["jlv", "--position", "99"]).position, 99);
    }

    #[test]
    fn position_rejects_negative() {
        assert!(Args::try_parse_from(["jlv", "-p", "-1"]).is_err());
    }

    #[test]
    fn limit_flags() {
        assert_eq!(Args::parse_from(["jlv", "-l", "25"]).limit, Some(25));
        assert_eq!(Args::parse_from(["jlv", "--limit", "1"]).limit, Some(1));
    }

    #[test]
    fn json_flag() {
        assert!(Args::parse_from(["jlv", "--json"]).json);
    }

    #[test]
    fn config_path() {
        let args = Args::parse_from(["jlv", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn combined_flags() {
        let args = Args::parse_from(["jlv", "doc.json", "-p", "10", "-l", "5", "--json"]);
        assert_eq!(args.file, Some(PathBuf::from("doc.json")));
        assert_eq!(args.position, 10);
        assert_eq!(args.limit, Some(5));
        assert!(args.json);
    }

    #[test]
    fn limit_flows_through_config_precedence_chain() {
        use jlv::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            default_limit: Some(250),
            log_file_path: None,
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.default_limit, 250, "config file overrides default");

        let with_cli = apply_cli_overrides(merged, Some(25));
        assert_eq!(with_cli.default_limit, 25, "CLI overrides all other sources");
    }
}

// SPDX-License-Identifier: MPL-2.0
use commons_lens::app::{paths, subscription, view, App, Flags};
use commons_lens::application::port::CommonsApi;
use commons_lens::config::{self, Config, Settings};
use commons_lens::i18n::{fluent::I18n, FluentValue};
use commons_lens::infrastructure::MediaWikiClient;
use std::sync::Arc;

const HELP: &str = "\
Browse the images of a Wikimedia Commons category.

USAGE:
  commons-lens [OPTIONS] [CATEGORY]

OPTIONS:
  --lang <id>          interface language (en-US, fr)
  --config-dir <dir>   directory holding settings.toml
  --depth <n>          subcategory levels to include
  --width <px>         thumbnail width in pixels
  --no-probe           skip the connectivity check at start-up
  -h, --help           print this help

Set RUST_LOG=debug to trace requests.
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let mut flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        depth: args.opt_value_from_str("--depth")?,
        width: args.opt_value_from_str("--width")?,
        no_probe: args.contains("--no-probe"),
        category: None,
    };
    let rest: Vec<String> = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();
    if !rest.is_empty() {
        flags.category = Some(rest.join(" "));
    }
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> Config {
    let mut config = config::load().unwrap_or_else(|err| {
        log::warn!("Using default settings: {}", err);
        Config::default()
    });
    if flags.depth.is_some() {
        config.recursion_depth = flags.depth;
    }
    if flags.width.is_some() {
        config.thumbnail_width = flags.width;
    }
    config
}

async fn run(flags: Flags, settings: Settings, i18n: &I18n) -> std::process::ExitCode {
    let client = match MediaWikiClient::new(&settings) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", view::error_text(i18n, &err));
            return std::process::ExitCode::FAILURE;
        }
    };

    if !flags.no_probe {
        println!("{}", view::connection_check(i18n, client.api_url()));
        match client.site_info().await {
            Ok(site) => println!(
                "{}",
                i18n.tr_with_args("status-connection-ok", &[("site", FluentValue::from(site))])
            ),
            Err(err) => {
                log::error!("Connectivity check failed: {}", err);
                eprintln!(
                    "{}",
                    i18n.tr_with_args(
                        "status-connection-failed",
                        &[("error", FluentValue::from(view::error_text(i18n, &err)))],
                    )
                );
                return std::process::ExitCode::FAILURE;
            }
        }
    }

    let mut app = App::new(Arc::new(client), settings);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    match subscription::run_session(&mut app, i18n, stdin, &mut stdout, flags.category).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", view::error_text(i18n, &err));
            std::process::ExitCode::FAILURE
        }
    }
}

fn main() -> std::process::ExitCode {
    env_logger::init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return std::process::ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return std::process::ExitCode::from(2);
        }
    };

    paths::init_cli_override(flags.config_dir.clone());
    let config = load_config(&flags);
    let settings = config.settings();
    let i18n = I18n::new(flags.lang.clone(), &config);
    log::debug!("Settings: {:?}", settings);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start the async runtime: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };
    runtime.block_on(run(flags, settings, &i18n))
}

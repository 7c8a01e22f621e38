// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::BackendRuntime;
use std::env;
use std::path::PathBuf;
use supplierdesk_api::Client;
use supplierdesk_app::ControllerState;
use supplierdesk_testkit::FakeBackend;

const DEMO_SEED: u64 = 20;
const DEMO_SUPPLIERS: usize = 24;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `supplierdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    let base_url = config.base_url(options.base_url.as_deref())?;
    let timeout = config.timeout()?;

    let log_path = logging::init(&config)?;
    tracing::info!(
        config = %options.config_path.display(),
        log = %log_path.display(),
        demo = options.demo,
        "starting supplierdesk"
    );

    let mut state = ControllerState::default();
    if options.demo {
        let mut runtime =
            BackendRuntime::new(FakeBackend::seeded(DEMO_SEED, DEMO_SUPPLIERS));
        return supplierdesk_tui::run_app(&mut state, &mut runtime);
    }

    let client = Client::new(&base_url, timeout).with_context(|| {
        format!(
            "invalid [server] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        let count = client.ping().with_context(|| {
            format!("check {base_url}; start the supplier service or pass --base-url")
        })?;
        tracing::info!(%base_url, count, "check passed");
        println!("{base_url}: {count} suppliers");
        return Ok(());
    }

    tracing::info!(
        base_url = client.base_url(),
        timeout = ?client.timeout(),
        "connecting to supplier service"
    );
    let mut runtime = BackendRuntime::new(client);
    supplierdesk_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    base_url: Option<String>,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        base_url: None,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--base-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a URL"))?;
                options.base_url = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("supplierdesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --base-url <url>         Supplier service URL (overrides config and env)");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch against seeded in-memory suppliers");
    println!("  --check                  Validate config and list suppliers once");
    println!("  --help                   Show this help");
}

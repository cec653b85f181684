// src/cli.rs
use std::{ffi::OsString, path::PathBuf};

use clap::{ArgGroup, Args, Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr};
use lettre::{Address, address::AddressError};

use crate::{
    config::SmtpConfig,
    error::ConfigError,
    notify::{Mailer, SmtpMailer},
    runner::{self, Envelope},
    specs::{PageWatch, Raketa, Spec, Target, Trigger},
};

/// Check a watched page once and email the recipients the first time it triggers.
///
/// SMTP settings come from WATCHER_SMTP_USER, WATCHER_SMTP_PASSWORD and
/// WATCHER_SMTP_ENDPOINT (host:port).
#[derive(Parser, Debug)]
#[command(name = "watcher", version)]
pub struct Cli {
    /// Email address of sender
    #[arg(long, value_name = "ADDR", value_parser = parse_address)]
    pub sender: Address,

    /// Email addresses of recievers, divided by comma
    #[arg(
        long = "recievers",
        visible_alias = "receivers",
        value_name = "ADDR",
        required = true,
        value_delimiter = ',',
        value_parser = parse_address
    )]
    pub recievers: Vec<Address>,

    #[command(subcommand)]
    pub spec: SpecCommand,
}

#[derive(Subcommand, Debug)]
pub enum SpecCommand {
    /// Raketa "Russkij kod 0286" pre-order page
    Raketa(StateArgs),
    /// Any page: trigger when a piece of text appears or disappears
    Page(PageArgs),
}

#[derive(Args, Debug)]
pub struct StateArgs {
    /// File holding the triggered flag ('0' or '1'); missing means not triggered
    #[arg(long, value_name = "PATH")]
    pub state_file: PathBuf,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("trigger").required(true).args(["appears", "disappears"])))]
pub struct PageArgs {
    /// Page to fetch
    #[arg(long)]
    pub url: String,

    /// Trigger once TEXT is on the page
    #[arg(long, value_name = "TEXT")]
    pub appears: Option<String>,

    /// Trigger once TEXT is gone from the page
    #[arg(long, value_name = "TEXT")]
    pub disappears: Option<String>,

    /// Compare ASCII letters case-insensitively
    #[arg(long)]
    pub ignore_case: bool,

    /// Email subject (default names the URL)
    #[arg(long)]
    pub subject: Option<String>,

    #[command(flatten)]
    pub state: StateArgs,
}

impl SpecCommand {
    /// Build the target and return it with its state file.
    pub fn into_target(self) -> (Target, PathBuf) {
        match self {
            SpecCommand::Raketa(state) => (Target::Raketa(Raketa::new()), state.state_file),
            SpecCommand::Page(args) => {
                let (text, trigger) = match (args.appears, args.disappears) {
                    (Some(text), _) => (text, Trigger::Appears),
                    (None, Some(text)) => (text, Trigger::Disappears),
                    // clap's "trigger" group guarantees one of the two
                    (None, None) => (String::new(), Trigger::Appears),
                };
                let mut page = PageWatch::new(args.url, text, trigger);
                page.ignore_case = args.ignore_case;
                page.subject = args.subject;
                (Target::Page(page), args.state.state_file)
            }
        }
    }
}

fn parse_address(s: &str) -> Result<Address, AddressError> {
    s.trim().parse()
}

/// Binary entry: parse `std::env`, talk to the real relay. Returns the exit status.
pub fn run() -> i32 {
    let cli = match parse(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let smtp = match SmtpConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            let report = eyre::Report::new(e).wrap_err("loading SMTP settings");
            loge!("{report:#}");
            return 1;
        }
    };
    logd!("SMTP: {:?}", smtp);

    execute(cli, &SmtpMailer::new(smtp))
}

/// Same as [`run`] with explicit arguments and mailer.
pub fn run_with<I, T>(args: I, mailer: &dyn Mailer) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse(args) {
        Ok(cli) => execute(cli, mailer),
        Err(code) => code,
    }
}

/// Parse arguments; on failure, print clap's message and give back the exit status.
/// `--help`/`--version` exit 0, everything else 1.
pub fn parse<I, T>(args: I) -> Result<Cli, i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        if !e.use_stderr() {
            return 0;
        }
        let err = ConfigError::Arguments(e.kind().as_str().unwrap_or("unrecognized input").to_string());
        loge!("{err}");
        1
    })
}

/// One cycle for parsed arguments. Errors are logged with their cause chain
/// and turned into exit status 1.
pub fn execute(cli: Cli, mailer: &dyn Mailer) -> i32 {
    let envelope = Envelope { sender: cli.sender, recipients: cli.recievers };
    let (target, state_file) = cli.spec.into_target();
    logf!("Using spec {}", target.name());

    let result = runner::run(&target, &state_file, &envelope, mailer)
        .wrap_err_with(|| format!("processing spec {}", target.name()));

    match result {
        Ok(outcome) => {
            logf!("Spec {} done: {:?}", target.name(), outcome);
            0
        }
        Err(report) => {
            loge!("Exception occurred while processing spec: {report:#}");
            1
        }
    }
}

//! Entry point for the sentineltop TUI. Parses args, resolves the profile and runs the App.

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use sentineltop::app::{App, Source};
use sentineltop::dashboard::DashboardConfig;
use sentineltop::history::MAX_WINDOW;
use sentineltop::logging;
use sentineltop::profiles::{
    load_profiles, save_action, save_profiles, ProfileEntry, ProfileRequest, ProfilesFile,
    ResolveProfile, SaveAction,
};
use sentineltop::ui::processes::ProcessOrder;
use sentineltop::ws::ChannelConfig;

const USAGE: &str = "[--profile NAME|-P NAME] [--save] [--demo] [--dry-run] [--window N] [--alert-cap N] [--reconnect-ms MS] [--sort producer|cpu] [ws://HOST:PORT/ws]";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    save: bool,
    demo: bool,
    dry_run: bool,
    window: Option<usize>,
    alert_cap: Option<usize>,
    reconnect_ms: Option<u64>,
    sort: Option<ProcessOrder>,
}

enum ArgsError {
    Help(String),
    Invalid(String),
}

fn parse_num<T: std::str::FromStr>(flag: &str, v: Option<String>) -> Result<T, ArgsError> {
    let v = v.ok_or_else(|| ArgsError::Invalid(format!("{flag} needs a value")))?;
    v.parse()
        .map_err(|_| ArgsError::Invalid(format!("{flag}: '{v}' is not a valid number")))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgsError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sentineltop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        // --flag=value is treated like --flag value
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = || inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => return Err(ArgsError::Help(format!("Usage: {prog} {USAGE}"))),
            "--profile" | "-P" => out.profile = value().filter(|v| !v.is_empty()),
            "--save" => out.save = true,
            "--demo" => out.demo = true,
            "--dry-run" => out.dry_run = true,
            "--window" => {
                let n: usize = parse_num(&flag, value())?;
                if !(1..=MAX_WINDOW).contains(&n) {
                    return Err(ArgsError::Invalid(format!(
                        "--window: must be between 1 and {MAX_WINDOW}, got {n}"
                    )));
                }
                out.window = Some(n);
            }
            "--alert-cap" => out.alert_cap = Some(parse_num(&flag, value())?),
            "--reconnect-ms" => out.reconnect_ms = Some(parse_num(&flag, value())?),
            "--sort" => {
                let v = value().unwrap_or_default();
                out.sort = Some(ProcessOrder::parse(&v).ok_or_else(|| {
                    ArgsError::Invalid(format!("--sort: expected 'producer' or 'cpu', got '{v}'"))
                })?);
            }
            _ if arg.starts_with('-') => {
                return Err(ArgsError::Invalid(format!(
                    "Unknown flag '{arg}'. Usage: {prog} {USAGE}"
                )))
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(ArgsError::Invalid(format!(
                        "Unexpected argument. Usage: {prog} {USAGE}"
                    )));
                }
            }
        }
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgsError::Help(msg)) => {
            eprintln!("{msg}");
            return Ok(());
        }
        Err(ArgsError::Invalid(msg)) => anyhow::bail!(msg),
    };

    logging::init();

    let defaults = DashboardConfig::default();
    let cfg = DashboardConfig {
        window: parsed.window.unwrap_or(defaults.window),
        alert_cap: parsed.alert_cap.unwrap_or(defaults.alert_cap),
        order: parsed.sort.unwrap_or(defaults.order),
    };

    // Demo mode short-circuit (ignore other args)
    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        if parsed.dry_run {
            println!("demo");
            return Ok(());
        }
        return App::new(cfg).run(Source::Demo).await;
    }

    let Some(url) = resolve_url(&parsed)? else {
        return Ok(());
    };
    if url == "demo" {
        return App::new(cfg).run(Source::Demo).await;
    }

    let mut channel = ChannelConfig::new(&url)?;
    if let Some(ms) = parsed.reconnect_ms {
        channel.reconnect_delay = Duration::from_millis(ms);
    }

    if parsed.dry_run {
        println!("{}", channel.url);
        return Ok(());
    }

    info!(url = %channel.url, window = cfg.window, "starting dashboard");
    App::new(cfg).run(Source::Remote(channel)).await
}

/// Turn CLI input plus stored profiles into the URL to connect to,
/// persisting profile changes on the way. `None` means the user aborted.
fn resolve_url(parsed: &ParsedArgs) -> anyhow::Result<Option<String>> {
    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
    };
    let mut profiles_mut = profiles_file.clone();

    let url = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(u) => {
            // Possibly save if profile specified and --save or new entry
            if let Some(name) = parsed.profile.as_ref() {
                let write = match save_action(&profiles_mut, name, &u) {
                    SaveAction::Create => true,
                    SaveAction::Unchanged => false,
                    SaveAction::Overwrite => {
                        parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ))
                    }
                };
                if write {
                    store(&mut profiles_mut, name, &u)?;
                }
            }
            u
        }
        ResolveProfile::Loaded(u) => u,
        ResolveProfile::PromptSelect(mut names) => {
            // Always add demo option to list
            if !names.iter().any(|n| n == "demo") {
                names.push("demo".into());
            }
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let Some(name) = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| names.get(idx.checked_sub(1)?))
            else {
                return Ok(None);
            };
            if name == "demo" {
                return Ok(Some("demo".into()));
            }
            match profiles_mut.profiles.get(name) {
                Some(entry) => entry.url.clone(),
                None => return Ok(None),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (ws://HOST:PORT/ws or wss://...): ")?;
            let url = url.trim().to_string();
            if url.is_empty() {
                return Ok(None);
            }
            store(&mut profiles_mut, &name, &url)?;
            url
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(None);
        }
    };
    Ok(Some(url))
}

fn store(pf: &mut ProfilesFile, name: &str, url: &str) -> anyhow::Result<()> {
    pf.profiles
        .insert(name.to_string(), ProfileEntry { url: url.to_string() });
    save_profiles(pf).context("saving profiles")
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

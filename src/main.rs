//! Woolly - read Mastodon from the terminal
#![allow(clippy::uninlined_format_args)]

use std::io::Read;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use woolly::api::{ApiError, MastodonClient, SearchKind};
use woolly::{
    Account, AnnotatedStatus, Config, Notification, RenderOptions, StatusAnnotator, Tag, Timeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    match parse_args(&args)? {
        Command::Flatten { path, json } => flatten_cli(path.as_deref(), json),
        Command::Timeline { timeline, limit } => timeline_cli(timeline, limit).await,
        Command::Bookmarks { limit } => bookmarks_cli(limit).await,
        Command::Notifications {
            only_mentions,
            limit,
        } => notifications_cli(only_mentions, limit).await,
        Command::Trending { limit } => trending_cli(limit).await,
        Command::Search { query, kind, limit } => search_cli(&query, kind, limit).await,
        Command::Config { init: false } => show_config(),
        Command::Config { init: true } => init_config(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
#[derive(Debug)]
enum Command {
    Flatten {
        path: Option<String>,
        json: bool,
    },
    Timeline {
        timeline: Option<Timeline>,
        limit: Option<usize>,
    },
    Bookmarks {
        limit: Option<usize>,
    },
    Notifications {
        only_mentions: bool,
        limit: Option<usize>,
    },
    Trending {
        limit: Option<usize>,
    },
    Search {
        query: String,
        kind: SearchKind,
        limit: Option<usize>,
    },
    Config {
        init: bool,
    },
    Help,
    Version,
}

/// Parse the full argument list (program name first)
fn parse_args(args: &[String]) -> Result<Command> {
    if args.len() == 1 {
        return Ok(Command::Help);
    }

    let limit = parse_limit(args)?;
    let has_flag = |flags: &[&str]| args.iter().any(|a| flags.contains(&a.as_str()));
    let rest = positionals(args);

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "flatten" => {
            let path = rest
                .first()
                .filter(|a| **a != "-")
                .map(ToString::to_string);
            Ok(Command::Flatten {
                path,
                json: has_flag(&["--json"]),
            })
        }

        "timeline" | "tl" => {
            let timeline = rest
                .first()
                .map(|a| a.parse::<Timeline>())
                .transpose()?;
            Ok(Command::Timeline { timeline, limit })
        }

        "bookmarks" => Ok(Command::Bookmarks { limit }),

        "notifications" | "notifs" => Ok(Command::Notifications {
            only_mentions: has_flag(&["--mentions", "-m"]),
            limit,
        }),

        "trending" | "trends" => Ok(Command::Trending { limit }),

        "search" => {
            if rest.is_empty() {
                anyhow::bail!("Missing search query");
            }
            let kind = if has_flag(&["--accounts", "-a"]) {
                SearchKind::Accounts
            } else if has_flag(&["--hashtags", "-t"]) {
                SearchKind::Hashtags
            } else {
                SearchKind::Statuses
            };
            Ok(Command::Search {
                query: rest.join(" "),
                kind,
                limit,
            })
        }

        "config" => match rest.first() {
            None => Ok(Command::Config { init: false }),
            Some(&"init") => Ok(Command::Config { init: true }),
            Some(other) => Err(anyhow::anyhow!("Unknown config action: {other}")),
        },

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'woolly --help' for usage"
        )),
    }
}

fn parse_limit(args: &[String]) -> Result<Option<usize>> {
    match args.iter().position(|a| a == "--limit" || a == "-l") {
        None => Ok(None),
        Some(i) => {
            let value = args
                .get(i + 1)
                .ok_or_else(|| anyhow::anyhow!("Missing value for --limit"))?;
            let limit = value
                .parse()
                .with_context(|| format!("Invalid limit: {value}"))?;
            Ok(Some(limit))
        }
    }
}

/// Arguments after the command, minus flags and the value of `--limit`
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = args.iter().skip(2).map(String::as_str);

    while let Some(arg) = rest.next() {
        match arg {
            "-l" | "--limit" => {
                rest.next();
            }
            "-" => out.push(arg),
            flag if flag.starts_with('-') => {}
            _ => out.push(arg),
        }
    }

    out
}

fn print_help() {
    let config_path = woolly::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🐑 Woolly - Mastodon, flattened

USAGE:
    woolly [COMMAND]

COMMANDS:
    flatten [FILE] [--json]            Flatten post HTML (stdin if no FILE)
      Examples:
        echo '<p>hi <a href="https://x">x</a></p>' | woolly flatten
        woolly flatten status.html --json

    timeline [home|local|public]       Show a timeline
    bookmarks                          Show bookmarked statuses
    notifications [-m, --mentions]     Show notifications (or mentions only)
    trending                           Show trending hashtags
    search <query> [-a|-t]             Search statuses (-a accounts, -t hashtags)

    config                             Show configuration
    config init                        Write a default config file

OPTIONS:
    -l, --limit <n>                    Number of items to fetch
    -h, --help                         Show this help message
    -v, --version                      Show version information

ENVIRONMENT:
    {}                    Instance to use
    {}                       Access token
    RUST_LOG                           Log filter (default: warn)

CONFIG:
    {}
"#,
        woolly::LOGO,
        woolly::config::ENV_INSTANCE,
        woolly::config::ENV_TOKEN,
        config_path
    );
}

fn print_version() {
    println!("woolly {}", woolly::VERSION);
}

fn flatten_cli(path: Option<&str>, json: bool) -> Result<()> {
    let html = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
        }
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            html
        }
    };

    let nodes = woolly::html::parse(&html);

    if json {
        let out = serde_json::to_string_pretty(&nodes).context("Failed to serialize nodes")?;
        println!("{out}");
    } else {
        let config = Config::load()?;
        println!("{}", woolly::render(&nodes, &config.render_options()));
    }

    Ok(())
}

fn client(config: &Config) -> MastodonClient {
    MastodonClient::new(&config.instance, config.access_token.as_deref())
}

/// Turn API failures into the multi-line message users see
fn report(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message().join("\n"))
}

async fn timeline_cli(timeline: Option<Timeline>, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let timeline = timeline.unwrap_or_else(|| config.timeline());
    let limit = limit.unwrap_or(config.post_limit);

    let client = client(&config);
    let statuses = client.timeline(timeline, limit).await.map_err(report)?;

    println!("📰 {} timeline ({})\n", timeline, client.instance());
    print_statuses(
        StatusAnnotator::default().annotate_all(statuses),
        &config,
        client.instance(),
    );
    Ok(())
}

async fn bookmarks_cli(limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);
    let statuses = client
        .bookmarks(limit.unwrap_or(config.post_limit))
        .await
        .map_err(report)?;

    println!("🔖 Bookmarks\n");
    print_statuses(
        StatusAnnotator::default().annotate_all(statuses),
        &config,
        client.instance(),
    );
    Ok(())
}

async fn notifications_cli(only_mentions: bool, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);
    let notifications = client
        .notifications(limit.unwrap_or(config.post_limit), only_mentions)
        .await
        .map_err(report)?;

    println!("{}\n", if only_mentions { "💬 Mentions" } else { "🔔 Notifications" });
    if notifications.is_empty() {
        println!("Nothing here yet.");
    }
    for notification in notifications {
        print_notification(notification, &config, client.instance());
    }
    Ok(())
}

async fn trending_cli(limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);
    let tags = client
        .trending_tags(limit.unwrap_or(config.post_limit))
        .await
        .map_err(report)?;

    println!("📈 Trending on {}\n", client.instance());
    for tag in &tags {
        print_tag(tag);
    }
    Ok(())
}

async fn search_cli(query: &str, kind: SearchKind, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);
    let limit = limit.unwrap_or(config.post_limit);

    println!("🔍 Results for \"{query}\"\n");
    let found = match kind {
        SearchKind::Statuses => {
            let statuses = client.search_statuses(query, limit).await.map_err(report)?;
            let found = statuses.len();
            print_statuses(
                StatusAnnotator::default().annotate_all(statuses),
                &config,
                client.instance(),
            );
            found
        }
        SearchKind::Accounts => {
            let accounts = client.search_accounts(query, limit).await.map_err(report)?;
            for account in &accounts {
                print_account(account, client.instance());
            }
            accounts.len()
        }
        SearchKind::Hashtags => {
            let tags = client.search_hashtags(query, limit).await.map_err(report)?;
            for tag in &tags {
                print_tag(tag);
            }
            tags.len()
        }
    };

    if found == 0 {
        println!("No results.");
    }
    Ok(())
}

fn show_config() -> Result<()> {
    let path = Config::default_path()?;
    let config = Config::load()?;

    println!("Config file: {}", path.display());
    println!("  instance:          {}", config.instance);
    println!(
        "  access token:      {}",
        if config.access_token.is_some() { "set" } else { "not set" }
    );
    println!("  default timeline:  {}", config.timeline());
    println!("  post limit:        {}", config.post_limit);
    println!("  wrap width:        {}", config.wrap_width);
    println!("  show link targets: {}", config.show_link_targets);
    Ok(())
}

fn init_config() -> Result<()> {
    let path = Config::default_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    Config::default().save()?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn print_statuses(statuses: Vec<AnnotatedStatus>, config: &Config, instance: &str) {
    let options = config.render_options();
    let now = Utc::now();

    for annotated in &statuses {
        if annotated.is_reblog() {
            println!(
                "🔁 {} boosted",
                annotated.status.account.display_name_or_acct()
            );
        }
        print_status_body(annotated.displayed(), &options, instance, now);
        println!("{}", "─".repeat(options.width.clamp(20, 80)));
    }
}

fn print_status_body(
    annotated: &AnnotatedStatus,
    options: &RenderOptions,
    instance: &str,
    now: DateTime<Utc>,
) {
    let status = &annotated.status;
    println!(
        "{} ({}) · {}",
        status.account.display_name_or_acct(),
        status.account.full_handle(instance),
        woolly::time::relative_time(status.created_at, now)
    );

    if status.has_spoiler() {
        println!("⚠ CW: {}", status.spoiler_text);
    }

    let body = woolly::render(&annotated.content, options);
    if !body.is_empty() {
        println!("{body}");
    }

    // Targets are not inlined, so list them below the body
    if !options.show_link_targets {
        let targets = woolly::html::links(&annotated.content)
            .into_iter()
            .filter(|link| !link.href.is_empty() && !link.text.starts_with(['@', '#']));
        for (i, link) in targets.enumerate() {
            println!("  [{}] {}", i + 1, link.href);
        }
    }

    if !status.media_attachments.is_empty() {
        println!("📎 {} attachment(s)", status.media_attachments.len());
    }

    println!(
        "💬 {}  🔁 {}  ⭐ {}",
        status.replies_count, status.reblogs_count, status.favourites_count
    );
    if let Some(url) = &status.url {
        println!("{url}");
    }
}

fn print_notification(notification: Notification, config: &Config, instance: &str) {
    let now = Utc::now();
    let options = config.render_options();
    let mention = notification.kind == woolly::NotificationType::Mention;

    if !mention {
        println!(
            "{} · {}",
            notification.header(),
            woolly::time::relative_time(notification.created_at, now)
        );
    }

    match notification.status {
        Some(status) => {
            let annotated = StatusAnnotator::default().annotate(status);
            if mention {
                print_status_body(annotated.displayed(), &options, instance, now);
            } else {
                let preview = woolly::plain_text(&annotated.displayed().content);
                println!("  {}", preview.replace('\n', " "));
            }
        }
        None => println!("  {}", notification.account.url),
    }
    println!();
}

fn print_tag(tag: &Tag) {
    println!(
        "#{:<30} {:>6} posts  {:>5} people",
        tag.name,
        tag.uses_today(),
        tag.accounts_today()
    );
}

fn print_account(account: &Account, instance: &str) {
    println!(
        "{} ({})",
        account.display_name_or_acct(),
        account.full_handle(instance)
    );
    if !account.url.is_empty() {
        println!("  {}", account.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("woolly")
            .chain(line.split_whitespace())
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_no_args_is_help() {
        assert!(matches!(parse_args(&args("")).unwrap(), Command::Help));
    }

    #[test]
    fn test_flatten_path_skips_flags() {
        let cases = [
            ("flatten post.html", Some("post.html")),
            ("flatten --json post.html", Some("post.html")),
            ("flatten -l 5", None),
            ("flatten --limit 3 x.html", Some("x.html")),
            ("flatten -", None),
            ("flatten", None),
        ];
        for (line, expected) in cases {
            match parse_args(&args(line)).unwrap() {
                Command::Flatten { path, .. } => assert_eq!(path.as_deref(), expected, "{line}"),
                other => panic!("{line} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn test_timeline_name_after_limit() {
        match parse_args(&args("timeline -l 5 local")).unwrap() {
            Command::Timeline { timeline, limit } => {
                assert_eq!(timeline, Some(Timeline::Local));
                assert_eq!(limit, Some(5));
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn test_search_kinds() {
        let cases = [
            ("search rust", SearchKind::Statuses),
            ("search --accounts gargron", SearchKind::Accounts),
            ("search rust -t", SearchKind::Hashtags),
        ];
        for (line, expected) in cases {
            match parse_args(&args(line)).unwrap() {
                Command::Search { kind, .. } => assert_eq!(kind, expected, "{line}"),
                other => panic!("{line} parsed as {other:?}"),
            }
        }

        match parse_args(&args("search -l 2 rust lang")).unwrap() {
            Command::Search { query, limit, .. } => {
                assert_eq!(query, "rust lang");
                assert_eq!(limit, Some(2));
            }
            other => panic!("parsed as {other:?}"),
        }
        assert!(parse_args(&args("search --accounts")).is_err());
    }

    #[test]
    fn test_config_actions() {
        assert!(matches!(
            parse_args(&args("config")).unwrap(),
            Command::Config { init: false }
        ));
        assert!(matches!(
            parse_args(&args("config init")).unwrap(),
            Command::Config { init: true }
        ));
        assert!(parse_args(&args("config wipe")).is_err());
    }

    #[test]
    fn test_bad_limit() {
        assert!(parse_args(&args("timeline --limit lots")).is_err());
        assert!(parse_args(&args("timeline --limit")).is_err());
    }
}

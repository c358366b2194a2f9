use chrono::Utc;
use semisync_kv::{FollowerInfo, KvNodeConfig, KvOptions, RoleConfig};
use slog::Drain;
use std::env;
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;
use tokio::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let node_id = env_or("NODE_ID", "node-1".to_string())?;
    let info_logger = match env::var("LOG_DIR") {
        Ok(log_dir) => create_root_logger_for_file(&log_dir, &node_id)?,
        Err(_) => create_root_logger_for_stdout(),
    };

    let config = KvNodeConfig {
        my_node_id: node_id,
        ip_addr: Ipv4Addr::UNSPECIFIED,
        port: env_or("PORT", 8000)?,
        role: role_from_env()?,
        info_logger: info_logger.clone(),
        options: options_from_env()?,
    };

    let mut node = semisync_kv::create_kv_node(config).await?;

    tokio::signal::ctrl_c().await?;
    slog::info!(info_logger, "Received Ctrl-C. Shutting down.");
    node.shutdown();

    Ok(())
}

fn role_from_env() -> Result<RoleConfig, Box<dyn Error>> {
    let role = env_or("ROLE", "follower".to_string())?;
    match role.to_lowercase().as_str() {
        "leader" => {
            let followers = env::var("FOLLOWERS").map_err(|_| "FOLLOWERS is required for ROLE=leader")?;
            Ok(RoleConfig::Leader {
                followers: parse_followers(&followers)?,
            })
        }
        "follower" => Ok(RoleConfig::Follower),
        other => Err(format!("Unknown ROLE '{}', expected 'leader' or 'follower'", other).into()),
    }
}

fn options_from_env() -> Result<KvOptions, Box<dyn Error>> {
    Ok(KvOptions {
        write_quorum: env_opt("WRITE_QUORUM")?,
        min_replication_delay: env_opt::<f64>("MIN_DELAY")?.map(seconds).transpose()?,
        max_replication_delay: env_opt::<f64>("MAX_DELAY")?.map(seconds).transpose()?,
    })
}

/// Parse `id=ip:port,id=ip:port,...`.
fn parse_followers(s: &str) -> Result<Vec<FollowerInfo>, Box<dyn Error>> {
    let mut followers = Vec::new();
    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let mut parts = item.splitn(2, '=');
        let (follower_id, addr) = match (parts.next(), parts.next()) {
            (Some(id), Some(addr)) if !id.is_empty() => (id, addr),
            _ => return Err(format!("Follower '{}' is not of the form id=ip:port", item).into()),
        };
        let addr: SocketAddrV4 = addr
            .parse()
            .map_err(|e| format!("Follower '{}' has a bad address: {}", item, e))?;

        followers.push(FollowerInfo {
            follower_id: follower_id.to_string(),
            ip_addr: *addr.ip(),
            port: addr.port(),
        });
    }

    Ok(followers)
}

fn seconds(secs: f64) -> Result<Duration, Box<dyn Error>> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("Delay must be a non-negative number of seconds, got {}", secs).into());
    }
    Ok(Duration::from_secs_f64(secs))
}

fn env_or<T>(name: &str, default: T) -> Result<T, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(env_opt(name)?.unwrap_or(default))
}

fn env_opt<T>(name: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("Bad value for {} '{}': {}", name, raw, e).into()),
        Err(_) => Ok(None),
    }
}

fn create_root_logger_for_file(log_dir: &str, node_id: &str) -> Result<slog::Logger, Box<dyn Error>> {
    let directory = Path::new(log_dir).join(format!("info_log_{}", node_id));
    fs::create_dir_all(&directory)?;

    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(directory.join(format!("{}_info.log", now)))?;

    let decorator = slog_term::PlainDecorator::new(file);
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Ok(slog::Logger::root(drain, slog::o!()))
}

fn create_root_logger_for_stdout() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}

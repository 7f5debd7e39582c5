use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Serves the incident commander showcase views.
#[derive(Debug, Clone, Parser)]
#[command(name = "commander-server", version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "COMMANDER_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Incident board re-render tick, in milliseconds
    #[arg(
        long = "tick-ms",
        env = "COMMANDER_TICK_MS",
        default_value_t = 3000,
        value_parser = clap::value_parser!(u64).range(100..)
    )]
    pub tick_ms: u64,

    /// Print every scenario walkthrough to stdout and exit
    #[arg(long)]
    pub demo: bool,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["commander-server"]).expect("parse");
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.tick_interval(), Duration::from_secs(3));
        assert!(!config.demo);
    }

    #[test]
    fn rejects_tiny_tick() {
        assert!(Config::try_parse_from(["commander-server", "--tick-ms", "5"]).is_err());
    }

    #[test]
    fn demo_flag() {
        let config =
            Config::try_parse_from(["commander-server", "--demo", "--bind", "0.0.0.0:9000"])
                .expect("parse");
        assert!(config.demo);
        assert_eq!(config.bind.port(), 9000);
    }
}

//! Command-line configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Server-rendered movie catalogue.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "MARQUEE_ADDR", default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Directory served under `/public/`.
    #[arg(long, env = "MARQUEE_PUBLIC_DIR", default_value = "./public")]
    pub public_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["marquee"]).unwrap();
        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.public_dir, PathBuf::from("./public"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "marquee", "--addr", "127.0.0.1:9000", "--public-dir", "/srv/static",
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.public_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn rejects_bad_address() {
        assert!(Config::try_parse_from(["marquee", "--addr", "nowhere"]).is_err());
    }
}

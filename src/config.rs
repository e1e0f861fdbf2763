// ⚙️ Server Configuration
// Bind address from command-line flags, then environment, then defaults

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable holding a full `host:port` bind address
pub const BIND_ENV: &str = "MORTGAGE_CALC_BIND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Resolve from process arguments and `MORTGAGE_CALC_BIND`
    pub fn from_env() -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let bind = std::env::var(BIND_ENV).ok();
        Self::resolve(&args, bind.as_deref())
    }

    /// Flags override the environment value, which overrides defaults
    pub fn resolve(args: &[String], bind_env: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match bind_env {
            Some(bind) => Self::parse_bind(bind)?,
            None => ServerConfig::default(),
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow::anyhow!("--host requires a value"))?;
                    config.host = value.clone();
                    i += 1;
                }
                "--port" | "-p" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow::anyhow!("--port requires a value"))?;
                    config.port = value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid port: {}", value))?;
                    i += 1;
                }
                other => anyhow::bail!("Unknown argument: {}", other),
            }
            i += 1;
        }

        Ok(config)
    }

    fn parse_bind(bind: &str) -> anyhow::Result<Self> {
        let (host, port) = bind
            .rsplit_once(':')
            .ok_or_else(|| anyhow::anyhow!("{} must be host:port, got {}", BIND_ENV, bind))?;
        let port = port
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid port in {}: {}", BIND_ENV, bind))?;
        Ok(ServerConfig {
            host: host.to_string(),
            port,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

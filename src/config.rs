use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "pix-charge-server")]
#[command(about = "Pix Copia e Cola payload generator for shared subscriptions")]
#[command(version)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://pix_charges.db")]
    pub database_url: String,

    /// Receiver name used when a request does not carry one
    #[arg(long, env = "DEFAULT_MERCHANT_NAME", default_value = "Streams Control")]
    pub default_merchant_name: String,

    /// Receiver city used when a request does not carry one
    #[arg(long, env = "DEFAULT_MERCHANT_CITY", default_value = "Recife")]
    pub default_merchant_city: String,

    /// Reject keys without a declared type instead of guessing CPF/CNPJ
    #[arg(long, env = "REQUIRE_KEY_TYPE", default_value_t = false)]
    pub require_key_type: bool,

    /// Page size for the recent charges listing
    #[arg(long, env = "RECENT_CHARGES_LIMIT", default_value = "50")]
    pub recent_charges_limit: i64,
}

impl Config {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

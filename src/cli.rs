use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "phishscout")]
#[command(about = "Classifies a single URL as phishing or legitimate using trained tree ensembles plus DNS, TLS, WHOIS, geolocation and reputation checks")]
#[command(version)]
pub struct Cli {
    /// URL to analyze (a missing scheme defaults to http://)
    pub url: Option<String>,

    /// Create default configuration file at ./config/phishscout.toml
    #[arg(long)]
    pub init: bool,

    /// Path to the configuration file
    #[arg(long, default_value = crate::config::CONFIG_PATH)]
    pub config: String,

    /// Output format: 'text' (default) or 'json'
    #[arg(short = 'f', long, default_value = "text")]
    pub output_format: String,

    /// Skip network signal collection (model scoring only)
    #[arg(long)]
    pub no_signals: bool,

    /// Print the aligned feature vector handed to each model
    #[arg(long)]
    pub show_features: bool,

    /// Verbose logging (use -v for INFO, -vv for DEBUG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        // URL validation only applies when not using --init
        if !self.init {
            match &self.url {
                None => {
                    return Err(
                        "a URL is required (e.g. phishscout https://example.com)".to_string()
                    )
                }
                Some(url) if url.trim().is_empty() => {
                    return Err("URL cannot be empty".to_string())
                }
                _ => {}
            }
        }

        if !["text", "json"].contains(&self.output_format.as_str()) {
            return Err("Output format must be 'text' or 'json'".to_string());
        }

        Ok(())
    }
}

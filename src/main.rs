use anyhow::Result;
use chrono::Local;
use clap::Parser;
use instapi::{
    commands::{CallOptions, Config, DEFAULT_BASE_URL, RunOptions, call, run},
    http::{
        BackoffPolicy, DEFAULT_BACKOFF_BASE_SECS, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS,
        Method,
    },
    logging,
    params::RawParams,
    report::banner,
    runtime::{RealRuntime, Runtime},
};
use std::path::PathBuf;

/// instapi - instance lifecycle API client for CI pipelines
///
/// Sends authenticated JSON requests to the instance controller and retries
/// timeouts, network failures and 5xx responses. Client errors (4xx) fail
/// immediately.
///
/// Examples:
///   instapi call --url https://host/api --payload '{"a":1}' --api-key KEY
///   OPERATION=onboardInstance INSTANCE_NAME=acme X_API_KEY=KEY instapi run
#[derive(Parser, Debug)]
#[command(author, version = instapi::VERSION, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// POST a JSON payload to a URL and print {status, content} on success
    Call(CallArgs),

    /// Run a lifecycle operation configured through CI environment variables
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
pub struct CallArgs {
    /// API endpoint URL
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// JSON payload as a string
    #[arg(long, value_name = "JSON")]
    pub payload: String,

    /// X-API-Key header value
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum number of attempts
    #[arg(long = "max-retries", value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_retries: u32,

    /// Skip TLS certificate verification (the default)
    #[arg(long = "ignore-ssl", conflicts_with = "verify_ssl")]
    pub ignore_ssl: bool,

    /// Verify TLS certificates
    #[arg(long = "verify-ssl")]
    pub verify_ssl: bool,

    /// HTTP method
    #[arg(long, value_enum, default_value_t = Method::Post)]
    pub method: Method,

    /// How the wait between attempts grows
    #[arg(long, value_enum, default_value_t = BackoffPolicy::Linear)]
    pub backoff: BackoffPolicy,

    /// Backoff base in seconds
    #[arg(long = "backoff-base", value_name = "SECONDS", default_value_t = DEFAULT_BACKOFF_BASE_SECS)]
    pub backoff_base: u64,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// onboardInstance, activateInstance, deactivateInstance or updateInstance
    #[arg(long, env = "OPERATION")]
    pub operation: Option<String>,

    #[arg(long = "instance-name", env = "INSTANCE_NAME")]
    pub instance_name: Option<String>,

    #[arg(long, env = "REGION")]
    pub region: Option<String>,

    #[arg(long, env = "RETAILER")]
    pub retailer: Option<String>,

    #[arg(long = "retailer-variant", env = "RETAILER_VARIANT")]
    pub retailer_variant: Option<String>,

    /// "true" to activate the instance
    #[arg(long, env = "ACTIVATE")]
    pub activate: Option<String>,

    #[arg(long = "enable-disable-entity", env = "ENABLE_DISABLE_ENTITY")]
    pub enable_disable_entity: Option<String>,

    #[arg(long = "executed-by", env = "BUILD_USER")]
    pub executed_by: Option<String>,

    #[arg(long = "build-number", env = "BUILD_NUMBER")]
    pub build_number: Option<String>,

    /// Instance controller base URL
    #[arg(long = "api-url", env = "API_BASE_URL", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// X-API-Key header value
    #[arg(long = "api-key", env = "X_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TIMEOUT_SECONDS", value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum number of attempts
    #[arg(long = "retry-count", env = "RETRY_COUNT", value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub retry_count: u32,

    /// Backoff base in seconds
    #[arg(long = "retry-backoff", env = "RETRY_BACKOFF", value_name = "SECONDS", default_value_t = DEFAULT_BACKOFF_BASE_SECS)]
    pub retry_backoff: u64,

    /// How the wait between attempts grows
    #[arg(long = "retry-policy", env = "RETRY_POLICY", value_enum, default_value_t = BackoffPolicy::Exponential)]
    pub retry_policy: BackoffPolicy,

    /// Skip TLS certificate verification
    #[arg(long = "ignore-ssl", env = "IGNORE_SSL")]
    pub ignore_ssl: bool,

    /// Directory for the result file and the run log
    #[arg(long = "output-dir", env = "OUTPUT_DIR", value_name = "PATH", default_value = ".")]
    pub output_dir: PathBuf,
}

impl CallArgs {
    fn into_options(self) -> Result<CallOptions> {
        let config = Config::new(
            Some(self.api_key),
            !self.verify_ssl,
            self.timeout,
            self.max_retries,
            self.backoff_base,
            self.backoff,
        )?;
        Ok(CallOptions {
            url: self.url,
            payload: self.payload,
            method: self.method,
            config,
        })
    }
}

impl RunArgs {
    fn into_options(self) -> Result<RunOptions> {
        let config = Config::new(
            self.api_key,
            self.ignore_ssl,
            self.timeout,
            self.retry_count,
            self.retry_backoff,
            self.retry_policy,
        )?;
        Ok(RunOptions {
            params: RawParams {
                operation: self.operation,
                instance_name: self.instance_name,
                region: self.region,
                retailer: self.retailer,
                retailer_variant: self.retailer_variant,
                activate: self.activate,
                enable_disable_entity: self.enable_disable_entity,
                executed_by: self.executed_by,
                build_number: self.build_number,
            },
            base_url: self.api_url,
            output_dir: self.output_dir,
            config,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::Call(args) => {
            logging::init(None)?;
            let output = call(runtime, args.into_options()?).await?;
            println!("{}", serde_json::to_string(&output)?);
        }
        Commands::Run(args) => {
            print!("{}", banner(instapi::VERSION));
            runtime.create_dir_all(&args.output_dir)?;
            let log_file = logging::log_file_path(&args.output_dir, Local::now());
            logging::init(Some(&log_file))?;
            run(runtime, args.into_options()?).await?;
        }
    }
    Ok(())
}

use bankgate::application::crypto_relay::CryptoRelay;
use bankgate::catalog;
use bankgate::domain::callback::{
    AsanpardakhtCallback, CallbackFields, MellatCallback, SadadCallback,
};
use bankgate::domain::credentials::{
    AsanpardakhtCredentials, MellatCredentials, SadadCredentials,
};
use bankgate::domain::payment::{Amount, OrderId};
use bankgate::infrastructure::lazy::LazyTransport;
use bankgate::{
    AsanpardakhtAdapter, GatewayAdapter, MellatAdapter, Provider, SadadAdapter, application,
};
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the message a provider status code stands for
    Explain {
        provider: Provider,
        #[arg(allow_negative_numbers = true)]
        code: i64,
        /// Secondary textual status (Sadad only)
        #[arg(long)]
        status: Option<String>,
    },
    /// Print a fresh time-derived order id
    UniqueNumber,
    /// Request a payment session and print it as JSON
    Request {
        provider: Provider,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        callback_url: String,
        /// Generated when omitted
        #[arg(long)]
        order_id: Option<u64>,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Verify and settle a payment from its callback fields and print the result as JSON
    Verify {
        provider: Provider,
        /// Callback field as KEY=VALUE, repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

#[derive(Args)]
struct CredentialArgs {
    /// Terminal id (Mellat, Sadad) or merchant configuration id (Asanpardakht)
    #[arg(long, env = "BANKGATE_TERMINAL_ID")]
    terminal_id: Option<i64>,
    /// Username (Mellat, Asanpardakht) or merchant id (Sadad)
    #[arg(long, env = "BANKGATE_USERNAME")]
    username: Option<String>,
    /// Password (Mellat, Asanpardakht) or transaction key (Sadad)
    #[arg(long, env = "BANKGATE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(long, env = "BANKGATE_AES_KEY", hide_env_values = true)]
    aes_key: Option<String>,
    #[arg(long, env = "BANKGATE_AES_IV", hide_env_values = true)]
    aes_iv: Option<String>,
    /// Override the provider's service URL
    #[arg(long, env = "BANKGATE_ENDPOINT")]
    endpoint: Option<String>,
    /// Override Asanpardakht's encryption service URL
    #[arg(long, env = "BANKGATE_CRYPTO_ENDPOINT")]
    crypto_endpoint: Option<String>,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn require<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| miette!("missing --{flag} (or its BANKGATE_* environment variable)"))
}

/// One configured adapter per provider.
enum Gateway {
    Mellat(MellatAdapter),
    Sadad(SadadAdapter),
    Asanpardakht(AsanpardakhtAdapter),
}

impl CredentialArgs {
    fn into_gateway(self, provider: Provider) -> Result<Gateway> {
        let terminal_id = require(self.terminal_id, "terminal-id")?;
        let username = require(self.username, "username")?;
        let password = require(self.password, "password")?;

        Ok(match provider {
            Provider::Mellat => {
                let credentials = MellatCredentials {
                    terminal_id,
                    username,
                    password,
                };
                let slot = LazyTransport::soap(
                    self.endpoint.as_deref().unwrap_or(application::mellat::SOAP_URL),
                );
                Gateway::Mellat(MellatAdapter::with_slot(credentials, slot))
            }
            Provider::Sadad => {
                let credentials = SadadCredentials {
                    terminal_id,
                    merchant: username,
                    transaction_key: password,
                };
                let slot = LazyTransport::soap(
                    self.endpoint.as_deref().unwrap_or(application::sadad::SOAP_URL),
                );
                Gateway::Sadad(SadadAdapter::with_slot(credentials, slot))
            }
            Provider::Asanpardakht => {
                let credentials = AsanpardakhtCredentials {
                    merchant_id: terminal_id,
                    username,
                    password,
                    aes_key: require(self.aes_key, "aes-key")?,
                    aes_iv: require(self.aes_iv, "aes-iv")?,
                };
                let relay = CryptoRelay::with_slot(
                    credentials.aes_key.as_str(),
                    credentials.aes_iv.as_str(),
                    LazyTransport::soap(
                        self.crypto_endpoint
                            .as_deref()
                            .unwrap_or(application::crypto_relay::INTERNAL_SOAP_URL),
                    ),
                );
                let slot = LazyTransport::soap(
                    self.endpoint
                        .as_deref()
                        .unwrap_or(application::asanpardakht::SOAP_URL),
                );
                Gateway::Asanpardakht(AsanpardakhtAdapter::with_parts(credentials, slot, relay))
            }
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

async fn request<A: GatewayAdapter>(
    adapter: &A,
    amount: Amount,
    callback_url: &str,
    order_id: Option<OrderId>,
) -> Result<()> {
    let session = adapter.request(amount, callback_url, order_id).await?;
    print_json(&session)
}

async fn verify<A: GatewayAdapter>(adapter: &A, callback: A::Callback) -> Result<()> {
    let result = adapter.verify(callback).await?;
    print_json(&result)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Explain {
            provider,
            code,
            status,
        } => {
            println!("{}", catalog::resolve(provider, code, status.as_deref()));
        }
        Command::UniqueNumber => {
            println!("{}", application::unique::unique_number());
        }
        Command::Request {
            provider,
            amount,
            callback_url,
            order_id,
            credentials,
        } => {
            let amount = Amount::new(amount)?;
            let order_id = order_id.map(OrderId::new).transpose()?;
            match credentials.into_gateway(provider)? {
                Gateway::Mellat(a) => request(&a, amount, &callback_url, order_id).await?,
                Gateway::Sadad(a) => request(&a, amount, &callback_url, order_id).await?,
                Gateway::Asanpardakht(a) => request(&a, amount, &callback_url, order_id).await?,
            }
        }
        Command::Verify {
            provider,
            fields,
            credentials,
        } => {
            let fields: CallbackFields = fields.into_iter().collect();
            match credentials.into_gateway(provider)? {
                Gateway::Mellat(a) => verify(&a, MellatCallback::from_fields(&fields)?).await?,
                Gateway::Sadad(a) => verify(&a, SadadCallback::from_fields(&fields)?).await?,
                Gateway::Asanpardakht(a) => {
                    verify(&a, AsanpardakhtCallback::from_fields(&fields)?).await?
                }
            }
        }
    }

    Ok(())
}

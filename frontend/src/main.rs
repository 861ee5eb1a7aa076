use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::EnvFilter;

use frontend::api::auth::{activate, sign_up};
use frontend::config::ApiConfig;
use frontend::handler::api_handler::ApiHandler;
use frontend::store::auth::{ActivationStatus, SignUpStatus};
use frontend::store::toast::ToastLevel;
use frontend::store::{AppState, Store};
use shared::models::user::{ActivateUser, SignUpUser};

#[derive(Parser, Debug)]
#[command(version, about = "Talks to the account api")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new account
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        re_password: String,
    },
    /// Activate an account with the values from the activation email
    Activate {
        #[arg(long)]
        uid: String,
        #[arg(long)]
        token: String,
    },
}

/// Picks the log filters. `RUST_LOG` wins over the defaults, which means
/// `.env` has to be loaded before this runs.
fn log_filters() -> (Option<EnvFilter>, Option<Targets>) {
    let env_filter_layer = EnvFilter::try_from_default_env().ok();

    let lib_filter_layer = env_filter_layer.is_none().then(|| {
        Targets::new()
            .with_target("h2", LevelFilter::ERROR)
            .with_target("hyper", LevelFilter::ERROR)
            .with_default(LevelFilter::INFO)
    });

    (env_filter_layer, lib_filter_layer)
}

/// Installs tracing subscriber with default configuration
fn install_tracing() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer().with_target(true);
    let (env_filter_layer, lib_filter_layer) = log_filters();

    tracing_subscriber::registry()
        .with(env_filter_layer)
        .with(lib_filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    let dotenv = dotenv::dotenv();
    install_tracing();
    color_eyre::install()?;

    if let Err(err) = dotenv {
        tracing::debug!("No .env file loaded: {err}");
    }

    let cli = Cli::parse();
    let api_handler = ApiHandler::new(ApiConfig::from_env()?)?;
    let (mut store, dispatch) = Store::new(AppState::default());

    match cli.command {
        Command::Signup { first_name, last_name, email, password, re_password } => {
            let sign_up_user = SignUpUser {
                first_name,
                last_name,
                email,
                password,
                re_password,
            };
            sign_up(&api_handler, &dispatch, sign_up_user).await;
        }
        Command::Activate { uid, token } => {
            activate(&api_handler, &dispatch, ActivateUser { uid, token }).await;
        }
    }

    store.process_pending();

    let state = store.state();
    for toast in state.toasts.iter() {
        match toast.level {
            ToastLevel::Success => tracing::info!("{}", toast.message),
            ToastLevel::Error => tracing::warn!("{}", toast.message),
        }
    }

    if let SignUpStatus::Registered(payload) = &state.auth.sign_up {
        tracing::info!("Server responded: {payload}");
    }

    if let ActivationStatus::Activated(activation) = &state.auth.activation {
        tracing::info!("Server responded: {}", activation.message);
    }

    if let Some(err) = state.auth.failure() {
        if let Some(errors) = err.api_errors() {
            for (field, messages) in &errors.fields {
                tracing::warn!("{field}: {}", messages.join(" "));
            }
        }
        return Err(eyre!(err.clone()));
    }

    Ok(())
}

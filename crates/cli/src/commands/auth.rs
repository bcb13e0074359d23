//! Sign-in, sign-up and sign-out

use std::io;

use clap::{Args, Subcommand};
use saffron::{auth::AuthStore, storage::StateStorage};
use saffron_client::{AuthApi, LoginFlow, Registration};

use crate::errors::CliError;

/// Login subcommands.
#[derive(Debug, Subcommand)]
pub enum LoginCommand {
    /// Text a one-time code to a phone number
    OtpRequest {
        /// Phone number, with or without +977
        phone: String,
    },

    /// Sign in with a one-time code
    Otp {
        /// Phone number the code was sent to
        phone: String,

        /// Six-digit code
        code: String,
    },

    /// Staff or admin sign-in
    Staff {
        /// Work email
        email: String,

        /// Password
        #[arg(long, env = "SAFFRON_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// New customer account.
#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,
}

pub(crate) async fn login<S: StateStorage, A: AuthApi>(
    command: LoginCommand,
    flow: &LoginFlow<A>,
    store: &mut AuthStore<S>,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        LoginCommand::OtpRequest { phone } => {
            let phone = flow.request_otp(&phone).await?;

            writeln!(out, "Code sent to {phone}")?;

            return Ok(());
        }
        LoginCommand::Otp { phone, code } => {
            flow.verify_otp(store, &phone, &code).await?;
        }
        LoginCommand::Staff { email, password } => {
            flow.staff_login(store, &email, &password).await?;
        }
    }

    if let Some(user) = store.session().user() {
        writeln!(out, "Signed in as {} ({})", user.name, user.role)?;
    }

    Ok(())
}

pub(crate) async fn signup<A: AuthApi>(
    args: &SignupArgs,
    flow: &LoginFlow<A>,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    flow.register(&Registration {
        name: args.name.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
    })
    .await?;

    writeln!(
        out,
        "Account created. Sign in with `saffron login otp-request {}`",
        args.phone.trim()
    )?;

    Ok(())
}

pub(crate) fn logout<S: StateStorage, A: AuthApi>(
    flow: &LoginFlow<A>,
    store: &mut AuthStore<S>,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    flow.logout(store);

    writeln!(out, "Signed out")?;

    Ok(())
}

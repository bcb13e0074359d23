//! Command context.

use rusty_money::iso::Currency;
use saffron::{
    auth::AuthStore, cart::CartStore, money::find_currency, storage::FileStorage,
};
use saffron_client::{ApiClient, MenuCatalog};

use crate::{config::Cli, errors::CliError};

/// Everything a command needs: the API client, local state and display currency.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) client: ApiClient,
    pub(crate) storage: FileStorage,
    pub(crate) currency: &'static Currency,
}

impl Context {
    /// Open local state and build a client carrying the stored session.
    pub(crate) fn new(cli: &Cli) -> Result<Self, CliError> {
        let storage = FileStorage::open(&cli.session.state_dir)?;
        let currency = find_currency(&cli.session.currency)?;

        let auth = AuthStore::open(storage.clone());
        let client = ApiClient::new(cli.api.client_config())?.with_session(auth.session());

        Ok(Self {
            client,
            storage,
            currency,
        })
    }

    pub(crate) fn cart_store(&self) -> CartStore<FileStorage> {
        CartStore::open(self.storage.clone())
    }

    pub(crate) fn auth_store(&self) -> AuthStore<FileStorage> {
        AuthStore::open(self.storage.clone())
    }

    pub(crate) fn catalog(&self) -> MenuCatalog<ApiClient> {
        MenuCatalog::new(self.client.clone())
    }
}

//! ethvault - command line interface to the local Ethereum key vault.

mod commands;
mod config;
mod prompt;

use clap::Parser;
use ethvault_cipher::Aes256Cipher;
use ethvault_confirm::confirmation_channel;
use ethvault_core::{KeyVault, OsRandom};
use ethvault_store_file::FileStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ethvault", about = "Local Ethereum key vault", version)]
struct Cli {
    /// Path of the JSON key store file.
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "ETHVAULT_STORE")]
    store: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "ETHVAULT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a new private key and store it under its address.
    ///
    /// Prints the derived address. The key itself is only printed with
    /// `--show-key`; with `--encrypt` it is stored AES-256 encrypted under
    /// a password prompted for twice.
    Generate {
        /// Encrypt the key at rest with a password.
        #[arg(long)]
        encrypt: bool,

        /// Also print the generated key as hex.
        #[arg(long)]
        show_key: bool,
    },

    /// Import an existing private key into the vault.
    ///
    /// The key is read from the terminal without echo. With `--mnemonic`
    /// a 24-word phrase is read instead and decoded back to the key.
    Import {
        /// Read a mnemonic phrase instead of a hex key.
        #[arg(long)]
        mnemonic: bool,

        /// Encrypt the key at rest with a password.
        #[arg(long)]
        encrypt: bool,
    },

    /// List stored keys with their encryption state.
    List,

    /// Show a stored record; optionally decrypt the key itself.
    Show {
        /// Account address, any checksum-valid spelling.
        address: String,

        /// Decrypt and print the private key (asks for confirmation).
        #[arg(long)]
        decrypt: bool,

        /// Reason shown in the confirmation prompt.
        #[arg(long, default_value = "show private key")]
        reason: String,
    },

    /// Print the 24-word mnemonic phrase for a stored key.
    Export {
        /// Account address, any checksum-valid spelling.
        address: String,
    },

    /// Delete the record for an address.
    Delete {
        /// Account address, any checksum-valid spelling.
        address: String,

        /// Skip the interactive confirmation.
        #[arg(long)]
        yes: bool,
    },

    /// Sign a legacy transaction with a stored key.
    ///
    /// Reads the transaction fields as JSON ({"nonce": .., "gas_price": ..,
    /// "gas_limit": .., "to": .., "value": ..}) and prints the raw signed
    /// transaction hex. Nothing is broadcast.
    Sign {
        /// Account address of the signing key.
        address: String,

        /// Path of the transaction JSON file, or `-` for stdin.
        #[arg(long)]
        tx: PathBuf,
    },

    /// Delete every stored key and the store file itself.
    Destroy {
        /// Skip the interactive confirmation.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ethvault_utils::init_tracing();

    let cli = Cli::parse();

    let file_config = config::load_config(cli.config.as_deref());
    let store_path = cli.store.unwrap_or(file_config.store_path);

    let store = FileStore::open(&store_path).await?;
    let (bus, mut listener) = confirmation_channel();
    let vault = KeyVault::new(store, Aes256Cipher, OsRandom, bus);

    match cli.command {
        Command::Generate { encrypt, show_key } => {
            commands::generate(&vault, encrypt, show_key).await
        }
        Command::Import { mnemonic, encrypt } => commands::import(&vault, mnemonic, encrypt).await,
        Command::List => commands::list(&vault).await,
        Command::Show {
            address,
            decrypt,
            reason,
        } => commands::show(&vault, &mut listener, &address, decrypt, &reason).await,
        Command::Export { address } => commands::export(&vault, &mut listener, &address).await,
        Command::Delete { address, yes } => commands::delete(&vault, &address, yes).await,
        Command::Sign { address, tx } => commands::sign(&vault, &mut listener, &address, &tx).await,
        Command::Destroy { yes } => commands::destroy(&vault, yes).await,
    }
}

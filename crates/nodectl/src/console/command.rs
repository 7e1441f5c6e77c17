//! Pure parsing and validation of console lines into typed commands.
//!
//! Nothing here touches the backend. [`parse_command`] either yields a
//! [`Command`] whose arguments already satisfy the catalogue constraints or a
//! [`CommandError`] describing the first problem found.

use super::catalogue::{self, CommandSpec};
use super::errors::CommandError;
use super::flags::{ParsedFlags, parse_flags};

/// Arguments of a value transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Source wallet address.
    pub from: String,
    /// Destination wallet address.
    pub to: String,
    /// Units to move; always greater than zero.
    pub amount: u64,
    /// Mine the transaction on this node immediately.
    pub mine: bool,
}

/// A validated console command ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a ledger whose genesis reward goes to `address`.
    CreateBlockchain {
        /// Reward address.
        address: String,
    },
    /// Compute the balance of `address`.
    GetBalance {
        /// Queried address.
        address: String,
    },
    /// Transfer value between two addresses.
    Send(Transfer),
    /// Generate a new wallet key pair.
    CreateWallet,
    /// List wallet addresses.
    ListAddresses,
    /// Print the chain.
    PrintChain,
    /// Rebuild the unspent output index.
    ReindexUtxo,
}

impl Command {
    /// Catalogue name of the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateBlockchain { .. } => "createblockchain",
            Self::GetBalance { .. } => "getbalance",
            Self::Send(_) => "send",
            Self::CreateWallet => "createwallet",
            Self::ListAddresses => "listaddresses",
            Self::PrintChain => "printchain",
            Self::ReindexUtxo => "reindexutxo",
        }
    }

    /// Operator-facing confirmation once the backend call has run.
    #[must_use]
    pub fn confirmation(&self) -> String {
        match self {
            Self::CreateBlockchain { .. } => "Blockchain created successfully".to_owned(),
            Self::GetBalance { .. } => "Get balance successfully".to_owned(),
            Self::Send(transfer) => format!(
                "Transaction sent successfully: {} units from {} to {} (Mining: {}).",
                transfer.amount, transfer.from, transfer.to, transfer.mine
            ),
            Self::CreateWallet => "Wallet created successfully".to_owned(),
            Self::ListAddresses => "List of addresses has been printed successfully".to_owned(),
            Self::PrintChain => "Blockchain has been printed successfully".to_owned(),
            Self::ReindexUtxo => "UTXO reindex successfully".to_owned(),
        }
    }
}

const ADDRESS_REQUIRED: &str = "'address' parameter is needed";
const TRANSFER_REQUIRED: &str =
    "'from', 'to' and 'amount' parameters are needed and amount must be larger than 0";

/// Parses and validates one command.
///
/// `name` is the first token of the line and `args` the remaining tokens.
/// Quit commands are not catalogued and are rejected here as unknown; the
/// dispatcher handles them before calling this function.
///
/// # Errors
///
/// Returns [`CommandError::UnknownCommand`] for names missing from the
/// catalogue, [`CommandError::Parse`] for malformed flags, and
/// [`CommandError::Validation`] when required values are missing or invalid.
pub fn parse_command(name: &str, args: &[&str]) -> Result<Command, CommandError> {
    let spec = catalogue::lookup(name).ok_or_else(|| CommandError::UnknownCommand {
        name: name.to_owned(),
    })?;

    match spec.name {
        "createblockchain" => {
            let address = required_address(spec, args)?;
            Ok(Command::CreateBlockchain { address })
        }
        "getbalance" => {
            let address = required_address(spec, args)?;
            Ok(Command::GetBalance { address })
        }
        "send" => parse_transfer(spec, args).map(Command::Send),
        "createwallet" => Ok(Command::CreateWallet),
        "listaddresses" => Ok(Command::ListAddresses),
        "printchain" => Ok(Command::PrintChain),
        "reindexutxo" => Ok(Command::ReindexUtxo),
        other => Err(CommandError::UnknownCommand {
            name: other.to_owned(),
        }),
    }
}

fn flags_for(spec: &CommandSpec, args: &[&str]) -> Result<ParsedFlags, CommandError> {
    Ok(parse_flags(spec.flags, args)?)
}

fn required_address(spec: &CommandSpec, args: &[&str]) -> Result<String, CommandError> {
    let flags = flags_for(spec, args)?;
    let address = flags.string("address");
    if address.is_empty() {
        return Err(CommandError::Validation {
            message: ADDRESS_REQUIRED,
        });
    }
    Ok(address.to_owned())
}

fn parse_transfer(spec: &CommandSpec, args: &[&str]) -> Result<Transfer, CommandError> {
    let flags = flags_for(spec, args)?;
    let from = flags.string("from");
    let to = flags.string("to");
    let amount = u64::try_from(flags.integer("amount")).unwrap_or(0);
    if from.is_empty() || to.is_empty() || amount == 0 {
        return Err(CommandError::Validation {
            message: TRANSFER_REQUIRED,
        });
    }
    Ok(Transfer {
        from: from.to_owned(),
        to: to.to_owned(),
        amount,
        mine: flags.boolean("mine"),
    })
}

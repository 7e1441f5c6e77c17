//! Static catalogue of console commands.

use std::io::{self, Write};

use super::flags::FlagSpec;

/// Names that stop the console. Both bypass every other check.
pub const QUIT_COMMANDS: &[&str] = &["quit", "exit"];

/// Returns `true` when `name` is one of [`QUIT_COMMANDS`].
#[must_use]
pub fn is_quit_command(name: &str) -> bool {
    QUIT_COMMANDS.contains(&name)
}

/// Declaration of one console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command name as typed by the operator.
    pub name: &'static str,
    /// Argument synopsis shown in usage text.
    pub synopsis: &'static str,
    /// One-line description shown in usage text.
    pub summary: &'static str,
    /// Flags accepted by the command. Empty for flag-less commands.
    pub flags: &'static [FlagSpec],
}

const CREATE_BLOCKCHAIN_FLAGS: &[FlagSpec] = &[FlagSpec::string(
    "address",
    "The address to send genesis block reward to",
)];

const GET_BALANCE_FLAGS: &[FlagSpec] =
    &[FlagSpec::string("address", "The address to get balance for")];

const SEND_FLAGS: &[FlagSpec] = &[
    FlagSpec::string("from", "Source wallet address"),
    FlagSpec::string("to", "Destination wallet address"),
    FlagSpec::integer("amount", "Amount to send"),
    FlagSpec::boolean("mine", "Mine immediately on the same node"),
];

/// Every command the console recognises, in usage order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "createblockchain",
        synopsis: "-address ADDRESS",
        summary: "Create a blockchain and send genesis block reward to ADDRESS",
        flags: CREATE_BLOCKCHAIN_FLAGS,
    },
    CommandSpec {
        name: "createwallet",
        synopsis: "",
        summary: "Generates a new key-pair and saves it into the wallet file",
        flags: &[],
    },
    CommandSpec {
        name: "getbalance",
        synopsis: "-address ADDRESS",
        summary: "Get balance of ADDRESS",
        flags: GET_BALANCE_FLAGS,
    },
    CommandSpec {
        name: "listaddresses",
        synopsis: "",
        summary: "Lists all addresses from the wallet file",
        flags: &[],
    },
    CommandSpec {
        name: "printchain",
        synopsis: "",
        summary: "Print all the blocks of the blockchain",
        flags: &[],
    },
    CommandSpec {
        name: "reindexutxo",
        synopsis: "",
        summary: "Rebuilds the UTXO set",
        flags: &[],
    },
    CommandSpec {
        name: "send",
        synopsis: "-from FROM -to TO -amount AMOUNT -mine",
        summary: "Send AMOUNT of coins from FROM address to TO. Mine on the same node, when -mine is set.",
        flags: SEND_FLAGS,
    },
];

/// Looks up the declaration for `name`. Names are case-sensitive.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Writes the usage banner listing every command.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_usage<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Usage:")?;
    for spec in COMMANDS {
        if spec.synopsis.is_empty() {
            writeln!(out, "  {} - {}", spec.name, spec.summary)?;
        } else {
            writeln!(out, "  {} {} - {}", spec.name, spec.synopsis, spec.summary)?;
        }
    }
    writeln!(out, "  {} - Stop the console and shut down", QUIT_COMMANDS.join(" | "))?;
    out.flush()
}

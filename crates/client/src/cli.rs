//! Command-line definition for the `wareflow` binary.

use clap::{Args, Parser, Subcommand};

use wareflow_inventory::{InventoryLineId, InventoryRecordId, InventoryStatus};
use wareflow_observability::LogFormat;
use wareflow_picking::{PickItemId, PickingOrderId, PickingPriority, PickingStatus};
use wareflow_stock_in::{StockInId, StockInLineId, StockInStatus};
use wareflow_stock_out::{StockOutId, StockOutStatus};

/// Warehouse client: inventory counts, picking, stock in and stock out.
#[derive(Debug, Parser)]
#[command(name = "wareflow")]
#[command(about = "Work with a warehouse backend from the terminal")]
#[command(version)]
pub struct Cli {
    /// Serve in-memory demo data instead of calling the API
    #[arg(long, global = true)]
    pub mock: bool,

    /// Backend base URL (overrides WAREFLOW_API_URL)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Rows per page for list commands
    #[arg(long = "page-size", global = true)]
    pub page_size: Option<u32>,

    /// Log output format on stderr
    #[arg(long = "log-format", global = true, default_value = "json")]
    pub log_format: LogFormat,

    /// Sign in before running the command
    #[arg(long, global = true, env = "WAREFLOW_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "WAREFLOW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and print the session (export its token as WAREFLOW_AUTH_TOKEN)
    Login,
    /// Show the signed-in user
    Whoami,
    /// Inventory counts
    #[command(subcommand)]
    Inventory(InventoryCommand),
    /// Picking orders
    #[command(subcommand)]
    Picking(PickingCommand),
    /// Inbound receipts
    #[command(subcommand)]
    StockIn(StockInCommand),
    /// Outbound shipments
    #[command(subcommand)]
    StockOut(StockOutCommand),
}

/// Options shared by every `list` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long)]
    pub warehouse: Option<String>,

    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        status: Option<InventoryStatus>,
    },
    Show {
        id: InventoryRecordId,
    },
    /// Record the counted quantity of one line
    Count {
        id: InventoryRecordId,
        line: InventoryLineId,
        counted: i64,
    },
    Status {
        id: InventoryRecordId,
        status: InventoryStatus,
    },
}

#[derive(Debug, Subcommand)]
pub enum PickingCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        status: Option<PickingStatus>,
        #[arg(long)]
        priority: Option<PickingPriority>,
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Order with its process items
    Show {
        id: PickingOrderId,
    },
    /// Items grouped by location, with pick progress
    Progress {
        id: PickingOrderId,
    },
    /// Record a pick: one item, or every item at `--location`
    Pick {
        id: PickingOrderId,
        #[arg(required_unless_present = "location")]
        item: Option<PickItemId>,
        #[arg(required_unless_present = "location")]
        picked: Option<i64>,
        /// Location key; picks everything stored there
        #[arg(long, conflicts_with_all = ["item", "picked"])]
        location: Option<String>,
    },
    Status {
        id: PickingOrderId,
        status: PickingStatus,
    },
}

#[derive(Debug, Subcommand)]
pub enum StockInCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        status: Option<StockInStatus>,
        #[arg(long)]
        supplier: Option<String>,
    },
    Show {
        id: StockInId,
    },
    /// Record the received quantity of one line
    Receive {
        id: StockInId,
        line: StockInLineId,
        received: i64,
    },
    Status {
        id: StockInId,
        status: StockInStatus,
    },
}

#[derive(Debug, Subcommand)]
pub enum StockOutCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        status: Option<StockOutStatus>,
        #[arg(long)]
        destination: Option<String>,
    },
    Show {
        id: StockOutId,
    },
    Status {
        id: StockOutId,
        status: StockOutStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_and_status_parsing() {
        let cli = Cli::parse_from([
            "wareflow",
            "--mock",
            "--log-format",
            "pretty",
            "picking",
            "list",
            "--status",
            "in_progress",
            "--page",
            "2",
        ]);
        assert!(cli.mock);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        match cli.command {
            Command::Picking(PickingCommand::List { list, status, .. }) => {
                assert_eq!(status, Some(PickingStatus::InProgress));
                assert_eq!(list.page, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn pick_by_location_needs_no_item() {
        let id = PickingOrderId::generate().to_string();
        let cli = Cli::parse_from(["wareflow", "picking", "pick", id.as_str(), "--location", "WH1-A-01-1-1-1"]);
        match cli.command {
            Command::Picking(PickingCommand::Pick { item, location, .. }) => {
                assert_eq!(item, None);
                assert_eq!(location.as_deref(), Some("WH1-A-01-1-1-1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let id = StockOutId::generate().to_string();
        let result = Cli::try_parse_from(["wareflow", "stock-out", "status", id.as_str(), "lost"]);
        assert!(result.is_err());
    }
}

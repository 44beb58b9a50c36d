//! `wareflow` command-line entry point.

mod cli;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use serde::Serialize;

use wareflow_auth::Credentials;
use wareflow_client::{ClientConfig, Container, DataSource, ListState};
use wareflow_inventory::{InventoryFilter, InventoryStatus};
use wareflow_picking::{PickingFilter, PickingStatus};
use wareflow_stock_in::{StockInFilter, StockInStatus};
use wareflow_stock_out::{StockOutFilter, StockOutStatus};

use crate::cli::{
    Cli, Command, InventoryCommand, ListArgs, PickingCommand, StockInCommand, StockOutCommand,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    wareflow_observability::init_with(cli.log_format);

    let container = Container::from_config(config_from(&cli)?)?;
    let signed_in = match (&cli.username, &cli.password) {
        (Some(username), Some(password)) => Some(Credentials::new(username, password)),
        _ => None,
    };

    if let Command::Login = cli.command {
        let credentials = signed_in.context("login needs --username and --password")?;
        let session = container.auth.login(credentials).await;
        let session = outcome(session, container.auth.session().snapshot().error)?;
        return print(&session);
    }
    if let Some(credentials) = signed_in {
        let session = container.auth.login(credentials).await;
        outcome(session, container.auth.session().snapshot().error)?;
    }

    match cli.command {
        Command::Login => Ok(()),
        Command::Whoami => {
            let user = container.auth.refresh_profile().await;
            print(&outcome(user, container.auth.session().snapshot().error)?)
        }
        Command::Inventory(command) => inventory(&container, command).await,
        Command::Picking(command) => picking(&container, command).await,
        Command::StockIn(command) => stock_in(&container, command).await,
        Command::StockOut(command) => stock_out(&container, command).await,
    }
}

/// Environment first, flags on top.
fn config_from(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("invalid WAREFLOW_* environment")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_base_url(url.as_str())?;
    }
    if let Some(size) = cli.page_size {
        config = config.with_page_size(size)?;
    }
    if cli.mock {
        config = config.with_data_source(DataSource::Mock);
    }
    Ok(config)
}

async fn inventory(container: &Container, command: InventoryCommand) -> Result<()> {
    let store = &container.inventory;
    let failed = || store.detail().snapshot().error;
    match command {
        InventoryCommand::List { list, status } => {
            let filter = InventoryFilter {
                status,
                warehouse: list.warehouse.clone(),
                search: list.search.clone(),
                ..Default::default()
            };
            load_page(store.list(), filter, &list).await
        }
        InventoryCommand::Show { id } => print(&outcome(store.select(id).await, failed())?),
        InventoryCommand::Count { id, line, counted } => {
            store.select(id).await;
            print(&outcome(store.record_count(id, line, counted).await, failed())?)
        }
        InventoryCommand::Status { id, status } => {
            ensure_can_cancel(container, status == InventoryStatus::Cancelled)?;
            store.select(id).await;
            print(&outcome(store.change_status(id, status).await, failed())?)
        }
    }
}

async fn picking(container: &Container, command: PickingCommand) -> Result<()> {
    let store = &container.picking;
    let failed = || store.open().snapshot().error;
    match command {
        PickingCommand::List {
            list,
            status,
            priority,
            assignee,
        } => {
            let filter = PickingFilter {
                status,
                priority,
                assignee,
                warehouse: list.warehouse.clone(),
                search: list.search.clone(),
                ..Default::default()
            };
            load_page(store.list(), filter, &list).await
        }
        PickingCommand::Show { id } => {
            outcome(store.open_order(id).await, failed())?;
            let opened = store.open().current().context("order was not kept open")?;
            print(&serde_json::json!({
                "order": opened.order,
                "items": opened.items,
            }))
        }
        PickingCommand::Progress { id } => print(&outcome(store.open_order(id).await, failed())?),
        PickingCommand::Pick {
            id,
            item,
            picked,
            location,
        } => {
            outcome(store.open_order(id).await, failed())?;
            let summary = match (location, item, picked) {
                (Some(key), _, _) => store.pick_location(&key).await,
                (None, Some(item), Some(picked)) => store.record_pick(item, picked).await,
                _ => bail!("pick needs an item and a quantity, or --location"),
            };
            print(&outcome(summary, failed())?)
        }
        PickingCommand::Status { id, status } => {
            ensure_can_cancel(container, status == PickingStatus::Cancelled)?;
            outcome(store.open_order(id).await, failed())?;
            let order = match status {
                PickingStatus::InProgress => store.start().await,
                PickingStatus::Completed => store.complete().await,
                PickingStatus::Cancelled => store.cancel().await,
                PickingStatus::Pending => bail!("a picking order cannot go back to pending"),
            };
            print(&outcome(order, failed())?)
        }
    }
}

async fn stock_in(container: &Container, command: StockInCommand) -> Result<()> {
    let store = &container.stock_in;
    let failed = || store.detail().snapshot().error;
    match command {
        StockInCommand::List {
            list,
            status,
            supplier,
        } => {
            let filter = StockInFilter {
                status,
                supplier,
                warehouse: list.warehouse.clone(),
                search: list.search.clone(),
                ..Default::default()
            };
            load_page(store.list(), filter, &list).await
        }
        StockInCommand::Show { id } => print(&outcome(store.select(id).await, failed())?),
        StockInCommand::Receive { id, line, received } => {
            store.select(id).await;
            print(&outcome(store.receive_line(id, line, received).await, failed())?)
        }
        StockInCommand::Status { id, status } => {
            ensure_can_cancel(container, status == StockInStatus::Cancelled)?;
            store.select(id).await;
            print(&outcome(store.change_status(id, status).await, failed())?)
        }
    }
}

async fn stock_out(container: &Container, command: StockOutCommand) -> Result<()> {
    let store = &container.stock_out;
    let failed = || store.detail().snapshot().error;
    match command {
        StockOutCommand::List {
            list,
            status,
            destination,
        } => {
            let filter = StockOutFilter {
                status,
                destination,
                warehouse: list.warehouse.clone(),
                search: list.search.clone(),
                ..Default::default()
            };
            load_page(store.list(), filter, &list).await
        }
        StockOutCommand::Show { id } => print(&outcome(store.select(id).await, failed())?),
        StockOutCommand::Status { id, status } => {
            ensure_can_cancel(container, status == StockOutStatus::Cancelled)?;
            store.select(id).await;
            print(&outcome(store.change_status(id, status).await, failed())?)
        }
    }
}

/// What a list command prints.
#[derive(Serialize)]
struct Listing<T> {
    count: u64,
    page: u32,
    total_pages: u32,
    results: Vec<T>,
}

impl<T, F> From<ListState<T, F>> for Listing<T> {
    fn from(state: ListState<T, F>) -> Self {
        Self {
            count: state.count,
            page: state.pagination.page,
            total_pages: state.total_pages(),
            results: state.results,
        }
    }
}

async fn load_page<S>(store: &wareflow_client::ListStore<S>, filter: S::Filter, args: &ListArgs) -> Result<()>
where
    S: wareflow_client::ListSource,
    S::Item: Serialize,
{
    let mut loaded = store.set_filters(filter).await;
    if args.page > 1 {
        loaded = store.go_to_page(args.page).await;
    }
    let state = store.snapshot();
    if loaded.is_none() {
        if let Some(error) = state.error {
            bail!(error);
        }
    }
    print(&Listing::from(state))
}

/// Operators may not cancel; only enforced when someone is signed in.
fn ensure_can_cancel(container: &Container, cancelling: bool) -> Result<()> {
    if cancelling && container.auth.user().is_some() && !container.auth.can_cancel() {
        bail!("only supervisors and admins can cancel");
    }
    Ok(())
}

fn outcome<T>(value: Option<T>, error: Option<String>) -> Result<T> {
    value.ok_or_else(|| anyhow!(error.unwrap_or_else(|| "operation failed".to_string())))
}

fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Use cases: one struct per operation, each forwarding to a repository.
//!
//! Stores depend on use cases rather than repositories, so a feature's
//! data source can be swapped in the container without touching its store.

use std::sync::Arc;

use async_trait::async_trait;

use wareflow_auth::{Credentials, Session, UserProfile};
use wareflow_core::{Page, PageRequest};
use wareflow_inventory::{
    InventoryFilter, InventoryLineId, InventoryRecord, InventoryRecordId, InventoryStatus,
    NewInventoryRecord,
};
use wareflow_picking::{
    NewPickingOrder, PickItemId, PickingFilter, PickingOrder, PickingOrderId,
    PickingOrderProcessItem, PickingStatus,
};
use wareflow_stock_in::{NewStockIn, StockIn, StockInFilter, StockInId, StockInLineId, StockInStatus};
use wareflow_stock_out::{NewStockOut, StockOut, StockOutFilter, StockOutId, StockOutStatus};

use crate::error::ClientResult;
use crate::repository::{
    AuthRepository, InventoryRepository, PickingRepository, StockInRepository, StockOutRepository,
};
use crate::store::ListSource;

macro_rules! use_case {
    ($(#[$meta:meta])* $name:ident => $repo:ident::$method:ident($($arg:ident: $ty:ty),*) -> $out:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            repo: Arc<dyn $repo>,
        }

        impl $name {
            pub fn new(repo: Arc<dyn $repo>) -> Self {
                Self { repo }
            }

            pub async fn execute(&self, $($arg: $ty),*) -> ClientResult<$out> {
                self.repo.$method($($arg),*).await
            }
        }
    };
}

/// Lets a list use case feed a [`crate::store::ListStore`].
macro_rules! list_source {
    ($name:ident, $item:ty, $filter:ty) => {
        #[async_trait]
        impl ListSource for $name {
            type Item = $item;
            type Filter = $filter;

            async fn fetch(&self, filter: &$filter, page: PageRequest) -> ClientResult<Page<$item>> {
                self.execute(filter, page).await
            }
        }
    };
}

// Inventory

use_case!(ListInventory => InventoryRepository::list(filter: &InventoryFilter, page: PageRequest) -> Page<InventoryRecord>);
use_case!(GetInventory => InventoryRepository::get(id: InventoryRecordId) -> InventoryRecord);
use_case!(CreateInventory => InventoryRepository::create(input: &NewInventoryRecord) -> InventoryRecord);
use_case!(UpdateInventoryStatus => InventoryRepository::update_status(id: InventoryRecordId, status: InventoryStatus) -> InventoryRecord);
use_case!(RecordInventoryCount => InventoryRepository::record_count(id: InventoryRecordId, line: InventoryLineId, counted: i64) -> InventoryRecord);
use_case!(DeleteInventory => InventoryRepository::delete(id: InventoryRecordId) -> ());
list_source!(ListInventory, InventoryRecord, InventoryFilter);

#[derive(Clone)]
pub struct InventoryUseCases {
    pub list: ListInventory,
    pub get: GetInventory,
    pub create: CreateInventory,
    pub update_status: UpdateInventoryStatus,
    pub record_count: RecordInventoryCount,
    pub delete: DeleteInventory,
}

impl InventoryUseCases {
    pub fn new(repo: Arc<dyn InventoryRepository>) -> Self {
        Self {
            list: ListInventory::new(repo.clone()),
            get: GetInventory::new(repo.clone()),
            create: CreateInventory::new(repo.clone()),
            update_status: UpdateInventoryStatus::new(repo.clone()),
            record_count: RecordInventoryCount::new(repo.clone()),
            delete: DeleteInventory::new(repo),
        }
    }
}

// Picking

use_case!(ListPickingOrders => PickingRepository::list(filter: &PickingFilter, page: PageRequest) -> Page<PickingOrder>);
use_case!(GetPickingOrder => PickingRepository::get(id: PickingOrderId) -> PickingOrder);
use_case!(CreatePickingOrder => PickingRepository::create(input: &NewPickingOrder) -> PickingOrder);
use_case!(UpdatePickingStatus => PickingRepository::update_status(id: PickingOrderId, status: PickingStatus) -> PickingOrder);
use_case!(GetPickingItems => PickingRepository::items(id: PickingOrderId) -> Vec<PickingOrderProcessItem>);
use_case!(RecordPick => PickingRepository::record_pick(id: PickingOrderId, item: PickItemId, picked: i64) -> PickingOrderProcessItem);
use_case!(DeletePickingOrder => PickingRepository::delete(id: PickingOrderId) -> ());
list_source!(ListPickingOrders, PickingOrder, PickingFilter);

#[derive(Clone)]
pub struct PickingUseCases {
    pub list: ListPickingOrders,
    pub get: GetPickingOrder,
    pub create: CreatePickingOrder,
    pub update_status: UpdatePickingStatus,
    pub items: GetPickingItems,
    pub record_pick: RecordPick,
    pub delete: DeletePickingOrder,
}

impl PickingUseCases {
    pub fn new(repo: Arc<dyn PickingRepository>) -> Self {
        Self {
            list: ListPickingOrders::new(repo.clone()),
            get: GetPickingOrder::new(repo.clone()),
            create: CreatePickingOrder::new(repo.clone()),
            update_status: UpdatePickingStatus::new(repo.clone()),
            items: GetPickingItems::new(repo.clone()),
            record_pick: RecordPick::new(repo.clone()),
            delete: DeletePickingOrder::new(repo),
        }
    }
}

// Stock in

use_case!(ListStockIns => StockInRepository::list(filter: &StockInFilter, page: PageRequest) -> Page<StockIn>);
use_case!(GetStockIn => StockInRepository::get(id: StockInId) -> StockIn);
use_case!(CreateStockIn => StockInRepository::create(input: &NewStockIn) -> StockIn);
use_case!(UpdateStockInStatus => StockInRepository::update_status(id: StockInId, status: StockInStatus) -> StockIn);
use_case!(ReceiveStockInLine => StockInRepository::receive_line(id: StockInId, line: StockInLineId, received: i64) -> StockIn);
use_case!(DeleteStockIn => StockInRepository::delete(id: StockInId) -> ());
list_source!(ListStockIns, StockIn, StockInFilter);

#[derive(Clone)]
pub struct StockInUseCases {
    pub list: ListStockIns,
    pub get: GetStockIn,
    pub create: CreateStockIn,
    pub update_status: UpdateStockInStatus,
    pub receive_line: ReceiveStockInLine,
    pub delete: DeleteStockIn,
}

impl StockInUseCases {
    pub fn new(repo: Arc<dyn StockInRepository>) -> Self {
        Self {
            list: ListStockIns::new(repo.clone()),
            get: GetStockIn::new(repo.clone()),
            create: CreateStockIn::new(repo.clone()),
            update_status: UpdateStockInStatus::new(repo.clone()),
            receive_line: ReceiveStockInLine::new(repo.clone()),
            delete: DeleteStockIn::new(repo),
        }
    }
}

// Stock out

use_case!(ListStockOuts => StockOutRepository::list(filter: &StockOutFilter, page: PageRequest) -> Page<StockOut>);
use_case!(GetStockOut => StockOutRepository::get(id: StockOutId) -> StockOut);
use_case!(CreateStockOut => StockOutRepository::create(input: &NewStockOut) -> StockOut);
use_case!(UpdateStockOutStatus => StockOutRepository::update_status(id: StockOutId, status: StockOutStatus) -> StockOut);
use_case!(DeleteStockOut => StockOutRepository::delete(id: StockOutId) -> ());
list_source!(ListStockOuts, StockOut, StockOutFilter);

#[derive(Clone)]
pub struct StockOutUseCases {
    pub list: ListStockOuts,
    pub get: GetStockOut,
    pub create: CreateStockOut,
    pub update_status: UpdateStockOutStatus,
    pub delete: DeleteStockOut,
}

impl StockOutUseCases {
    pub fn new(repo: Arc<dyn StockOutRepository>) -> Self {
        Self {
            list: ListStockOuts::new(repo.clone()),
            get: GetStockOut::new(repo.clone()),
            create: CreateStockOut::new(repo.clone()),
            update_status: UpdateStockOutStatus::new(repo.clone()),
            delete: DeleteStockOut::new(repo),
        }
    }
}

// Auth

use_case!(Login => AuthRepository::login(credentials: &Credentials) -> Session);
use_case!(Logout => AuthRepository::logout() -> ());
use_case!(CurrentUser => AuthRepository::me() -> UserProfile);

#[derive(Clone)]
pub struct AuthUseCases {
    pub login: Login,
    pub logout: Logout,
    pub current_user: CurrentUser,
}

impl AuthUseCases {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self {
            login: Login::new(repo.clone()),
            logout: Logout::new(repo.clone()),
            current_user: CurrentUser::new(repo),
        }
    }
}

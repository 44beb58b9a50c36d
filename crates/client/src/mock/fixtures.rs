//! Deterministic demo data.
//!
//! Ids are derived from fixed numbers and timestamps from a fixed base, so
//! two runs (and two tests) see the same rows.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use wareflow_auth::{Role, UserProfile};
use wareflow_core::{EntityId, Lifecycle, StorageLocation, UserId};
use wareflow_inventory::{InventoryLine, InventoryLineId, InventoryRecord, InventoryRecordId, InventoryStatus};
use wareflow_picking::{
    PickItemId, PickingOrder, PickingOrderId, PickingOrderLine, PickingOrderProcessItem,
    PickingPriority, PickingStatus,
};
use wareflow_stock_in::{StockIn, StockInId, StockInLine, StockInLineId, StockInStatus};
use wareflow_stock_out::{StockOut, StockOutId, StockOutLine, StockOutLineId, StockOutStatus};

pub const INVENTORY_FIXTURES: usize = 12;
pub const PICKING_FIXTURES: usize = 24;
pub const STOCK_IN_FIXTURES: usize = 15;
pub const STOCK_OUT_FIXTURES: usize = 15;

pub const WAREHOUSES: [&str; 3] = ["WH1", "WH2", "WH3"];

const PRODUCTS: [(&str, &str); 8] = [
    ("SKU-1001", "Hex bolt M8"),
    ("SKU-1002", "Hex nut M8"),
    ("SKU-1003", "Washer 8mm"),
    ("SKU-2001", "Cable tie 200mm"),
    ("SKU-2002", "Pallet wrap"),
    ("SKU-3001", "Label roll"),
    ("SKU-3002", "Packing tape"),
    ("SKU-4001", "Carton 40x30x20"),
];

const CUSTOMERS: [&str; 4] = ["Northwind", "Contoso", "Fabrikam", "Tailspin"];
const SUPPLIERS: [&str; 4] = ["Globex", "Initech", "Umbrella Supply", "Stark Parts"];
const OPERATORS: [&str; 2] = ["alice", "bob"];

// High 64 bits of fixture UUIDs, one namespace per kind.
const NS_INVENTORY: u128 = 0x01;
const NS_INVENTORY_LINE: u128 = 0x02;
const NS_PICKING: u128 = 0x03;
const NS_PICK_ITEM: u128 = 0x04;
const NS_STOCK_IN: u128 = 0x05;
const NS_STOCK_IN_LINE: u128 = 0x06;
const NS_STOCK_OUT: u128 = 0x07;
const NS_STOCK_OUT_LINE: u128 = 0x08;
const NS_USER: u128 = 0x09;

fn fixed_id(namespace: u128, n: usize) -> EntityId {
    EntityId::from_uuid(Uuid::from_u128((namespace << 64) | n as u128))
}

/// 2024-01-01T08:00:00Z; fixture `i` is created `i` hours later.
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_096_000, 0).unwrap_or_default()
}

fn created(i: usize) -> DateTime<Utc> {
    base_time() + Duration::hours(i as i64)
}

fn product(n: usize) -> (&'static str, &'static str) {
    PRODUCTS[n % PRODUCTS.len()]
}

/// Storage slot number `n` in `warehouse`. Consecutive pairs of `n` share a
/// slot when callers pass `n / 2`.
pub fn slot(warehouse: &str, n: usize) -> StorageLocation {
    StorageLocation::new(
        warehouse,
        ["A", "B", "C"][n % 3],
        format!("{:02}", n % 5 + 1),
        (n % 4 + 1).to_string(),
        (n % 3 + 1).to_string(),
        "1",
    )
}

/// Short location code used on inventory and stock-out lines (`A-01-2`).
pub fn location_code(n: usize) -> String {
    let loc = slot("", n);
    format!("{}-{}-{}", loc.area, loc.row, loc.shelf)
}

pub fn demo_user() -> UserProfile {
    UserProfile {
        id: UserId::from_uuid(Uuid::from_u128((NS_USER << 64) | 1)),
        username: "demo".into(),
        display_name: "Demo Supervisor".into(),
        role: Role::Supervisor,
        warehouses: vec![WAREHOUSES[0].into(), WAREHOUSES[1].into()],
    }
}

pub fn inventory_records(n: usize) -> Vec<InventoryRecord> {
    (0..n)
        .map(|i| {
            let status = InventoryStatus::ALL[i % InventoryStatus::ALL.len()];
            let line_count = i % 3 + 2;
            let lines = (0..line_count)
                .map(|j| {
                    let (code, name) = product(i + j);
                    let expected = ((i * 7 + j * 5) % 40 + 1) as i64;
                    let counted = match status {
                        InventoryStatus::Completed => Some(if j == 0 { expected - 1 } else { expected }),
                        InventoryStatus::InProgress if j % 2 == 0 => Some(expected),
                        _ => None,
                    };
                    InventoryLine {
                        id: InventoryLineId::new(fixed_id(NS_INVENTORY_LINE, i * 16 + j)),
                        product_code: code.into(),
                        product_name: name.into(),
                        location_code: location_code(i + j),
                        expected_quantity: expected,
                        counted_quantity: counted,
                    }
                })
                .collect();

            InventoryRecord {
                id: InventoryRecordId::new(fixed_id(NS_INVENTORY, i)),
                code: format!("INV-{:06}", i + 1),
                warehouse: WAREHOUSES[i % WAREHOUSES.len()].into(),
                status,
                counted_by: (status != InventoryStatus::Draft).then(|| OPERATORS[i % 2].to_string()),
                note: (i % 4 == 0).then(|| "cycle count".to_string()),
                lines,
                created_at: created(i),
                updated_at: created(i) + Duration::minutes(30),
            }
        })
        .collect()
}

/// Process items for `order`, one per line, with ids from `item_id`.
///
/// Line pairs share a slot so that grouping has something to merge.
pub fn process_items(
    order: &PickingOrder,
    seed: usize,
    mut item_id: impl FnMut(usize) -> PickItemId,
) -> Vec<PickingOrderProcessItem> {
    order
        .lines
        .iter()
        .enumerate()
        .map(|(j, line)| {
            let picked = match order.status {
                PickingStatus::Completed => line.quantity,
                PickingStatus::InProgress if j % 2 == 0 => line.quantity,
                _ => 0,
            };
            PickingOrderProcessItem {
                id: item_id(j),
                order_id: order.id,
                product_code: line.product_code.clone(),
                product_name: line.product_name.clone(),
                location: slot(&order.warehouse, seed + j / 2),
                requested_quantity: line.quantity,
                picked_quantity: picked,
            }
        })
        .collect()
}

/// Orders with their process items.
pub fn picking_orders(n: usize) -> Vec<(PickingOrder, Vec<PickingOrderProcessItem>)> {
    (0..n)
        .map(|i| {
            let status = PickingStatus::ALL[i % PickingStatus::ALL.len()];
            let lines = (0..i % 4 + 2)
                .map(|j| {
                    let (code, name) = product(i * 3 + j);
                    PickingOrderLine {
                        line_no: j as u32 + 1,
                        product_code: code.into(),
                        product_name: name.into(),
                        quantity: ((i + j * 3) % 9 + 1) as i64,
                    }
                })
                .collect();

            let order = PickingOrder {
                id: PickingOrderId::new(fixed_id(NS_PICKING, i)),
                order_no: format!("PO-{:06}", i + 1),
                customer: CUSTOMERS[i % CUSTOMERS.len()].into(),
                warehouse: WAREHOUSES[i % WAREHOUSES.len()].into(),
                priority: PickingPriority::ALL[i % PickingPriority::ALL.len()],
                status,
                assignee: (status != PickingStatus::Pending).then(|| OPERATORS[i % 2].to_string()),
                due_at: (i % 3 != 0).then(|| created(i) + Duration::days(1)),
                lines,
                created_at: created(i),
                updated_at: created(i),
            };
            let items = process_items(&order, i, |j| PickItemId::new(fixed_id(NS_PICK_ITEM, i * 16 + j)));
            (order, items)
        })
        .collect()
}

pub fn stock_ins(n: usize) -> Vec<StockIn> {
    (0..n)
        .map(|i| {
            let status = StockInStatus::ALL[i % StockInStatus::ALL.len()];
            let lines = (0..i % 3 + 1)
                .map(|j| {
                    let (code, name) = product(i + j * 2);
                    let expected = ((i * 5 + j * 11) % 50 + 5) as i64;
                    let received = match status {
                        StockInStatus::Completed => expected,
                        StockInStatus::Receiving if j == 0 => expected,
                        _ => 0,
                    };
                    StockInLine {
                        id: StockInLineId::new(fixed_id(NS_STOCK_IN_LINE, i * 16 + j)),
                        product_code: code.into(),
                        product_name: name.into(),
                        expected_quantity: expected,
                        received_quantity: received,
                    }
                })
                .collect();

            StockIn {
                id: StockInId::new(fixed_id(NS_STOCK_IN, i)),
                reference_no: format!("GRN-{:06}", i + 1),
                supplier: SUPPLIERS[i % SUPPLIERS.len()].into(),
                warehouse: WAREHOUSES[i % WAREHOUSES.len()].into(),
                status,
                note: None,
                lines,
                created_at: created(i),
                updated_at: created(i),
            }
        })
        .collect()
}

pub fn stock_outs(n: usize) -> Vec<StockOut> {
    (0..n)
        .map(|i| {
            let status = StockOutStatus::ALL[i % StockOutStatus::ALL.len()];
            let lines = (0..i % 3 + 1)
                .map(|j| {
                    let (code, name) = product(i * 2 + j);
                    StockOutLine {
                        id: StockOutLineId::new(fixed_id(NS_STOCK_OUT_LINE, i * 16 + j)),
                        product_code: code.into(),
                        product_name: name.into(),
                        location_code: location_code(i + j),
                        quantity: ((i + j) % 12 + 1) as i64,
                    }
                })
                .collect();

            StockOut {
                id: StockOutId::new(fixed_id(NS_STOCK_OUT, i)),
                reference_no: format!("DN-{:06}", i + 1),
                destination: CUSTOMERS[(i + 1) % CUSTOMERS.len()].into(),
                warehouse: WAREHOUSES[i % WAREHOUSES.len()].into(),
                status,
                note: (status == StockOutStatus::Cancelled).then(|| "customer cancelled".to_string()),
                lines,
                created_at: created(i),
                updated_at: created(i),
            }
        })
        .collect()
}

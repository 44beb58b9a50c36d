use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{DomainError, StorageLocation};
use wareflow_picking::{PickingOrder, PickingOrderLine, PickingOrderProcessItem};

use super::non_negative;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingOrderDto {
    pub id: String,
    pub order_no: String,
    pub customer: String,
    pub warehouse: String,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lines: Vec<PickingOrderLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Process item as served by `GET /api/picking-orders/{id}/items`; the
/// storage location comes flattened into the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessItemDto {
    pub id: String,
    pub order_id: String,
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub warehouse: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub row: String,
    #[serde(default)]
    pub shelf: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub position: String,
    pub requested_quantity: i64,
    #[serde(default)]
    pub picked_quantity: i64,
}

/// Body of `PATCH /api/picking-orders/{id}/items/{item}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickUpdate {
    pub picked_quantity: i64,
}

impl TryFrom<PickingOrderDto> for PickingOrder {
    type Error = DomainError;

    fn try_from(dto: PickingOrderDto) -> Result<Self, Self::Error> {
        for line in &dto.lines {
            non_negative("quantity", line.quantity)?;
        }
        Ok(Self {
            id: dto.id.parse()?,
            order_no: dto.order_no,
            customer: dto.customer,
            warehouse: dto.warehouse,
            priority: dto.priority.parse()?,
            status: dto.status.parse()?,
            assignee: dto.assignee.filter(|a| !a.trim().is_empty()),
            due_at: dto.due_at,
            lines: dto.lines,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl TryFrom<ProcessItemDto> for PickingOrderProcessItem {
    type Error = DomainError;

    fn try_from(dto: ProcessItemDto) -> Result<Self, Self::Error> {
        let requested = non_negative("requested_quantity", dto.requested_quantity)?;
        let picked = non_negative("picked_quantity", dto.picked_quantity)?;
        if picked > requested {
            return Err(DomainError::validation(format!(
                "picked quantity {picked} exceeds requested {requested}"
            )));
        }
        Ok(Self {
            id: dto.id.parse()?,
            order_id: dto.order_id.parse()?,
            product_code: dto.product_code,
            product_name: dto.product_name,
            location: StorageLocation::new(
                dto.warehouse,
                dto.area,
                dto.row,
                dto.shelf,
                dto.level,
                dto.position,
            ),
            requested_quantity: requested,
            picked_quantity: picked,
        })
    }
}

impl From<&PickingOrder> for PickingOrderDto {
    fn from(order: &PickingOrder) -> Self {
        Self {
            id: order.id.to_string(),
            order_no: order.order_no.clone(),
            customer: order.customer.clone(),
            warehouse: order.warehouse.clone(),
            priority: order.priority.to_string(),
            status: order.status.to_string(),
            assignee: order.assignee.clone(),
            due_at: order.due_at,
            lines: order.lines.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<&PickingOrderProcessItem> for ProcessItemDto {
    fn from(item: &PickingOrderProcessItem) -> Self {
        let loc = &item.location;
        Self {
            id: item.id.to_string(),
            order_id: item.order_id.to_string(),
            product_code: item.product_code.clone(),
            product_name: item.product_name.clone(),
            warehouse: loc.warehouse.clone(),
            area: loc.area.clone(),
            row: loc.row.clone(),
            shelf: loc.shelf.clone(),
            level: loc.level.clone(),
            position: loc.position.clone(),
            requested_quantity: item.requested_quantity,
            picked_quantity: item.picked_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wareflow_picking::{PickingPriority, PickingStatus};

    #[test]
    fn order_priority_and_status_are_parsed() {
        let dto: PickingOrderDto = serde_json::from_value(json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "order_no": "PO-000001",
            "customer": "Acme",
            "warehouse": "WH1",
            "priority": "urgent",
            "status": "in_progress",
            "assignee": "",
            "lines": [{"line_no": 1, "product_code": "P1", "product_name": "Bolt", "quantity": 4}],
            "created_at": "2024-05-01T08:00:00Z",
            "updated_at": "2024-05-01T08:00:00Z"
        }))
        .unwrap();

        let order = PickingOrder::try_from(dto).unwrap();
        assert_eq!(order.priority, PickingPriority::Urgent);
        assert_eq!(order.status, PickingStatus::InProgress);
        assert_eq!(order.assignee, None);
        assert_eq!(order.total_quantity(), 4);
    }

    #[test]
    fn item_location_is_unflattened() {
        let dto: ProcessItemDto = serde_json::from_value(json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8059",
            "order_id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "product_code": "P1",
            "warehouse": "WH1",
            "area": "A",
            "row": "03",
            "shelf": "2",
            "level": "1",
            "position": "4",
            "requested_quantity": 5,
            "picked_quantity": 2
        }))
        .unwrap();

        let item = PickingOrderProcessItem::try_from(dto.clone()).unwrap();
        assert_eq!(item.location.key(), "WH1-A-03-2-1-4");
        assert_eq!(item.remaining(), 3);
        assert_eq!(ProcessItemDto::from(&item), dto);
    }

    #[test]
    fn over_picked_item_is_rejected() {
        let dto = ProcessItemDto {
            id: "01890a5d-ac96-774b-bcce-b302099a8059".into(),
            order_id: "01890a5d-ac96-774b-bcce-b302099a8057".into(),
            product_code: "P1".into(),
            product_name: String::new(),
            warehouse: "WH1".into(),
            area: "A".into(),
            row: "01".into(),
            shelf: "1".into(),
            level: "1".into(),
            position: "1".into(),
            requested_quantity: 1,
            picked_quantity: 2,
        };
        assert!(PickingOrderProcessItem::try_from(dto).is_err());
    }
}

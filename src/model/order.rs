//! The order record: the single document type kept in the ledger.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator written into every order document.
pub const DOC_TYPE: &str = "order";

fn default_doc_type() -> String {
    DOC_TYPE.to_string()
}

/// A stored record as a plain JSON object. Updates edit this form so keys
/// outside [`Order`]'s schema survive a rewrite.
pub type Document = Map<String, Value>;

/// Extra identifiers carried by products-ledger records. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecondaryIdentifiers {
    #[serde(rename = "SVC_UN_NO", default, skip_serializing_if = "Option::is_none")]
    pub service_unit_number: Option<String>,
    #[serde(rename = "SO_NO", default, skip_serializing_if = "Option::is_none")]
    pub sales_order_number: Option<String>,
    #[serde(rename = "SVC_PRT_NO", default, skip_serializing_if = "Option::is_none")]
    pub service_part_number: Option<String>,
}

impl SecondaryIdentifiers {
    pub fn new(
        service_unit_number: impl Into<String>,
        sales_order_number: impl Into<String>,
        service_part_number: impl Into<String>,
    ) -> Self {
        Self {
            service_unit_number: Some(service_unit_number.into()),
            sales_order_number: Some(sales_order_number.into()),
            service_part_number: Some(service_part_number.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.service_unit_number.is_none()
            && self.sales_order_number.is_none()
            && self.service_part_number.is_none()
    }
}

/// A tracked replacement part moving through the supply chain.
///
/// Stored as one JSON document per order, keyed by `ID`. The JSON key names
/// are part of the ledger's persisted format and must not change. Missing
/// scalar keys decode as empty strings; unknown keys are kept in `extra`.
///
/// # Variants
/// - Orders ledger: `ChainOfCustody` is the event log; `Events` and the secondary
///   identifiers are absent.
/// - Products ledger: `Events` holds status narratives and `ChainOfCustody`
///   holds custodian names; the last custodian is the current holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(flatten)]
    pub secondary: SecondaryIdentifiers,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "PartName", default)]
    pub part_name: String,
    #[serde(rename = "Events", default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(rename = "ChainOfCustody", default)]
    pub chain_of_custody: Vec<String>,
    #[serde(rename = "TimeStampPartOrdered", default)]
    pub time_stamp_part_ordered: String,
    #[serde(rename = "EstimatedDeliveryDate", default)]
    pub estimated_delivery_date: String,
    #[serde(rename = "Source", default)]
    pub source: String,
    #[serde(rename = "AdditionalComments", default)]
    pub additional_comments: String,
    #[serde(rename = "TrackID", default)]
    pub track_id: String,
    // No operation mutates the contact fields.
    #[serde(rename = "ContactCustodian", default, skip_serializing_if = "Option::is_none")]
    pub contact_custodian: Option<String>,
    #[serde(rename = "ContactVendor", default, skip_serializing_if = "Option::is_none")]
    pub contact_vendor: Option<String>,
    #[serde(rename = "docType", default = "default_doc_type")]
    pub doc_type: String,
    // Must stay after `secondary`: flattened fields are filled in declaration order.
    #[serde(flatten)]
    pub extra: Document,
}

impl Order {
    /// Last entry of the custody chain.
    pub fn current_custodian(&self) -> Option<&str> {
        self.chain_of_custody.last().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// A scalar field that has a dedicated update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutableField {
    Status,
    EstimatedDeliveryDate,
    Source,
    AdditionalComments,
    TrackId,
}

impl MutableField {
    pub fn key(self) -> &'static str {
        match self {
            MutableField::Status => "Status",
            MutableField::EstimatedDeliveryDate => "EstimatedDeliveryDate",
            MutableField::Source => "Source",
            MutableField::AdditionalComments => "AdditionalComments",
            MutableField::TrackId => "TrackID",
        }
    }

    /// Overwrites this field in `document`, leaving every other key untouched.
    pub fn apply(self, document: &mut Document, value: String) {
        document.insert(self.key().to_string(), Value::String(value));
    }
}

/// One of the append-only log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderLog {
    ChainOfCustody,
    Events,
}

impl OrderLog {
    pub fn key(self) -> &'static str {
        match self {
            OrderLog::ChainOfCustody => "ChainOfCustody",
            OrderLog::Events => "Events",
        }
    }

    pub fn entries<'a>(&self, order: &'a Order) -> &'a [String] {
        match self {
            OrderLog::ChainOfCustody => &order.chain_of_custody,
            OrderLog::Events => order.events.as_deref().unwrap_or_default(),
        }
    }

    /// Appends `entry` at the end of the log in `document`, creating the log if
    /// it is absent or null. Never reorders or deduplicates.
    ///
    /// Returns the new length, or `None` if the key holds something other than a list.
    pub fn append(&self, document: &mut Document, entry: String) -> Option<usize> {
        let log = document
            .entry(self.key())
            .or_insert_with(|| Value::Array(Vec::new()));
        if log.is_null() {
            *log = Value::Array(Vec::new());
        }
        let entries = log.as_array_mut()?;
        entries.push(Value::String(entry));
        Some(entries.len())
    }
}

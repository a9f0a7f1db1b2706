//! Demonstration records written by `InitializeDefaultOrders`.

pub(crate) struct DefaultOrder {
    pub id: &'static str,
    pub part_name: &'static str,
    /// Service unit, sales-order and service-part numbers (products ledger).
    pub secondary: [&'static str; 3],
    /// Custody chain for the products ledger. Empty means "initial custodian".
    pub custody: &'static [&'static str],
}

pub(crate) const DEFAULT_ORDERS: [DefaultOrder; 3] = [
    DefaultOrder {
        id: "123456",
        part_name: "Compressor",
        secondary: ["654321", "656565", "666666"],
        custody: &["Vendor X", "UPS"],
    },
    DefaultOrder {
        id: "123457",
        part_name: "Washing Drum LG",
        secondary: ["754321", "575757", "777777"],
        custody: &[],
    },
    DefaultOrder {
        id: "123458",
        part_name: "Fridge Door",
        secondary: ["854321", "85858585", "8888888"],
        custody: &[],
    },
];

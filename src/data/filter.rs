use super::model::{NumericField, StudentRecord};

// ---------------------------------------------------------------------------
// Sort view state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Arrow shown next to the active column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "⏶",
            SortOrder::Descending => "⏷",
        }
    }
}

/// Table sort selection, owned by the UI.
/// `column == None` means "input order".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<NumericField>,
    pub order: SortOrder,
}

impl SortState {
    /// Header click: select `column` and flip the direction.
    ///
    /// The direction flips even when switching to a different column, so the
    /// very first click on a fresh state sorts descending.
    pub fn click(&mut self, column: NumericField) {
        self.column = Some(column);
        self.order = self.order.toggled();
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Records whose name contains `query`, ignoring case.
///
/// An empty query keeps every record. Input order is preserved.
pub fn filter_by_name<'a>(records: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|rec| rec.name.to_lowercase().contains(&needle))
        .collect()
}

/// Return a copy of `records` ordered by `column`.
///
/// Equal keys keep their relative input order in both directions. Without a
/// column the input order is returned unchanged.
pub fn sort_records<'a>(
    records: &[&'a StudentRecord],
    column: Option<NumericField>,
    order: SortOrder,
) -> Vec<&'a StudentRecord> {
    let mut sorted = records.to_vec();
    let Some(column) = column else {
        return sorted;
    };
    sorted.sort_by(|a, b| {
        let (a, b) = (column.value(a), column.value(b));
        match order {
            SortOrder::Ascending => a.total_cmp(&b),
            SortOrder::Descending => b.total_cmp(&a),
        }
    });
    sorted
}

/// Filter by name, then sort: the table's visible rows.
pub fn table_view<'a>(
    records: &'a [StudentRecord],
    query: &str,
    sort: SortState,
) -> Vec<&'a StudentRecord> {
    let filtered = filter_by_name(records, query);
    sort_records(&filtered, sort.column, sort.order)
}

//! View models mirroring the JSON returned by the finance API.
//!
//! Everything here is owned by the API; the app only ever reads these
//! records and sends [TransactionRequest]s back.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The API sends `null` as often as it omits a field; both mean "empty".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deletable: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_payment_modes: Vec<PaymentMode>,
}

impl Account {
    pub fn payment_mode(&self, id: &str) -> Option<&PaymentMode> {
        self.linked_payment_modes.iter().find(|mode| mode.id == id)
    }

    /// First letter of the name, used as an avatar.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub person_name: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_detail: String,
    #[serde(rename = "type")]
    pub kind: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub txn_date: String,
    pub txn_time: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub from_account: Option<Account>,
    #[serde(default)]
    pub to_account: Option<Account>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub from_payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub to_payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub debt: Option<Debt>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Transaction {
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.clone()).collect()
    }
}

/// Body of `POST /transactions` and `PUT /transactions/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub kind: i32,
    pub txn_date: String,
    pub txn_time: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_mode_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_payment_mode_id: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_income: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_expense: Decimal,
}

impl TransactionSummary {
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_amount: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_credit: Decimal,
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_elements: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(0, 0)
    }
}

impl<T> Page<T> {
    pub fn empty(number: u32, size: u32) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size,
            number,
            first: true,
            last: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTransactions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_income: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_expense: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Page<Transaction>,
}

impl DayTransactions {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            transactions: Page::empty(page, size),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MonthSummaryItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub expense: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub income: Decimal,
    pub day: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MonthSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<MonthSummaryItem>,
}

impl MonthSummary {
    pub fn day(&self, day: u32) -> Option<&MonthSummaryItem> {
        self.data.iter().find(|item| item.day == day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduledKind {
    Expense,
    Income,
    Transfer,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Upcoming,
    Completed,
    Paused,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTransaction {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: ScheduledKind,
    pub status: ScheduleStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequency_type: i32,
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default)]
    pub remainder_days: Option<u32>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub from_account: Option<Account>,
    #[serde(default)]
    pub to_account: Option<Account>,
}

impl ScheduledTransaction {
    /// Whether the pause action applies; anything else offers resume.
    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Upcoming
    }

    /// "Checking" or "Checking → Savings" for transfers.
    pub fn account_label(&self) -> Option<String> {
        let source = self.account.as_ref().or(self.from_account.as_ref())?;
        match (&self.kind, &self.to_account) {
            (ScheduledKind::Transfer, Some(to)) => Some(format!("{} → {}", source.name, to.name)),
            _ => Some(source.name.clone()),
        }
    }
}

/// Date range accepted by `GET /transactions/summary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SummaryRange {
    AllTime,
    Month,
    Year,
}

impl SummaryRange {
    pub const ALL: [SummaryRange; 3] = [SummaryRange::AllTime, SummaryRange::Month, SummaryRange::Year];

    pub fn code(self) -> u8 {
        match self {
            SummaryRange::AllTime => 1,
            SummaryRange::Month => 2,
            SummaryRange::Year => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryRange::AllTime => "All Time",
            SummaryRange::Month => "Month",
            SummaryRange::Year => "Year",
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{DayTransactions, ScheduleStatus, ScheduledKind, ScheduledTransaction, Transaction};

    #[test]
    fn decodes_transfer_transaction() {
        let value = json!({
            "id": "t1",
            "txnDate": "2024-01-31",
            "txnTime": "09:15:00",
            "amount": 120.5,
            "type": 3,
            "description": "Move to savings",
            "fromAccount": { "id": "a1", "name": "Checking", "type": 1, "default": true },
            "toAccount": { "id": "a2", "name": "Savings", "type": 1, "default": false },
            "paymentMode": null,
            "tags": [{ "id": "g1", "name": "needs" }]
        });

        let transaction: Transaction = serde_json::from_value(value).unwrap();

        assert_eq!(transaction.kind, 3);
        assert_eq!(transaction.amount, Decimal::new(1205, 1));
        assert!(transaction.account.is_none());
        assert_eq!(transaction.from_account.as_ref().unwrap().name, "Checking");
        assert_eq!(transaction.to_account.as_ref().unwrap().name, "Savings");
        assert_eq!(transaction.tag_names(), vec!["needs".to_string()]);
    }

    #[test]
    fn unknown_schedule_strings_are_tolerated() {
        let value = json!({
            "id": "s1",
            "description": "Rent",
            "amount": 900,
            "type": "LOAN",
            "status": "ARCHIVED",
            "frequencyType": 3,
            "startDate": "2024-02-01",
            "time": "08:00"
        });

        let scheduled: ScheduledTransaction = serde_json::from_value(value).unwrap();

        assert_eq!(scheduled.kind, ScheduledKind::Unknown);
        assert_eq!(scheduled.status, ScheduleStatus::Unknown);
        assert!(!scheduled.is_active());
    }

    #[test]
    fn empty_day_keeps_requested_page() {
        let day = DayTransactions::empty(2, 25);

        assert_eq!(day.transactions.number, 2);
        assert_eq!(day.transactions.size, 25);
        assert!(day.transactions.first && day.transactions.last);
        assert_eq!(day.balance(), Decimal::ZERO);
    }
}

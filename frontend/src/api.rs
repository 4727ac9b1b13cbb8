//! Typed client for the finance REST API.
//!
//! Every response is a `{ "data": ... }` envelope. A missing or malformed
//! `data` field is not an error: it decodes to the type's empty value so
//! pages can render an empty state instead of failing.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use web_sys::RequestCredentials;

use crate::{
    error::ApiError,
    model::{
        Account, AccountSummary, Category, DayTransactions, MonthSummary, ScheduledTransaction,
        SummaryRange, Transaction, TransactionRequest, TransactionSummary,
    },
};

const TOKEN_KEY: &str = "access_token";

#[derive(Clone, Copy, Debug)]
enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn recent_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_data("/transactions/recent").await
    }

    pub async fn transaction_summary(
        &self,
        range: SummaryRange,
    ) -> Result<TransactionSummary, ApiError> {
        self.get_data(&summary_path(range)?).await
    }

    pub async fn transactions_by_date(
        &self,
        date: &str,
        page: u32,
        size: u32,
    ) -> Result<DayTransactions, ApiError> {
        let body = self.get_json(&by_date_path(date, page, size)?).await?;
        Ok(decode_data(body).unwrap_or_else(|| DayTransactions::empty(page, size)))
    }

    /// The monthly summary is returned whole rather than unwrapped, its
    /// `data` is the list of per-day totals.
    pub async fn month_summary(&self, month: u32, year: i32) -> Result<MonthSummary, ApiError> {
        let body = self.get_json(&month_summary_path(month, year)?).await?;
        Ok(serde_json::from_value(body).unwrap_or_default())
    }

    pub async fn transaction(&self, id: &str) -> Result<Option<Transaction>, ApiError> {
        let body = self.get_json(&format!("/transactions/{}", id)).await?;
        Ok(decode_data(body))
    }

    pub async fn create_transaction(&self, request: &TransactionRequest) -> Result<(), ApiError> {
        self.send_json(Verb::Post, "/transactions", request).await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        request: &TransactionRequest,
    ) -> Result<(), ApiError> {
        self.send_json(Verb::Put, &format!("/transactions/{}", id), request)
            .await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.send(Verb::Delete, &format!("/transactions/{}", id)).await
    }

    pub async fn upcoming_scheduled(&self) -> Result<Vec<ScheduledTransaction>, ApiError> {
        self.get_data("/scheduled-transactions/upcoming").await
    }

    pub async fn completed_scheduled(&self) -> Result<Vec<ScheduledTransaction>, ApiError> {
        self.get_data("/scheduled-transactions/completed").await
    }

    /// Pauses an upcoming schedule or resumes a paused one.
    pub async fn toggle_scheduled(&self, id: &str) -> Result<(), ApiError> {
        self.send(Verb::Patch, &format!("/scheduled-transactions/{}/toggle", id))
            .await
    }

    pub async fn delete_scheduled(&self, id: &str) -> Result<(), ApiError> {
        self.send(Verb::Delete, &format!("/scheduled-transactions/{}", id))
            .await
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get_data("/accounts").await
    }

    pub async fn account_summary(&self) -> Result<AccountSummary, ApiError> {
        self.get_data("/accounts/summary").await
    }

    pub async fn default_account(&self) -> Result<Option<Account>, ApiError> {
        let body = self.get_json("/accounts/default").await?;
        Ok(decode_data(body))
    }

    pub async fn categories(&self, kind: i32) -> Result<Vec<Category>, ApiError> {
        self.get_data(&categories_path("/categories", kind)?).await
    }

    pub async fn default_category(&self, kind: i32) -> Result<Option<Category>, ApiError> {
        let body = self
            .get_json(&categories_path("/categories/default", kind)?)
            .await?;
        Ok(decode_data(body))
    }

    async fn get_data<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get_json(path).await?;
        Ok(decode_envelope(body))
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.execute(Verb::Get, path, None::<&()>).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(&self, verb: Verb, path: &str) -> Result<(), ApiError> {
        self.execute(verb, path, None::<&()>).await.map(|_| ())
    }

    async fn send_json<B: Serialize>(&self, verb: Verb, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(verb, path, Some(body)).await.map(|_| ())
    }

    async fn execute<B: Serialize>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!(?verb, %url, "sending request");

        let builder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Patch => Request::patch(&url),
            Verb::Delete => Request::delete(&url),
        };
        let builder = authorize(builder);

        let response = match body {
            Some(body) => builder.json(body)?.send().await?,
            None => builder.send().await?,
        };

        if !response.ok() {
            warn!(?verb, %url, status = response.status(), "request rejected");
            return Err(ApiError::Status(response.status()));
        }

        Ok(response)
    }
}

fn access_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

/// Sends cookies and, when one is stored, the bearer token.
fn authorize(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.credentials(RequestCredentials::Include);
    match access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// The envelope's `data`, or `None` when it is absent or does not match `T`.
pub fn decode_data<T: DeserializeOwned>(body: Value) -> Option<T> {
    let Value::Object(mut envelope) = body else {
        warn!("response is not an envelope object");
        return None;
    };

    let data = envelope.remove("data")?;
    match serde_json::from_value(data) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(%error, "ignoring malformed response data");
            None
        }
    }
}

pub fn decode_envelope<T: DeserializeOwned + Default>(body: Value) -> T {
    decode_data(body).unwrap_or_default()
}

fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    Ok(format!("{}?{}", path, serde_urlencoded::to_string(query)?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryQuery {
    range_code: u8,
}

#[derive(Serialize)]
struct ByDateQuery<'a> {
    date: &'a str,
    page: u32,
    size: u32,
}

#[derive(Serialize)]
struct MonthQuery {
    month: u32,
    year: i32,
}

#[derive(Serialize)]
struct CategoryQuery {
    #[serde(rename = "type")]
    kind: i32,
}

pub fn summary_path(range: SummaryRange) -> Result<String, ApiError> {
    with_query(
        "/transactions/summary",
        &SummaryQuery {
            range_code: range.code(),
        },
    )
}

pub fn by_date_path(date: &str, page: u32, size: u32) -> Result<String, ApiError> {
    with_query("/transactions/by-date", &ByDateQuery { date, page, size })
}

pub fn month_summary_path(month: u32, year: i32) -> Result<String, ApiError> {
    with_query("/summary/monthly", &MonthQuery { month, year })
}

fn categories_path(path: &str, kind: i32) -> Result<String, ApiError> {
    with_query(path, &CategoryQuery { kind })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn summary_query_uses_range_code() {
        assert_eq!(
            summary_path(SummaryRange::Year).unwrap(),
            "/transactions/summary?rangeCode=3"
        );
    }

    #[test]
    fn by_date_query_includes_paging() {
        assert_eq!(
            by_date_path("2024-01-31", 0, 10).unwrap(),
            "/transactions/by-date?date=2024-01-31&page=0&size=10"
        );
    }

    #[test]
    fn month_and_category_queries() {
        assert_eq!(
            month_summary_path(2, 2024).unwrap(),
            "/summary/monthly?month=2&year=2024"
        );
        assert_eq!(
            categories_path("/categories/default", 2).unwrap(),
            "/categories/default?type=2"
        );
    }

    #[test]
    fn client_joins_base_url_without_double_slash() {
        let client = ApiClient::new("http://localhost:8080/api/");

        assert_eq!(
            client.url("/transactions/recent"),
            "http://localhost:8080/api/transactions/recent"
        );
    }

    #[test]
    fn envelope_data_is_unwrapped() {
        let body = json!({ "data": { "totalIncome": 200, "totalExpense": 50.25 } });

        let summary: TransactionSummary = decode_envelope(body);

        assert_eq!(summary.total_income, Decimal::new(200, 0));
        assert_eq!(summary.balance(), Decimal::new(14975, 2));
    }

    #[test]
    fn missing_data_defaults_to_empty() {
        let list: Vec<Transaction> = decode_envelope(json!({ "message": "ok" }));
        let summary: TransactionSummary = decode_envelope(json!({ "data": null }));

        assert!(list.is_empty());
        assert_eq!(summary, TransactionSummary::default());
    }

    #[test]
    fn malformed_data_defaults_to_empty() {
        let list: Vec<Transaction> = decode_envelope(json!({ "data": "oops" }));
        let list_from_array: Vec<Transaction> = decode_envelope(json!([1, 2, 3]));

        assert!(list.is_empty());
        assert!(list_from_array.is_empty());
    }

    #[test]
    fn absent_single_record_is_none() {
        let found: Option<Transaction> = decode_data(json!({ "data": null }));

        assert!(found.is_none());
    }

    #[test]
    fn null_fields_do_not_drop_the_list() {
        let body = json!({ "data": [
            {
                "id": "t1", "txnDate": "2024-01-31", "txnTime": "09:00", "amount": 12, "type": 1,
                "description": "Lunch", "tags": [{ "id": "g1", "name": "food" }]
            },
            {
                "id": "t2", "txnDate": "2024-01-31", "txnTime": "10:00", "amount": 5, "type": 1,
                "description": null, "tags": null,
                "category": { "id": "c1", "name": "Misc", "type": 1, "color": null, "icon": null },
                "debt": { "id": "d1", "personName": "Sam", "type": 1, "additionalDetail": null }
            }
        ] });

        let list: Vec<Transaction> = decode_envelope(body);

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].description, "");
        assert!(list[1].tags.is_empty());
        assert_eq!(list[1].category.as_ref().unwrap().color, "");
    }

    #[test]
    fn account_with_null_payment_modes_is_kept() {
        let body = json!({ "data": [
            { "id": "a1", "name": "Wallet", "type": 2, "default": null, "linkedPaymentModes": null },
            { "id": "a2", "name": "Checking", "type": 1, "linkedPaymentModes": [
                { "id": "p1", "name": "Debit card", "type": 2 }
            ] }
        ] });

        let accounts: Vec<Account> = decode_envelope(body);

        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].linked_payment_modes.is_empty());
        assert!(!accounts[0].default);
        assert!(accounts[1].payment_mode("p1").is_some());
    }

    #[test]
    fn day_totals_survive_a_missing_page() {
        let day: DayTransactions =
            decode_data(json!({ "data": { "totalIncome": 100, "totalExpense": 40 } })).unwrap();
        let nulled: DayTransactions =
            decode_data(json!({ "data": { "totalIncome": 7, "transactions": null } })).unwrap();

        assert_eq!(day.total_income, Decimal::new(100, 0));
        assert_eq!(day.balance(), Decimal::new(60, 0));
        assert!(day.transactions.content.is_empty());
        assert_eq!(day.transactions.total_pages, 0);
        assert_eq!(nulled.total_income, Decimal::new(7, 0));
    }
}

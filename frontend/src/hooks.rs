//! One hook per API resource, each a cached query or a mutation.

use std::rc::Rc;

use yew::prelude::*;

use crate::{
    api::ApiClient,
    model::{
        Account, AccountSummary, Category, DayTransactions, MonthSummary, ScheduledTransaction,
        SummaryRange, Transaction, TransactionRequest, TransactionSummary,
    },
    query::{use_mutation, use_query, QueryState, UseMutationHandle},
};

/// Page size the day view requests.
pub const DAY_PAGE_SIZE: u32 = 10;

pub mod keys {
    use crate::{model::SummaryRange, query::QueryKey};

    pub fn transactions() -> QueryKey {
        QueryKey::new(["transactions"])
    }

    pub fn recent() -> QueryKey {
        QueryKey::new(["transactions", "recent"])
    }

    pub fn summary(range: SummaryRange) -> QueryKey {
        QueryKey::new(["transactions".to_string(), "summary".to_string(), range.code().to_string()])
    }

    pub fn by_date(date: &str, page: u32, size: u32) -> QueryKey {
        QueryKey::new([
            "transactions".to_string(),
            "by-date".to_string(),
            date.to_string(),
            page.to_string(),
            size.to_string(),
        ])
    }

    pub fn transaction(id: &str) -> QueryKey {
        QueryKey::new(["transactions", "detail", id])
    }

    pub fn monthly_summary() -> QueryKey {
        QueryKey::new(["monthly-summary"])
    }

    pub fn month(month: u32, year: i32) -> QueryKey {
        QueryKey::new(["monthly-summary".to_string(), month.to_string(), year.to_string()])
    }

    pub fn accounts() -> QueryKey {
        QueryKey::new(["accounts"])
    }

    pub fn account_summary() -> QueryKey {
        QueryKey::new(["accounts", "summary"])
    }

    pub fn default_account() -> QueryKey {
        QueryKey::new(["accounts", "default"])
    }

    pub fn categories(kind: i32) -> QueryKey {
        QueryKey::new(["categories".to_string(), kind.to_string()])
    }

    pub fn default_category(kind: i32) -> QueryKey {
        QueryKey::new(["categories".to_string(), "default".to_string(), kind.to_string()])
    }

    pub fn scheduled() -> QueryKey {
        QueryKey::new(["scheduled"])
    }

    pub fn upcoming_scheduled() -> QueryKey {
        QueryKey::new(["scheduled", "upcoming"])
    }

    pub fn completed_scheduled() -> QueryKey {
        QueryKey::new(["scheduled", "completed"])
    }

    /// Everything a transaction write can change.
    pub fn affected_by_transaction_write() -> Vec<QueryKey> {
        vec![transactions(), monthly_summary(), accounts()]
    }
}

#[hook]
pub fn use_recent_transactions() -> QueryState<Vec<Transaction>> {
    use_query(keys::recent(), true, |api: Rc<ApiClient>| async move {
        api.recent_transactions().await
    })
}

#[hook]
pub fn use_transaction_summary(range: SummaryRange) -> QueryState<TransactionSummary> {
    use_query(keys::summary(range), true, move |api: Rc<ApiClient>| async move {
        api.transaction_summary(range).await
    })
}

/// Disabled while `date` is empty.
#[hook]
pub fn use_transactions_by_date(date: String, page: u32, size: u32) -> QueryState<DayTransactions> {
    let enabled = !date.is_empty();
    use_query(
        keys::by_date(&date, page, size),
        enabled,
        move |api: Rc<ApiClient>| async move { api.transactions_by_date(&date, page, size).await },
    )
}

#[hook]
pub fn use_month_summary(month: u32, year: i32) -> QueryState<MonthSummary> {
    let enabled = month > 0 && year > 0;
    use_query(keys::month(month, year), enabled, move |api: Rc<ApiClient>| async move {
        api.month_summary(month, year).await
    })
}

/// Disabled when there is no id, i.e. when creating.
#[hook]
pub fn use_transaction(id: Option<String>) -> QueryState<Option<Transaction>> {
    let key = keys::transaction(id.as_deref().unwrap_or_default());
    let enabled = id.is_some();
    use_query(key, enabled, move |api: Rc<ApiClient>| async move {
        match id {
            Some(id) => api.transaction(&id).await,
            None => Ok(None),
        }
    })
}

#[hook]
pub fn use_accounts() -> QueryState<Vec<Account>> {
    use_query(keys::accounts(), true, |api: Rc<ApiClient>| async move {
        api.accounts().await
    })
}

#[hook]
pub fn use_account_summary() -> QueryState<AccountSummary> {
    use_query(keys::account_summary(), true, |api: Rc<ApiClient>| async move {
        api.account_summary().await
    })
}

#[hook]
pub fn use_default_account() -> QueryState<Option<Account>> {
    use_query(keys::default_account(), true, |api: Rc<ApiClient>| async move {
        api.default_account().await
    })
}

#[hook]
pub fn use_categories_by_type(kind: i32) -> QueryState<Vec<Category>> {
    use_query(keys::categories(kind), true, move |api: Rc<ApiClient>| async move {
        api.categories(kind).await
    })
}

#[hook]
pub fn use_default_category(kind: i32) -> QueryState<Option<Category>> {
    use_query(keys::default_category(kind), true, move |api: Rc<ApiClient>| async move {
        api.default_category(kind).await
    })
}

#[hook]
pub fn use_upcoming_scheduled() -> QueryState<Vec<ScheduledTransaction>> {
    use_query(keys::upcoming_scheduled(), true, |api: Rc<ApiClient>| async move {
        api.upcoming_scheduled().await
    })
}

#[hook]
pub fn use_completed_scheduled() -> QueryState<Vec<ScheduledTransaction>> {
    use_query(keys::completed_scheduled(), true, |api: Rc<ApiClient>| async move {
        api.completed_scheduled().await
    })
}

#[hook]
pub fn use_create_transaction() -> UseMutationHandle<TransactionRequest> {
    use_mutation(
        |api: Rc<ApiClient>, request: TransactionRequest| async move {
            api.create_transaction(&request).await
        },
        keys::affected_by_transaction_write(),
    )
}

#[hook]
pub fn use_update_transaction() -> UseMutationHandle<(String, TransactionRequest)> {
    use_mutation(
        |api: Rc<ApiClient>, (id, request): (String, TransactionRequest)| async move {
            api.update_transaction(&id, &request).await
        },
        keys::affected_by_transaction_write(),
    )
}

#[hook]
pub fn use_delete_transaction() -> UseMutationHandle<String> {
    use_mutation(
        |api: Rc<ApiClient>, id: String| async move { api.delete_transaction(&id).await },
        keys::affected_by_transaction_write(),
    )
}

#[hook]
pub fn use_toggle_scheduled() -> UseMutationHandle<String> {
    use_mutation(
        |api: Rc<ApiClient>, id: String| async move { api.toggle_scheduled(&id).await },
        vec![keys::scheduled()],
    )
}

#[hook]
pub fn use_delete_scheduled() -> UseMutationHandle<String> {
    use_mutation(
        |api: Rc<ApiClient>, id: String| async move { api.delete_scheduled(&id).await },
        vec![keys::scheduled()],
    )
}

#[cfg(test)]
mod tests {
    use super::keys;
    use crate::model::SummaryRange;

    #[test]
    fn by_date_key_carries_every_parameter() {
        let key = keys::by_date("2024-01-31", 1, 10);

        assert_eq!(key.segments(), ["transactions", "by-date", "2024-01-31", "1", "10"]);
    }

    #[test]
    fn changing_a_parameter_changes_the_key() {
        assert_ne!(keys::by_date("2024-01-31", 0, 10), keys::by_date("2024-02-01", 0, 10));
        assert_ne!(keys::summary(SummaryRange::Month), keys::summary(SummaryRange::Year));
        assert_ne!(keys::categories(1), keys::categories(2));
    }

    #[test]
    fn transaction_writes_refresh_lists_summaries_and_accounts() {
        let affected = keys::affected_by_transaction_write();
        let covered = |key: crate::query::QueryKey| affected.iter().any(|p| key.starts_with(p));

        assert!(covered(keys::recent()));
        assert!(covered(keys::summary(SummaryRange::AllTime)));
        assert!(covered(keys::by_date("2024-01-31", 0, 10)));
        assert!(covered(keys::transaction("t1")));
        assert!(covered(keys::month(1, 2024)));
        assert!(covered(keys::account_summary()));
        assert!(!covered(keys::upcoming_scheduled()));
        assert!(!covered(keys::categories(1)));
    }

    #[test]
    fn scheduled_writes_only_touch_schedules() {
        assert!(keys::completed_scheduled().starts_with(&keys::scheduled()));
        assert!(!keys::recent().starts_with(&keys::scheduled()));
    }
}

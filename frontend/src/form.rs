//! State behind the add/edit transaction form.
//!
//! The selected tab decides which fields exist: expense and income take a
//! category plus one account, transfer takes a source and a destination
//! account and no category. All field rules are enforced here so the page
//! only renders state and dispatches [FormAction]s.

use std::{collections::BTreeMap, rc::Rc, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use yew::Reducible;

use crate::model::{Account, Transaction, TransactionRequest};

pub const DEFAULT_TAGS: [&str; 8] = [
    "vacation",
    "needs",
    "business",
    "food",
    "shopping",
    "entertainment",
    "health",
    "transportation",
];

const MAX_SUGGESTED_TAGS: usize = 6;

/// Category type codes used by the categories endpoints.
pub const EXPENSE_CATEGORY: i32 = 1;
pub const INCOME_CATEGORY: i32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormTab {
    #[default]
    Expense,
    Income,
    Transfer,
}

impl FormTab {
    pub const ALL: [FormTab; 3] = [FormTab::Expense, FormTab::Income, FormTab::Transfer];

    /// Tab for a stored transaction's type code.
    pub fn from_type_code(code: i32) -> Self {
        match code {
            1 => FormTab::Expense,
            2 => FormTab::Income,
            _ => FormTab::Transfer,
        }
    }

    pub fn type_code(self) -> i32 {
        match self {
            FormTab::Expense => 1,
            FormTab::Income => 2,
            FormTab::Transfer => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormTab::Expense => "Expense",
            FormTab::Income => "Income",
            FormTab::Transfer => "Transfer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FormTab::Expense => "Money going out",
            FormTab::Income => "Money coming in",
            FormTab::Transfer => "Move between accounts",
        }
    }

    /// Category list to offer. Transfers have no category but still load
    /// the expense list so switching back is instant.
    pub fn category_type(self) -> i32 {
        match self {
            FormTab::Income => INCOME_CATEGORY,
            FormTab::Expense | FormTab::Transfer => EXPENSE_CATEGORY,
        }
    }

    pub fn is_transfer(self) -> bool {
        self == FormTab::Transfer
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormAction {
    SelectTab(FormTab),
    SetDate(String),
    SetTime(String),
    SetAmount(String),
    SetDescription(String),
    SelectCategory(String),
    /// Source account for transfers, the only account otherwise.
    SelectAccount(String),
    SelectPaymentMode(Option<String>),
    SelectToAccount(String),
    SelectToPaymentMode(Option<String>),
    SetTagDraft(String),
    AddDraftTag,
    ToggleTag(String),
    DefaultCategoryLoaded { category_type: i32, id: String },
    DefaultAccountLoaded(String),
    Load(Transaction),
}

/// Per-field validation messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub date: Option<&'static str>,
    pub time: Option<&'static str>,
    pub amount: Option<&'static str>,
    pub description: Option<&'static str>,
    pub category: Option<&'static str>,
    pub account: Option<&'static str>,
    pub to_account: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        *self == FormErrors::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFormState {
    pub tab: FormTab,
    pub date: String,
    pub time: String,
    /// Raw text of the amount input.
    pub amount: String,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub payment_mode_id: Option<String>,
    pub to_account_id: Option<String>,
    pub to_payment_mode_id: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub tag_draft: String,
    /// Set once an existing transaction has been loaded; defaults no
    /// longer overwrite anything.
    pub editing: bool,
    default_categories: BTreeMap<i32, String>,
}

impl TransactionFormState {
    pub fn new(today: NaiveDate, now: NaiveTime) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::SelectTab(tab) => self.select_tab(tab),
            FormAction::SetDate(date) => self.date = date,
            FormAction::SetTime(time) => self.time = time,
            FormAction::SetAmount(amount) => self.amount = amount,
            FormAction::SetDescription(description) => self.description = description,
            FormAction::SelectCategory(id) => {
                if !self.tab.is_transfer() {
                    self.category_id = Some(id);
                }
            }
            FormAction::SelectAccount(id) => self.select_account(id),
            FormAction::SelectPaymentMode(id) => self.payment_mode_id = id,
            FormAction::SelectToAccount(id) => self.select_to_account(id),
            FormAction::SelectToPaymentMode(id) => self.to_payment_mode_id = id,
            FormAction::SetTagDraft(draft) => self.tag_draft = draft,
            FormAction::AddDraftTag => {
                let draft = std::mem::take(&mut self.tag_draft);
                self.add_tag(&draft);
            }
            FormAction::ToggleTag(tag) => self.toggle_tag(&tag),
            FormAction::DefaultCategoryLoaded { category_type, id } => {
                self.default_category_loaded(category_type, id)
            }
            FormAction::DefaultAccountLoaded(id) => {
                if !self.editing && self.account_id.is_none() {
                    self.account_id = Some(id);
                }
            }
            FormAction::Load(transaction) => self.load(&transaction),
        }
    }

    fn select_tab(&mut self, tab: FormTab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;

        if tab.is_transfer() {
            self.category_id = None;
        } else {
            self.category_id = self.default_categories.get(&tab.category_type()).cloned();
        }
    }

    fn default_category_loaded(&mut self, category_type: i32, id: String) {
        self.default_categories.insert(category_type, id.clone());

        if !self.editing
            && !self.tab.is_transfer()
            && self.tab.category_type() == category_type
            && self.category_id.is_none()
        {
            self.category_id = Some(id);
        }
    }

    fn select_account(&mut self, id: String) {
        if self.account_id.as_deref() == Some(id.as_str()) {
            return;
        }
        if self.to_account_id.as_deref() == Some(id.as_str()) {
            self.to_account_id = None;
            self.to_payment_mode_id = None;
        }
        self.account_id = Some(id);
        self.payment_mode_id = None;
    }

    fn select_to_account(&mut self, id: String) {
        if self.account_id.as_deref() == Some(id.as_str())
            || self.to_account_id.as_deref() == Some(id.as_str())
        {
            return;
        }
        self.to_account_id = Some(id);
        self.to_payment_mode_id = None;
    }

    /// Adds a free-text tag. Returns false for blank or duplicate tags.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
            }
            None => {
                self.add_tag(tag);
            }
        }
    }

    fn load(&mut self, transaction: &Transaction) {
        let tab = FormTab::from_type_code(transaction.kind);

        self.editing = true;
        self.tab = tab;
        self.date = transaction.txn_date.clone();
        self.time = transaction
            .txn_time
            .get(..5)
            .unwrap_or(&transaction.txn_time)
            .to_string();
        self.amount = transaction.amount.normalize().to_string();
        self.description = transaction.description.clone();
        self.tags = transaction.tag_names();
        self.tag_draft.clear();

        if tab.is_transfer() {
            self.category_id = None;
            self.account_id = transaction
                .from_account
                .as_ref()
                .or(transaction.account.as_ref())
                .map(|a| a.id.clone());
            self.payment_mode_id = transaction
                .from_payment_mode
                .as_ref()
                .or(transaction.payment_mode.as_ref())
                .map(|m| m.id.clone());
            self.to_account_id = transaction.to_account.as_ref().map(|a| a.id.clone());
            self.to_payment_mode_id = transaction.to_payment_mode.as_ref().map(|m| m.id.clone());
        } else {
            self.category_id = transaction.category.as_ref().map(|c| c.id.clone());
            self.account_id = transaction.account.as_ref().map(|a| a.id.clone());
            self.payment_mode_id = transaction.payment_mode.as_ref().map(|m| m.id.clone());
            self.to_account_id = None;
            self.to_payment_mode_id = None;
        }
    }

    /// Default suggestions not already picked, at most six.
    pub fn suggested_tags(&self) -> Vec<&'static str> {
        DEFAULT_TAGS
            .iter()
            .copied()
            .filter(|tag| !self.tags.iter().any(|t| t == tag))
            .take(MAX_SUGGESTED_TAGS)
            .collect()
    }

    /// Accounts the destination selector may offer: all but the source.
    pub fn destination_options<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        accounts
            .iter()
            .filter(|account| self.account_id.as_deref() != Some(account.id.as_str()))
            .collect()
    }

    /// Checks every required field and builds the request body.
    pub fn validate(&self) -> Result<TransactionRequest, FormErrors> {
        let mut errors = FormErrors::default();

        if self.date.trim().is_empty() {
            errors.date = Some("Date is required");
        }
        if self.time.trim().is_empty() {
            errors.time = Some("Time is required");
        }

        let amount = match Decimal::from_str(self.amount.trim()) {
            Ok(amount) if amount > Decimal::ZERO => Some(amount),
            Ok(_) => {
                errors.amount = Some("Amount must be greater than 0");
                None
            }
            Err(_) if self.amount.trim().is_empty() => {
                errors.amount = Some("Amount is required");
                None
            }
            Err(_) => {
                errors.amount = Some("Amount must be a number");
                None
            }
        };

        if self.description.trim().is_empty() {
            errors.description = Some("Description is required");
        }

        if self.tab.is_transfer() {
            if self.account_id.is_none() {
                errors.account = Some("Select the account to transfer from");
            }
            match &self.to_account_id {
                None => errors.to_account = Some("Select the account to transfer to"),
                Some(to) if self.account_id.as_ref() == Some(to) => {
                    errors.to_account = Some("Choose two different accounts")
                }
                Some(_) => {}
            }
        } else {
            if self.category_id.is_none() {
                errors.category = Some("Category is required");
            }
            if self.account_id.is_none() {
                errors.account = Some("Account is required");
            }
        }

        let (Some(amount), Some(account_id), true) =
            (amount, self.account_id.clone(), errors.is_empty())
        else {
            return Err(errors);
        };

        let transfer = self.tab.is_transfer();
        Ok(TransactionRequest {
            kind: self.tab.type_code(),
            txn_date: self.date.trim().to_string(),
            txn_time: self.time.trim().to_string(),
            amount,
            category_id: if transfer { None } else { self.category_id.clone() },
            account_id,
            to_account_id: if transfer { self.to_account_id.clone() } else { None },
            payment_mode_id: self.payment_mode_id.clone(),
            to_payment_mode_id: if transfer {
                self.to_payment_mode_id.clone()
            } else {
                None
            },
            description: self.description.trim().to_string(),
            tags: self.tags.clone(),
        })
    }
}

impl Reducible for TransactionFormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn new_form() -> TransactionFormState {
        TransactionFormState::new(
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 42).unwrap(),
        )
    }

    fn account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            name: id.to_uppercase(),
            kind: 1,
            default: false,
            linked_payment_modes: Vec::new(),
        }
    }

    fn filled_expense() -> TransactionFormState {
        let mut form = new_form();
        form.apply(FormAction::SetAmount("50".into()));
        form.apply(FormAction::SetDescription("Groceries".into()));
        form.apply(FormAction::SelectCategory("food".into()));
        form.apply(FormAction::SelectAccount("checking".into()));
        form
    }

    #[test]
    fn new_form_starts_on_expense_with_today_and_now() {
        let form = new_form();

        assert_eq!(form.tab, FormTab::Expense);
        assert_eq!(form.date, "2024-01-31");
        assert_eq!(form.time, "09:05");
        assert!(!form.editing);
    }

    #[test]
    fn transfer_clears_category_and_switching_back_restores_default() {
        let mut form = new_form();
        form.apply(FormAction::DefaultCategoryLoaded {
            category_type: EXPENSE_CATEGORY,
            id: "general".into(),
        });
        assert_eq!(form.category_id.as_deref(), Some("general"));

        form.apply(FormAction::SelectCategory("food".into()));
        form.apply(FormAction::SelectTab(FormTab::Transfer));
        assert_eq!(form.category_id, None);

        form.apply(FormAction::SelectTab(FormTab::Expense));
        assert_eq!(form.category_id.as_deref(), Some("general"));
    }

    #[test]
    fn income_tab_uses_income_default_once_loaded() {
        let mut form = new_form();
        form.apply(FormAction::DefaultCategoryLoaded {
            category_type: EXPENSE_CATEGORY,
            id: "general".into(),
        });

        form.apply(FormAction::SelectTab(FormTab::Income));
        assert_eq!(form.category_id, None);

        form.apply(FormAction::DefaultCategoryLoaded {
            category_type: INCOME_CATEGORY,
            id: "salary".into(),
        });
        assert_eq!(form.category_id.as_deref(), Some("salary"));
    }

    #[test]
    fn category_cannot_be_set_on_transfer() {
        let mut form = new_form();
        form.apply(FormAction::SelectTab(FormTab::Transfer));
        form.apply(FormAction::SelectCategory("food".into()));

        assert_eq!(form.category_id, None);
    }

    #[test]
    fn destination_excludes_selected_source() {
        let accounts = vec![account("checking"), account("savings"), account("cash")];
        let mut form = new_form();
        form.apply(FormAction::SelectTab(FormTab::Transfer));
        form.apply(FormAction::SelectAccount("savings".into()));

        let ids: Vec<&str> = form
            .destination_options(&accounts)
            .iter()
            .map(|a| a.id.as_str())
            .collect();

        assert_eq!(ids, vec!["checking", "cash"]);
    }

    #[test]
    fn destination_equal_to_source_is_rejected() {
        let mut form = new_form();
        form.apply(FormAction::SelectTab(FormTab::Transfer));
        form.apply(FormAction::SelectAccount("checking".into()));
        form.apply(FormAction::SelectToAccount("checking".into()));

        assert_eq!(form.to_account_id, None);
    }

    #[test]
    fn picking_destination_as_source_clears_destination() {
        let mut form = new_form();
        form.apply(FormAction::SelectTab(FormTab::Transfer));
        form.apply(FormAction::SelectAccount("checking".into()));
        form.apply(FormAction::SelectToAccount("savings".into()));
        form.apply(FormAction::SelectToPaymentMode(Some("upi".into())));

        form.apply(FormAction::SelectAccount("savings".into()));

        assert_eq!(form.account_id.as_deref(), Some("savings"));
        assert_eq!(form.to_account_id, None);
        assert_eq!(form.to_payment_mode_id, None);
    }

    #[test]
    fn changing_account_clears_payment_mode() {
        let mut form = filled_expense();
        form.apply(FormAction::SelectPaymentMode(Some("card".into())));

        form.apply(FormAction::SelectAccount("checking".into()));
        assert_eq!(form.payment_mode_id.as_deref(), Some("card"));

        form.apply(FormAction::SelectAccount("wallet".into()));
        assert_eq!(form.payment_mode_id, None);
    }

    #[test]
    fn tag_input_rejects_empty_and_duplicate_tags() {
        let mut form = new_form();

        form.apply(FormAction::SetTagDraft("  trip ".into()));
        form.apply(FormAction::AddDraftTag);
        form.apply(FormAction::SetTagDraft("trip".into()));
        form.apply(FormAction::AddDraftTag);
        form.apply(FormAction::SetTagDraft("   ".into()));
        form.apply(FormAction::AddDraftTag);

        assert_eq!(form.tags, vec!["trip".to_string()]);
        assert!(form.tag_draft.is_empty());
    }

    #[test]
    fn suggested_tags_toggle_and_hide_selected() {
        let mut form = new_form();
        assert_eq!(
            form.suggested_tags(),
            vec!["vacation", "needs", "business", "food", "shopping", "entertainment"]
        );

        form.apply(FormAction::ToggleTag("needs".into()));
        assert_eq!(form.tags, vec!["needs".to_string()]);
        assert!(!form.suggested_tags().contains(&"needs"));
        assert!(form.suggested_tags().contains(&"health"));

        form.apply(FormAction::ToggleTag("needs".into()));
        assert!(form.tags.is_empty());
    }

    #[test]
    fn defaults_do_not_override_user_choices() {
        let mut form = filled_expense();
        form.apply(FormAction::DefaultAccountLoaded("default".into()));
        form.apply(FormAction::DefaultCategoryLoaded {
            category_type: EXPENSE_CATEGORY,
            id: "general".into(),
        });

        assert_eq!(form.account_id.as_deref(), Some("checking"));
        assert_eq!(form.category_id.as_deref(), Some("food"));
    }

    #[test]
    fn validation_blocks_missing_fields() {
        let mut form = new_form();
        form.apply(FormAction::SetDate(String::new()));
        form.apply(FormAction::SetAmount("0".into()));

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.date, Some("Date is required"));
        assert_eq!(errors.time, None);
        assert_eq!(errors.amount, Some("Amount must be greater than 0"));
        assert_eq!(errors.description, Some("Description is required"));
        assert_eq!(errors.category, Some("Category is required"));
        assert_eq!(errors.account, Some("Account is required"));
        assert_eq!(errors.to_account, None);
    }

    #[test]
    fn validation_rejects_non_numeric_amount() {
        let mut form = filled_expense();
        form.apply(FormAction::SetAmount("abc".into()));

        assert_eq!(form.validate().unwrap_err().amount, Some("Amount must be a number"));
    }

    #[test]
    fn expense_request_has_category_and_no_destination() {
        let mut form = filled_expense();
        form.apply(FormAction::SelectPaymentMode(Some("card".into())));
        form.apply(FormAction::ToggleTag("food".into()));

        let request = form.validate().unwrap();

        assert_eq!(request.kind, 1);
        assert_eq!(request.amount, Decimal::new(50, 0));
        assert_eq!(request.category_id.as_deref(), Some("food"));
        assert_eq!(request.account_id, "checking");
        assert_eq!(request.payment_mode_id.as_deref(), Some("card"));
        assert_eq!(request.to_account_id, None);
        assert_eq!(request.tags, vec!["food".to_string()]);
    }

    #[test]
    fn transfer_request_has_both_accounts_and_no_category() {
        let mut form = filled_expense();
        form.apply(FormAction::SelectTab(FormTab::Transfer));
        form.apply(FormAction::SelectToAccount("savings".into()));
        form.apply(FormAction::SelectToPaymentMode(Some("netbanking".into())));

        let request = form.validate().unwrap();

        assert_eq!(request.kind, 3);
        assert_eq!(request.category_id, None);
        assert_eq!(request.account_id, "checking");
        assert_eq!(request.to_account_id.as_deref(), Some("savings"));
        assert_eq!(request.to_payment_mode_id.as_deref(), Some("netbanking"));
    }

    #[test]
    fn transfer_requires_destination() {
        let mut form = filled_expense();
        form.apply(FormAction::SelectTab(FormTab::Transfer));

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.to_account, Some("Select the account to transfer to"));
        assert_eq!(errors.category, None);
    }

    #[test]
    fn request_serializes_without_absent_fields() {
        let request = filled_expense().validate().unwrap();

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["type"], json!(1));
        assert_eq!(value["txnDate"], json!("2024-01-31"));
        assert!(value.get("toAccountId").is_none());
        assert!(value.get("toPaymentModeId").is_none());
    }

    #[test]
    fn loading_a_transfer_selects_transfer_tab() {
        let transaction: Transaction = serde_json::from_value(json!({
            "id": "t9",
            "txnDate": "2024-03-01",
            "txnTime": "18:45:30",
            "amount": 75.5,
            "type": 3,
            "description": "Top up wallet",
            "fromAccount": { "id": "checking", "name": "Checking", "type": 1 },
            "toAccount": { "id": "wallet", "name": "Wallet", "type": 2 },
            "toPaymentMode": { "id": "upi", "name": "UPI", "type": 1 },
            "tags": [{ "id": "g", "name": "needs" }]
        }))
        .unwrap();
        let mut form = new_form();
        form.apply(FormAction::DefaultCategoryLoaded {
            category_type: EXPENSE_CATEGORY,
            id: "general".into(),
        });

        form.apply(FormAction::Load(transaction));

        assert!(form.editing);
        assert_eq!(form.tab, FormTab::Transfer);
        assert_eq!(form.date, "2024-03-01");
        assert_eq!(form.time, "18:45");
        assert_eq!(form.amount, "75.5");
        assert_eq!(form.category_id, None);
        assert_eq!(form.account_id.as_deref(), Some("checking"));
        assert_eq!(form.to_account_id.as_deref(), Some("wallet"));
        assert_eq!(form.to_payment_mode_id.as_deref(), Some("upi"));
        assert_eq!(form.tags, vec!["needs".to_string()]);
    }

    #[test]
    fn loading_income_keeps_its_category_over_defaults() {
        let transaction: Transaction = serde_json::from_value(json!({
            "id": "t2",
            "txnDate": "2024-03-02",
            "txnTime": "08:00",
            "amount": 1000,
            "type": 2,
            "description": "Salary",
            "category": { "id": "salary", "name": "Salary", "type": 2, "color": "#0f0", "icon": "briefcase", "deletable": false },
            "account": { "id": "checking", "name": "Checking", "type": 1 }
        }))
        .unwrap();
        let mut form = new_form();

        form.apply(FormAction::Load(transaction));
        form.apply(FormAction::DefaultCategoryLoaded {
            category_type: INCOME_CATEGORY,
            id: "other-income".into(),
        });
        form.apply(FormAction::DefaultAccountLoaded("wallet".into()));

        assert_eq!(form.tab, FormTab::Income);
        assert_eq!(form.category_id.as_deref(), Some("salary"));
        assert_eq!(form.account_id.as_deref(), Some("checking"));
        assert_eq!(form.time, "08:00");
    }

    #[test]
    fn tab_inference_from_type_codes() {
        assert_eq!(FormTab::from_type_code(1), FormTab::Expense);
        assert_eq!(FormTab::from_type_code(2), FormTab::Income);
        assert_eq!(FormTab::from_type_code(3), FormTab::Transfer);
        assert_eq!(FormTab::from_type_code(7), FormTab::Transfer);
    }
}

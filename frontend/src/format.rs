//! Display helpers: type codes to labels, icons and colours, plus money,
//! time and date formatting.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::ScheduledKind;

/// The icons the UI draws. Paths live in `components::icons`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    ArrowLeft,
    ArrowUpDown,
    Banknote,
    Building,
    Calendar,
    ChevronLeft,
    ChevronRight,
    Clock,
    CreditCard,
    DollarSign,
    Edit,
    FileText,
    Globe,
    LayoutGrid,
    Pause,
    Play,
    Plus,
    Smartphone,
    Trash,
    TrendingDown,
    TrendingUp,
    Wallet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    Bank,
    Wallet,
    CreditCard,
    Cash,
    Other,
}

impl AccountKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => AccountKind::Bank,
            2 => AccountKind::Wallet,
            3 => AccountKind::CreditCard,
            4 => AccountKind::Cash,
            _ => AccountKind::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AccountKind::Bank => "Bank Account",
            AccountKind::Wallet => "Wallet",
            AccountKind::CreditCard => "Credit Card",
            AccountKind::Cash => "Cash",
            AccountKind::Other => "Account",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            AccountKind::Bank | AccountKind::Other => Icon::Building,
            AccountKind::Wallet => Icon::Wallet,
            AccountKind::CreditCard => Icon::CreditCard,
            AccountKind::Cash => Icon::Banknote,
        }
    }

    /// Badge background and text classes.
    pub fn badge_class(self) -> &'static str {
        match self {
            AccountKind::Bank => "bg-blue-100 text-blue-700",
            AccountKind::Wallet => "bg-green-100 text-green-700",
            AccountKind::CreditCard => "bg-purple-100 text-purple-700",
            AccountKind::Cash => "bg-yellow-100 text-yellow-700",
            AccountKind::Other => "bg-gray-100 text-gray-700",
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            AccountKind::Bank => "text-blue-600",
            AccountKind::Wallet => "text-green-600",
            AccountKind::CreditCard => "text-purple-600",
            AccountKind::Cash => "text-yellow-600",
            AccountKind::Other => "text-gray-600",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentModeKind {
    Upi,
    DebitCard,
    Cheque,
    InternetBanking,
    Other,
}

impl PaymentModeKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => PaymentModeKind::Upi,
            2 => PaymentModeKind::DebitCard,
            3 => PaymentModeKind::Cheque,
            4 => PaymentModeKind::InternetBanking,
            _ => PaymentModeKind::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaymentModeKind::Upi => "UPI",
            PaymentModeKind::DebitCard => "Debit Card",
            PaymentModeKind::Cheque => "Cheque",
            PaymentModeKind::InternetBanking => "Internet Banking",
            PaymentModeKind::Other => "Payment Mode",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            PaymentModeKind::Upi => Icon::Smartphone,
            PaymentModeKind::DebitCard | PaymentModeKind::Other => Icon::CreditCard,
            PaymentModeKind::Cheque => Icon::FileText,
            PaymentModeKind::InternetBanking => Icon::Globe,
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            PaymentModeKind::Upi => "bg-green-500",
            PaymentModeKind::DebitCard => "bg-blue-500",
            PaymentModeKind::Cheque => "bg-yellow-500",
            PaymentModeKind::InternetBanking => "bg-purple-500",
            PaymentModeKind::Other => "bg-gray-500",
        }
    }
}

/// Numeric transaction type codes used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
    Transfer,
    DebtExpense,
    DebtIncome,
    DebtTransfer,
    Other(i32),
}

impl TransactionKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => TransactionKind::Expense,
            2 => TransactionKind::Income,
            3 => TransactionKind::Transfer,
            5 => TransactionKind::DebtExpense,
            6 => TransactionKind::DebtIncome,
            7 => TransactionKind::DebtTransfer,
            other => TransactionKind::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TransactionKind::Expense => 1,
            TransactionKind::Income => 2,
            TransactionKind::Transfer => 3,
            TransactionKind::DebtExpense => 5,
            TransactionKind::DebtIncome => 6,
            TransactionKind::DebtTransfer => 7,
            TransactionKind::Other(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
            TransactionKind::Transfer => "Transfer",
            TransactionKind::DebtExpense => "Debt Payment",
            TransactionKind::DebtIncome => "Debt Received",
            TransactionKind::DebtTransfer => "Debt Adjustment",
            TransactionKind::Other(_) => "Transaction",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            TransactionKind::Expense | TransactionKind::DebtExpense => Icon::TrendingDown,
            TransactionKind::Income | TransactionKind::DebtIncome => Icon::TrendingUp,
            TransactionKind::Transfer => Icon::ArrowUpDown,
            TransactionKind::DebtTransfer | TransactionKind::Other(_) => Icon::DollarSign,
        }
    }

    pub fn amount_class(self) -> &'static str {
        match self {
            TransactionKind::Expense | TransactionKind::DebtExpense => "text-red-600",
            TransactionKind::Income | TransactionKind::DebtIncome => "text-green-600",
            TransactionKind::Transfer | TransactionKind::DebtTransfer => "text-blue-600",
            TransactionKind::Other(_) => "text-gray-600",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            TransactionKind::Expense | TransactionKind::DebtExpense => "-",
            TransactionKind::Income | TransactionKind::DebtIncome => "+",
            _ => "",
        }
    }

    pub fn is_transfer(self) -> bool {
        self == TransactionKind::Transfer
    }
}

impl ScheduledKind {
    pub fn label(self) -> &'static str {
        match self {
            ScheduledKind::Expense => "Expense",
            ScheduledKind::Income => "Income",
            ScheduledKind::Transfer => "Transfer",
            ScheduledKind::Unknown => "Other",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            ScheduledKind::Expense => Icon::TrendingDown,
            ScheduledKind::Income => Icon::TrendingUp,
            ScheduledKind::Transfer | ScheduledKind::Unknown => Icon::ArrowUpDown,
        }
    }

    pub fn amount_class(self) -> &'static str {
        match self {
            ScheduledKind::Expense => "text-red-600",
            ScheduledKind::Income => "text-green-600",
            ScheduledKind::Transfer => "text-blue-600",
            ScheduledKind::Unknown => "text-gray-600",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            ScheduledKind::Expense => "-",
            ScheduledKind::Income => "+",
            _ => "",
        }
    }
}

pub fn frequency_label(code: i32) -> &'static str {
    match code {
        1 => "Daily",
        2 => "Weekly",
        3 => "Monthly",
        4 => "Yearly",
        _ => "Custom",
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` → `$1,234.50`, `-50` → `-$50.00`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}{}{}.{}", sign, symbol, group_thousands(whole), cents)
}

/// Amount as shown in transaction lists: sign from the type, magnitude
/// from the amount.
pub fn signed_amount(kind: TransactionKind, amount: Decimal, symbol: &str) -> String {
    format!("{}{}", kind.sign(), format_currency(amount.abs(), symbol))
}

/// Text and colour class for a balance figure. Non-negative balances get a
/// `+` prefix.
pub fn balance_display(balance: Decimal, symbol: &str) -> (String, &'static str) {
    if balance >= Decimal::ZERO {
        (format!("+{}", format_currency(balance, symbol)), "text-green-600")
    } else {
        (format_currency(balance, symbol), "text-red-600")
    }
}

/// `"14:05"` or `"14:05:00"` → `"2:05 PM"`. Unparseable input is returned
/// unchanged.
pub fn format_time_12h(time: &str) -> String {
    let mut parts = time.split(':');
    let hour = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minute = parts.next().and_then(|m| m.trim().parse::<u32>().ok());

    match (hour, minute) {
        (Some(hour), Some(minute)) if hour < 24 && minute < 60 => {
            let period = if hour >= 12 { "PM" } else { "AM" };
            let display_hour = match hour {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            format!("{}:{:02} {}", display_hour, minute, period)
        }
        _ => time.to_string(),
    }
}

pub fn parse_api_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d").ok()
}

/// `2024-01-31` → `1/31/2024`.
pub fn format_short_date(date: &str) -> String {
    parse_api_date(date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// `Wednesday, January 31, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn expense_of_fifty_renders_negative_in_red() {
        let kind = TransactionKind::from_code(1);

        assert_eq!(signed_amount(kind, Decimal::new(50, 0), "$"), "-$50.00");
        assert_eq!(kind.amount_class(), "text-red-600");
    }

    #[test]
    fn income_and_transfer_signs() {
        let fifty = Decimal::new(50, 0);

        assert_eq!(signed_amount(TransactionKind::Income, fifty, "$"), "+$50.00");
        assert_eq!(signed_amount(TransactionKind::DebtIncome, fifty, "$"), "+$50.00");
        assert_eq!(signed_amount(TransactionKind::Transfer, fifty, "$"), "$50.00");
        assert_eq!(TransactionKind::Transfer.amount_class(), "text-blue-600");
    }

    #[test]
    fn currency_groups_thousands_and_pads_cents() {
        assert_eq!(format_currency(Decimal::new(12345, 1), "$"), "$1,234.50");
        assert_eq!(format_currency(Decimal::new(100, 0), "$"), "$100.00");
        assert_eq!(format_currency(Decimal::new(1_000_000, 0), "€"), "€1,000,000.00");
        assert_eq!(format_currency(Decimal::ZERO, "$"), "$0.00");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(format_currency(Decimal::new(10_005, 3), "$"), "$10.01");
        assert_eq!(format_currency(Decimal::new(-1, 3), "$"), "$0.00");
    }

    #[test]
    fn negative_balance_is_red_without_plus() {
        assert_eq!(
            balance_display(Decimal::new(-2050, 2), "$"),
            ("-$20.50".to_string(), "text-red-600")
        );
        assert_eq!(
            balance_display(Decimal::ZERO, "$"),
            ("+$0.00".to_string(), "text-green-600")
        );
    }

    #[test]
    fn twelve_hour_time() {
        assert_eq!(format_time_12h("14:05"), "2:05 PM");
        assert_eq!(format_time_12h("00:30:00"), "12:30 AM");
        assert_eq!(format_time_12h("12:00"), "12:00 PM");
        assert_eq!(format_time_12h("9:7"), "9:07 AM");
        assert_eq!(format_time_12h("noon"), "noon");
    }

    #[test]
    fn dates() {
        assert_eq!(format_short_date("2024-01-31"), "1/31/2024");
        assert_eq!(format_short_date("2024-01-31T10:00:00"), "1/31/2024");
        assert_eq!(format_short_date("soon"), "soon");

        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(format_long_date(date), "Wednesday, January 31, 2024");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(AccountKind::from_code(9).name(), "Account");
        assert_eq!(PaymentModeKind::from_code(0).name(), "Payment Mode");
        assert_eq!(TransactionKind::from_code(4).name(), "Transaction");
        assert_eq!(TransactionKind::from_code(4).code(), 4);
        assert_eq!(frequency_label(42), "Custom");
    }

    #[test]
    fn payment_mode_labels() {
        assert_eq!(PaymentModeKind::from_code(1).name(), "UPI");
        assert_eq!(PaymentModeKind::from_code(2).name(), "Debit Card");
        assert_eq!(PaymentModeKind::from_code(3).name(), "Cheque");
        assert_eq!(PaymentModeKind::from_code(4).name(), "Internet Banking");
    }
}

//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::record::{Record, RecordStatus, SecretData};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of records (Id, Kind, Status, Meta, Modified).
///
/// Records whose payload cannot be decoded still get a row; their meta
/// column says so.
pub fn print_records_table<'a>(records: impl IntoIterator<Item = &'a Record>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "Status", "Meta", "Modified"]);

    let mut rows = 0;
    for record in records {
        let meta = match record.data() {
            Ok(data) => data.meta_info().to_string(),
            Err(_) => "<undecodable>".to_string(),
        };
        table.add_row(vec![
            record.id.clone(),
            record.kind.to_string(),
            styled_status(record.status),
            meta,
            record.modified_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
        rows += 1;
    }

    if rows == 0 {
        info("No records in this vault yet.");
        tip("Run `lockvault add <kind>` to add your first record.");
        return;
    }

    println!("{table}");
}

/// Print the fields of one record as a two-column table.
pub fn print_record_fields(record: &Record, data: &SecretData, reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Id".to_string(), record.id.clone()]);
    table.add_row(vec!["Kind".to_string(), record.kind.to_string()]);
    table.add_row(vec!["Status".to_string(), styled_status(record.status)]);

    let hidden = |value: &str| {
        if reveal {
            value.to_string()
        } else {
            mask(value)
        }
    };

    match data {
        SecretData::LoginPassword(v) => {
            table.add_row(vec!["Login".to_string(), v.login.clone()]);
            table.add_row(vec!["Password".to_string(), hidden(&v.password)]);
        }
        SecretData::Text(v) => {
            table.add_row(vec!["Text".to_string(), v.text.clone()]);
        }
        SecretData::BankCard(v) => {
            table.add_row(vec!["Card number".to_string(), hidden(&v.card_number)]);
            table.add_row(vec!["Expiry".to_string(), v.expiry_date.clone()]);
            table.add_row(vec!["CVV".to_string(), hidden(&v.cvv)]);
        }
        SecretData::Binary(v) => {
            table.add_row(vec!["Data".to_string(), format!("{} bytes", v.data.len())]);
        }
    }

    table.add_row(vec!["Meta".to_string(), data.meta_info().to_string()]);
    table.add_row(vec![
        "Created".to_string(),
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec![
        "Modified".to_string(),
        record.modified_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);

    println!("{table}");
}

/// Replace all but the last four characters with `*`.
pub fn mask(value: &str) -> String {
    let count = value.chars().count();
    let keep = if count > 4 { 4 } else { 0 };
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i + keep < count { '*' } else { c })
        .collect()
}

fn styled_status(status: RecordStatus) -> String {
    match status {
        RecordStatus::Synced => style(status).green().to_string(),
        RecordStatus::Deleted => style(status).red().to_string(),
        RecordStatus::Created | RecordStatus::Modified => style(status).yellow().to_string(),
    }
}

mod common;

use std::{fs, path::Path};

use bookkeeping_core::{
    config::{Config, ConfigManager},
    core::{services::SummaryService, utils::tmp_path, BookError, BookManager},
    domain::{CategoryKind, EntryDraft, EntryType, Period},
    storage::{JsonStorage, StorageBackend},
};
use common::date;
use tempfile::TempDir;

fn reopen(base: &Path) -> BookManager {
    let storage = JsonStorage::new(Some(base.to_path_buf())).expect("open json storage");
    let mut manager = BookManager::new(Box::new(storage));
    manager.load().expect("reload book");
    manager
}

#[test]
fn entries_and_categories_survive_a_reload() {
    let temp = TempDir::new().unwrap();
    let mut manager = reopen(temp.path());

    let pix = manager
        .add_category(CategoryKind::PaymentMethod, "Boleto")
        .unwrap();
    let sale = manager
        .add_entry(
            EntryDraft::new(date(2024, 6, 3), EntryType::Income, 250.0)
                .with_category("1")
                .with_payment_method(&pix.id)
                .with_bank("2")
                .with_client("Maria")
                .with_description("Venda balcão"),
        )
        .unwrap();
    manager
        .rename_category(CategoryKind::Income, "1", "Vendas online")
        .unwrap();

    let reloaded = reopen(temp.path());
    let book = reloaded.book().unwrap();
    let stored = book.entry(&sale.id).expect("entry persisted");
    assert_eq!(stored, &sale);
    assert_eq!(
        book.chart.get(CategoryKind::PaymentMethod, &pix.id).unwrap().name,
        "Boleto"
    );
    assert_eq!(book.chart.get(CategoryKind::Income, "1").unwrap().name, "Vendas online");
}

#[test]
fn legacy_rows_are_normalised_on_load() {
    let temp = TempDir::new().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    fs::write(
        storage.entries_path(),
        r#"[
            {"id": "a", "date": "2024-03-01T00:30:00-03:00", "type": "RECCEITA", "categoryId": "1", "value": 1000},
            {"id": "b", "date": "2024-03-31", "type": "DESPESA", "category_id": "2", "value": -300},
            {"id": "c", "date": "2024-03-15", "type": "COMPRA", "value": "200,50", "bankId": ""},
            {"id": "d", "date": "31/03/2024", "type": "RECEITA", "value": 10}
        ]"#,
    )
    .unwrap();

    let mut manager = BookManager::new(Box::new(storage));
    let report = manager.load().unwrap();
    assert_eq!(report.entries, 4);
    assert_eq!(report.undated_entries, vec!["d".to_string()]);

    let book = manager.book().unwrap();
    assert_eq!(book.entry("a").unwrap().entry_type, EntryType::Income);
    assert_eq!(book.entry("a").unwrap().date, Some(date(2024, 3, 1)));
    assert_eq!(book.entry("b").unwrap().value, 300.0);
    assert_eq!(book.entry("c").unwrap().entry_type, EntryType::Purchase);
    assert_eq!(book.entry("c").unwrap().value, 200.5);
    assert_eq!(book.entry("c").unwrap().bank_id, None);

    let snapshot = manager.snapshot().unwrap();
    let report = SummaryService::period_report(
        &snapshot,
        &book.chart,
        Period::new(2, 2024).unwrap(),
        "Uncategorized",
    );
    assert_eq!(report.totals.income, 1000.0);
    assert_eq!(report.totals.expense, 300.0);
    assert_eq!(report.balance, 499.5);
}

#[test]
fn null_columns_load_as_empty_fields() {
    let temp = TempDir::new().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    fs::write(
        storage.entries_path(),
        r#"[
            {"id": "n1", "date": null, "type": "RECEITA", "categoryId": null, "description": null, "paymentMethodId": null, "bankId": null, "clientName": null, "value": 80},
            {"id": "n2", "date": "2024-04-02", "type": null, "categoryId": "1", "description": "Luz", "clientName": null, "value": "1.234,56"}
        ]"#,
    )
    .unwrap();

    let mut manager = BookManager::new(Box::new(storage));
    let report = manager.load().expect("null columns do not abort the load");
    assert_eq!(report.entries, 2);
    assert_eq!(report.undated_entries, vec!["n1".to_string()]);

    let book = manager.book().unwrap();
    let undated = book.entry("n1").unwrap();
    assert_eq!(undated.date, None);
    assert_eq!(undated.description, "");
    assert_eq!(undated.bank_id, None);
    let dated = book.entry("n2").unwrap();
    assert_eq!(dated.entry_type, EntryType::Expense);
    assert_eq!(dated.client_name, "");
    assert_eq!(dated.value, 1234.56);

    let snapshot = manager.snapshot().unwrap();
    let totals = SummaryService::monthly_series(&snapshot, 2024).annual_totals();
    assert_eq!(totals.income, 0.0);
    assert_eq!(totals.expense, 1234.56);
}

#[test]
fn failed_write_keeps_previous_file_and_book() {
    let temp = TempDir::new().unwrap();
    let mut manager = reopen(temp.path());
    manager
        .add_entry(EntryDraft::new(date(2024, 2, 1), EntryType::Income, 10.0))
        .unwrap();

    let observer = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let original = fs::read_to_string(observer.entries_path()).unwrap();
    fs::create_dir(tmp_path(observer.entries_path())).unwrap();

    let version = manager.book().unwrap().version();
    let err = manager
        .add_entry(EntryDraft::new(date(2024, 2, 2), EntryType::Expense, 5.0))
        .expect_err("tmp path is a directory");
    assert!(matches!(err, BookError::StorageError(_)));
    assert_eq!(manager.book().unwrap().version(), version);
    assert_eq!(manager.book().unwrap().entries().len(), 1);
    assert_eq!(fs::read_to_string(observer.entries_path()).unwrap(), original);
    assert_eq!(observer.fetch_entries().unwrap().len(), 1);
}

#[test]
fn configured_data_dir_drives_storage_location() {
    let temp = TempDir::new().unwrap();
    let config_manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = Config {
        data_dir: Some(temp.path().join("books")),
        uncategorized_label: "Sem categoria".into(),
        ..Config::default()
    };
    config_manager.save(&config).unwrap();

    let loaded = config_manager.load().unwrap();
    let storage = JsonStorage::from_config(&loaded).unwrap();
    assert!(storage
        .entries_path()
        .starts_with(temp.path().join("books").join("store")));

    let mut manager = BookManager::new(Box::new(storage));
    manager.load().unwrap();
    manager
        .add_entry(
            EntryDraft::new(date(2024, 9, 9), EntryType::Expense, 42.0).with_category("nope"),
        )
        .unwrap();
    let snapshot = manager.snapshot().unwrap();
    let rows = SummaryService::category_breakdown(
        &snapshot,
        EntryType::Expense,
        &manager.book().unwrap().chart,
        &loaded.uncategorized_label,
    );
    assert_eq!(rows[0].name, "Sem categoria");
}

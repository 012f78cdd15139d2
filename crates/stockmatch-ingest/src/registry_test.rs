use stockmatch_core::{DeadstockRecord, Presence, StoreEntry};

use super::*;

fn entry(name: &str, deadstock: &[&str]) -> StoreEntry {
    StoreEntry {
        name: name.to_string(),
        deadstock: Some(
            deadstock
                .iter()
                .map(|n| DeadstockRecord {
                    name: (*n).to_string(),
                    normalized_name: (*n).to_lowercase(),
                    stock: 1.0,
                    expiry: String::new(),
                    price: 1.0,
                })
                .collect(),
        ),
        usage: None,
        presence: Presence {
            deadstock: true,
            usage: false,
        },
    }
}

fn csv_file(path: &str, text: &str) -> SourceFile {
    SourceFile::loaded(path, text.as_bytes().to_vec())
}

const DEADSTOCK_A: &str = "No.,薬品名,在庫数量,使用期限,薬価\n1,DrugA,10,2026/01,5\n";
const DEADSTOCK_B: &str = "No.,薬品名,在庫数量,使用期限,薬価\n1,DrugB,3,2026/02,7\n2,DrugC,1,,2\n";
const USAGE_NAMED: &str = "店舗,駅前店\nNo.,薬品名,処方数量\n1,DrugA,4\n";

#[test]
fn upsert_inserts_then_replaces_in_place() {
    let mut registry = StoreRegistry::new();
    assert_eq!(registry.upsert(entry("Sano", &["A"])), Upsert::Inserted);
    assert_eq!(registry.upsert(entry("Honten", &["B"])), Upsert::Inserted);
    assert_eq!(registry.upsert(entry("Sano", &["C", "D"])), Upsert::Replaced);

    assert_eq!(registry.len(), 2);
    let names: Vec<&str> = registry.store_names().collect();
    assert_eq!(names, vec!["Sano", "Honten"]);
    assert_eq!(registry.get("Sano").unwrap().deadstock_count(), 2);
}

#[test]
fn get_unknown_store_is_none() {
    let registry = StoreRegistry::new();
    assert!(registry.get("nowhere").is_none());
    assert!(registry.is_empty());
}

#[test]
fn reset_clears_everything() {
    let mut registry = StoreRegistry::new();
    registry.upsert(entry("Sano", &["A"]));
    registry.reset();
    assert!(registry.is_empty());
    assert!(registry.get("Sano").is_none());
    assert_eq!(registry.upsert(entry("Sano", &["A"])), Upsert::Inserted);
}

#[tokio::test]
async fn ingest_groups_by_folder_and_skips_unrelated() {
    let mut registry = StoreRegistry::new();
    let files = vec![
        csv_file("All/Sano/HudoAddList.csv", DEADSTOCK_A),
        csv_file("All/Notes/readme.csv", "a,b\n"),
        csv_file("All/Honten/HudoAddList.csv", DEADSTOCK_B),
    ];
    let summary = registry.ingest(files, &IngestOptions::default()).await;

    assert_eq!(summary.skipped, vec!["Notes".to_string()]);
    assert_eq!(summary.folders.len(), 2);
    assert_eq!(summary.folders[0].store, "Sano");
    assert_eq!(summary.folders[0].deadstock, Some(1));
    assert_eq!(summary.folders[0].usage, None);
    assert_eq!(summary.folders[1].deadstock, Some(2));

    let names: Vec<&str> = registry.store_names().collect();
    assert_eq!(names, vec!["Sano", "Honten"]);
}

#[tokio::test]
async fn second_batch_with_same_store_replaces_entry() {
    let options = IngestOptions::default();
    let mut registry = StoreRegistry::new();

    registry
        .ingest(vec![csv_file("Sano/HudoAddList.csv", DEADSTOCK_A)], &options)
        .await;
    let summary = registry
        .ingest(vec![csv_file("Sano/HudoAddList.csv", DEADSTOCK_B)], &options)
        .await;

    assert_eq!(summary.folders[0].upsert, Upsert::Replaced);
    assert_eq!(registry.len(), 1);
    let sano = registry.get("Sano").unwrap();
    let names: Vec<&str> = sano
        .deadstock
        .as_ref()
        .unwrap()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["DrugB", "DrugC"]);
}

#[tokio::test]
async fn reingesting_identical_files_is_idempotent() {
    let options = IngestOptions::default();
    let files = vec![
        csv_file("root/Sano/HudoAddList.csv", DEADSTOCK_A),
        csv_file("root/Ekimae/ZaikoKin.csv", USAGE_NAMED),
        csv_file("root/Ekimae/HudoAddList.csv", DEADSTOCK_B),
    ];

    let mut registry = StoreRegistry::new();
    registry.ingest(files.clone(), &options).await;
    let first = registry.clone();
    registry.ingest(files, &options).await;

    assert_eq!(registry, first);
    let names: Vec<&str> = registry.store_names().collect();
    assert_eq!(names, vec!["Sano", "駅前店"]);
}

#[tokio::test]
async fn folders_resolving_to_one_name_keep_the_later() {
    let options = IngestOptions::default();
    let mut registry = StoreRegistry::new();
    let files = vec![
        csv_file("a/First/ZaikoKin.csv", USAGE_NAMED),
        csv_file("a/First/HudoAddList.csv", DEADSTOCK_A),
        csv_file("a/Second/ZaikoKin.csv", USAGE_NAMED),
        csv_file("a/Second/HudoAddList.csv", DEADSTOCK_B),
    ];
    let summary = registry.ingest(files, &options).await;

    assert_eq!(summary.folders.len(), 2);
    assert_eq!(summary.folders[1].upsert, Upsert::Replaced);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("駅前店").unwrap().deadstock_count(), 2);
}

#[tokio::test]
async fn ingest_folder_ignores_path_structure() {
    let mut registry = StoreRegistry::new();
    let summary = registry
        .ingest_folder(
            "Kita",
            vec![csv_file("HudoAddList.csv", DEADSTOCK_A)],
            &IngestOptions::default(),
        )
        .await;

    assert_eq!(summary.folders[0].folder, "Kita");
    assert!(registry.get("Kita").is_some());
}

use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use workbench_core::{Workbench, WorkbenchConfig};

fn workbench() -> Workbench {
    Workbench::from_config(&WorkbenchConfig::default()).unwrap()
}

fn ask(bench: &Workbench, request: Value) -> Value {
    let reply = bench.handle_json(&request.to_string());
    serde_json::from_str(&reply).unwrap()
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[test]
fn test_calculate_two_ingredients() {
    let reply = ask(
        &workbench(),
        json!({
            "type": "calculate",
            "ingredients": ["Blue Mountain Flower", "Eye of Sabre Cat"],
            "skill": 15,
            "alchemist_perk_level": 0
        }),
    );

    assert_eq!(reply["type"], "calculated");
    assert_eq!(
        reply["result"],
        json!({
            "name": "Potion of Restore Health",
            "didSucceed": true,
            "effects": "Restore 22 points of Health",
            "gold": 14
        })
    );
}

#[test]
fn test_calculate_three_ingredients_keys() {
    let reply = ask(
        &workbench(),
        json!({
            "type": "calculate",
            "ingredients": ["Nightshade", "Deathbell", "Imp Stool"],
            "skill": 100,
            "alchemist_perk_level": 5,
            "poisoner": true
        }),
    );

    assert_eq!(reply["type"], "calculated");
    let potions = reply["result"].as_object().unwrap();
    assert!(potions.len() <= 4);
    let triple = &potions["Deathbell,Imp Stool,Nightshade"];
    assert_eq!(triple["name"], "Poison of Damage Health");
    assert!(triple["gold"].as_u64().unwrap() > 0);
    for potion in potions.values() {
        assert_eq!(potion["didSucceed"], true);
    }
}

#[test]
fn test_perk_level_must_be_number() {
    let reply = ask(
        &workbench(),
        json!({
            "type": "calculate",
            "ingredients": ["Wheat", "Garlic"],
            "alchemist_perk_level": "max"
        }),
    );
    assert_eq!(reply["type"], "error");
    assert_eq!(
        reply["error"],
        "Expected a number for 'alchemist_perk_level', got string"
    );
}

#[test]
fn test_fewer_than_two_names() {
    let reply = ask(&workbench(), json!({"type": "calculate", "ingredients": []}));
    assert_eq!(
        reply,
        json!({"type": "error", "error": "At least 2 ingredients are required, got 0"})
    );
}

#[test]
fn test_search_and_populate() {
    let bench = workbench();

    let reply = ask(&bench, json!({"type": "search", "query": "blue mo"}));
    assert_eq!(reply["type"], "search_results");
    assert_eq!(reply["ingredients"][0]["name"], "Blue Mountain Flower");
    assert_eq!(reply["ingredients"][0]["effects"][0], "Restore Health");

    let reply = ask(
        &bench,
        json!({"type": "populate", "dlcs": ["dragonborn"], "order": "desc"}),
    );
    assert_eq!(reply["type"], "populated");
    let names: Vec<&str> = reply["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Pearl",
            "Netch Jelly",
            "Emperor Parasol Moss",
            "Ash Hopper Jelly",
            "Ash Creep Cluster"
        ]
    );
}

#[test]
fn test_unknown_request_type() {
    let reply = ask(&workbench(), json!({"type": "transmute"}));
    assert_eq!(reply["type"], "error");
}

#[test]
fn test_custom_ingredient_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("custom.toml"),
        r#"
[[ingredients]]
name = "Test Root"
gold_value = 1
weight = 0.1

[[ingredients.effects]]
name = "Restore Stamina"

[[ingredients]]
name = "Test Leaf"
gold_value = 1
weight = 0.1

[[ingredients.effects]]
name = "Restore Stamina"
magnitude_multiplier = 2.0
"#,
    )
    .unwrap();

    let config = WorkbenchConfig {
        ingredients_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let bench = Workbench::from_config(&config).unwrap();
    assert_eq!(bench.registry().len(), 2);

    let reply = ask(
        &bench,
        json!({"type": "calculate", "ingredients": ["Test Root", "Test Leaf"], "skill": 0}),
    );
    // Test Leaf's stronger instance survives: 10 * 4 = 40
    assert_eq!(reply["result"]["effects"], "Restore 40 Stamina");
}

#[test]
fn test_logs_go_to_injected_dispatch() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let bench = workbench().with_dispatch(Dispatch::new(subscriber));
    ask(
        &bench,
        json!({"type": "calculate", "ingredients": ["Wheat", "Blue Mountain Flower"]}),
    );

    let logs = buffer.contents();
    assert!(logs.contains("brewed potion"), "logs were: {}", logs);
    assert!(logs.contains("Potion of Restore Health"), "logs were: {}", logs);
}

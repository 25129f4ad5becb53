use serde_json::json;
use speculate2::speculate;
use tempfile::TempDir;
use todomvc::app::{TodoApp, COUNTER_KEY, ITEMS_KEY};
use todomvc::models::*;
use todomvc::store::{MemoryStorage, SqliteStorage, Storage, StorageError};

fn titles<S: Storage>(app: &TodoApp<S>) -> Vec<String> {
    app.list().iter().map(|t| t.title().to_string()).collect()
}

fn open_sqlite(dir: &TempDir) -> SqliteStorage {
    let storage =
        SqliteStorage::open(dir.path().join("data").join("todos.db")).expect("Failed to open db");
    storage.migrate().expect("Failed to run migrations");
    storage
}

speculate! {
    before {
        let storage = MemoryStorage::new();
    }

    describe "init" {
        it "starts empty when nothing is stored" {
            let app = TodoApp::init(&storage).expect("Failed to init");
            assert!(app.list().is_empty());
            assert_eq!(app.list().counter(), 0);
        }

        it "treats stored nulls as empty" {
            storage.set(ITEMS_KEY, serde_json::Value::Null).unwrap();
            storage.set(COUNTER_KEY, serde_json::Value::Null).unwrap();

            let app = TodoApp::init(&storage).expect("Failed to init");
            assert!(app.list().is_empty());
        }

        it "loads items stored by an earlier session" {
            storage.set(ITEMS_KEY, json!([
                { "title": "buy milk", "id": "todo-id-1", "done": true },
                { "title": "walk dog", "id": "todo-id-2", "done": false }
            ])).unwrap();
            storage.set(COUNTER_KEY, json!(2)).unwrap();

            let app = TodoApp::init(&storage).expect("Failed to init");
            assert_eq!(titles(&app), vec!["buy milk", "walk dog"]);
            assert_eq!(app.list().active_count(), 1);
        }

        it "mints fresh ids when the counter key is missing" {
            storage.set(ITEMS_KEY, json!([
                { "title": "a", "id": "todo-id-5", "done": false }
            ])).unwrap();

            let mut app = TodoApp::init(&storage).expect("Failed to init");
            let item = app.add("b").unwrap().unwrap();
            assert_eq!(item.id().as_str(), "todo-id-6");
        }

        it "reports unreadable items as corrupt" {
            storage.set(ITEMS_KEY, json!({ "not": "a list" })).unwrap();

            let result = TodoApp::init(&storage);
            assert!(matches!(result, Err(StorageError::Corrupt { ref key, .. }) if key == ITEMS_KEY));
        }

        it "reports duplicate ids as corrupt" {
            storage.set(ITEMS_KEY, json!([
                { "title": "a", "id": "todo-id-1", "done": false },
                { "title": "b", "id": "todo-id-1", "done": false }
            ])).unwrap();

            let result = TodoApp::init(&storage);
            assert!(matches!(result, Err(StorageError::Corrupt { ref key, .. }) if key == ITEMS_KEY));
        }

        it "reports an exhausted counter as corrupt" {
            storage.set(COUNTER_KEY, json!(u64::MAX)).unwrap();

            let result = TodoApp::init(&storage);
            assert!(matches!(result, Err(StorageError::Corrupt { ref key, .. }) if key == COUNTER_KEY));
        }

        it "reports a negative counter as corrupt" {
            storage.set(COUNTER_KEY, json!(-1)).unwrap();

            let result = TodoApp::init(&storage);
            assert!(matches!(result, Err(StorageError::Corrupt { ref key, .. }) if key == COUNTER_KEY));
        }
    }

    describe "add" {
        it "trims and persists the new item" {
            let mut app = TodoApp::init(&storage).unwrap();
            let item = app.add("  buy milk  ").unwrap().expect("item should be added");

            assert_eq!(item.title(), "buy milk");
            assert!(!item.is_done());
            assert_eq!(
                storage.get(ITEMS_KEY).unwrap(),
                Some(json!([{ "title": "buy milk", "id": "todo-id-1", "done": false }]))
            );
            assert_eq!(storage.get(COUNTER_KEY).unwrap(), Some(json!(1)));
        }

        it "ignores blank titles without writing" {
            let mut app = TodoApp::init(&storage).unwrap();

            assert!(app.add("").unwrap().is_none());
            assert!(app.add("   \t").unwrap().is_none());
            assert!(app.list().is_empty());
            assert!(storage.get(ITEMS_KEY).unwrap().is_none());
        }
    }

    describe "mutations" {
        it "persist after every call" {
            let mut app = TodoApp::init(&storage).unwrap();
            let milk = app.add("buy milk").unwrap().unwrap().id().clone();
            let dog = app.add("walk dog").unwrap().unwrap().id().clone();

            assert_eq!(app.toggle(&milk).unwrap(), Some(true));
            assert_eq!(TodoApp::init(&storage).unwrap().list(), app.list());

            assert!(app.edit(&dog, " walk the dog ").unwrap());
            assert_eq!(TodoApp::init(&storage).unwrap().list(), app.list());
            assert_eq!(app.list().get(&dog).unwrap().title(), "walk the dog");

            app.toggle_all(true).unwrap();
            assert_eq!(TodoApp::init(&storage).unwrap().list().active_count(), 0);

            app.toggle_all(false).unwrap();
            assert_eq!(TodoApp::init(&storage).unwrap().list().active_count(), 2);

            assert!(app.destroy(&milk).unwrap().is_some());
            assert_eq!(titles(&TodoApp::init(&storage).unwrap()), vec!["walk the dog"]);
        }

        it "clear_completed removes done items from storage" {
            let mut app = TodoApp::init(&storage).unwrap();
            let a = app.add("A").unwrap().unwrap().id().clone();
            app.add("B").unwrap();
            let c = app.add("C").unwrap().unwrap().id().clone();
            app.toggle(&a).unwrap();
            app.toggle(&c).unwrap();

            assert_eq!(app.clear_completed().unwrap(), 2);
            assert_eq!(titles(&TodoApp::init(&storage).unwrap()), vec!["B"]);
        }

        it "edit keeps a blank title rather than deleting" {
            let mut app = TodoApp::init(&storage).unwrap();
            let id = app.add("a").unwrap().unwrap().id().clone();

            assert!(app.edit(&id, "  ").unwrap());
            assert_eq!(app.list().len(), 1);
            assert_eq!(app.list().get(&id).unwrap().title(), "");
        }

        it "are non-fatal for unknown ids" {
            let mut app = TodoApp::init(&storage).unwrap();
            app.add("a").unwrap();
            let before = app.list().clone();
            let missing = TodoId::from("todo-id-99");

            assert_eq!(app.toggle(&missing).unwrap(), None);
            assert!(!app.edit(&missing, "x").unwrap());
            assert!(app.destroy(&missing).unwrap().is_none());
            assert_eq!(app.list(), &before);
        }

        it "do not reuse ids across sessions" {
            let mut app = TodoApp::init(&storage).unwrap();
            let first = app.add("a").unwrap().unwrap().id().clone();
            app.destroy(&first).unwrap();

            let mut app = TodoApp::init(&storage).unwrap();
            let second = app.add("b").unwrap().unwrap().id().clone();
            assert_ne!(first, second);
            assert_eq!(second.as_str(), "todo-id-2");
        }
    }

    describe "sqlite" {
        it "round-trips a session through a database file" {
            let dir = TempDir::new().unwrap();

            let expected = {
                let mut app = TodoApp::init(open_sqlite(&dir)).unwrap();
                let milk = app.add("buy milk").unwrap().unwrap().id().clone();
                app.add("walk dog").unwrap();
                app.add("call mum").unwrap();
                app.toggle(&milk).unwrap();
                app.list().clone()
            };

            let app = TodoApp::init(open_sqlite(&dir)).unwrap();
            assert_eq!(app.list(), &expected);
            assert_eq!(app.list().counter(), 3);
        }

        it "survives add complete and clear across a reload" {
            let dir = TempDir::new().unwrap();

            {
                let mut app = TodoApp::init(open_sqlite(&dir)).unwrap();
                let milk = app.add("buy milk").unwrap().unwrap().id().clone();
                app.add("walk dog").unwrap();
                app.toggle(&milk).unwrap();
                assert_eq!(app.list().active_count(), 1);
                app.clear_completed().unwrap();
            }

            let app = TodoApp::init(open_sqlite(&dir)).unwrap();
            assert_eq!(titles(&app), vec!["walk dog"]);
        }

        it "works against an in-memory database" {
            let storage = SqliteStorage::open_memory().unwrap();
            storage.migrate().unwrap();

            let mut app = TodoApp::init(storage.clone()).unwrap();
            app.add("a").unwrap();

            let reloaded = TodoApp::init(storage).unwrap();
            assert_eq!(titles(&reloaded), vec!["a"]);
        }
    }
}

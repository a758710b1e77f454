use taskboard_core::db::open_db_in_memory;
use taskboard_core::{
    seed_defaults, MemoryCollection, SeedData, SeedOutcome, SqliteCollection, Todo, TodoService,
    User, UserService,
};

#[test]
fn seed_creates_default_user_and_todo_once() {
    let conn = open_db_in_memory().unwrap();
    let users = UserService::new(SqliteCollection::<User>::new(&conn));
    let service = TodoService::new(SqliteCollection::<Todo>::new(&conn), users);
    let seed = SeedData::default();

    let outcome = seed_defaults(&service, &seed).unwrap();
    let SeedOutcome::Seeded { user_id, todo_id } = outcome else {
        panic!("first run should seed, got {outcome:?}");
    };

    let frodo = service.users().get_by_email("frodo@theshire.me").unwrap();
    assert_eq!(frodo.id, user_id);
    assert_eq!(frodo.name, "Frodo Baggins");

    let todo = service.get_by_id(todo_id).unwrap();
    assert_eq!(todo.description, "Take the ring to Mordor");
    assert!(!todo.done);
    assert_eq!(todo.assignee_email, "frodo@theshire.me");

    assert_eq!(
        seed_defaults(&service, &seed).unwrap(),
        SeedOutcome::AlreadyPresent
    );
    assert_eq!(service.users().list_all().unwrap().len(), 1);
    assert_eq!(
        service
            .list_by_assignee_email("frodo@theshire.me")
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn seed_is_skipped_when_the_email_already_exists() {
    let users = UserService::new(MemoryCollection::<User>::new());
    let todos = MemoryCollection::<Todo>::new();
    let service = TodoService::new(todos.clone(), users);
    service
        .users()
        .create("Someone Else", "frodo@theshire.me")
        .unwrap();

    let outcome = seed_defaults(&service, &SeedData::default()).unwrap();
    assert_eq!(outcome, SeedOutcome::AlreadyPresent);
    assert!(todos.is_empty().unwrap());
}

#[test]
fn custom_seed_data_is_used() {
    let users = UserService::new(MemoryCollection::<User>::new());
    let service = TodoService::new(MemoryCollection::<Todo>::new(), users);
    let seed = SeedData {
        user_name: "Sam".to_string(),
        user_email: "sam@theshire.me".to_string(),
        todo_description: "Carry Frodo".to_string(),
    };

    seed_defaults(&service, &seed).unwrap();

    let todos = service.list_by_assignee_email("sam@theshire.me").unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].assignee_name, "Sam");
    assert_eq!(todos[0].description, "Carry Frodo");
}

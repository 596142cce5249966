// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use servicedesk_domain::{DirectoryUser, Role};

fn user(user_id: &str, display_name: &str, role: Role) -> DirectoryUser {
    DirectoryUser {
        user_id: user_id.to_string(),
        display_name: display_name.to_string(),
        email: format!("{user_id}@example.com"),
        role,
        is_active: true,
    }
}

#[test]
fn test_upsert_inserts_then_replaces() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_directory_user(&user("sam", "Sam Staff", Role::SupportStaff))
        .unwrap();

    let mut promoted = user("sam", "Sam Manager", Role::SupportManager);
    promoted.is_active = false;
    persistence.upsert_directory_user(&promoted).unwrap();

    assert_eq!(persistence.find_directory_user("sam").unwrap(), Some(promoted));
    assert_eq!(persistence.list_directory_users().unwrap().len(), 1);
}

#[test]
fn test_unknown_user_is_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.find_directory_user("ghost").unwrap(), None);
}

#[test]
fn test_users_are_listed_by_display_name() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_directory_user(&user("z1", "Alex", Role::Admin))
        .unwrap();
    persistence
        .upsert_directory_user(&user("a1", "Zoe", Role::EndUser))
        .unwrap();

    let names: Vec<String> = persistence
        .list_directory_users()
        .unwrap()
        .into_iter()
        .map(|u| u.display_name)
        .collect();
    assert_eq!(names, vec![String::from("Alex"), String::from("Zoe")]);
}

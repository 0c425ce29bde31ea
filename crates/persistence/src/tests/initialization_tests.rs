// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::create_test_employee;

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    first
        .insert_employee(&create_test_employee(1, "P1", "Finance", "1000000"))
        .unwrap();

    assert_eq!(first.list_employees().unwrap().len(), 1);
    assert!(second.list_employees().unwrap().is_empty());
}

#[test]
fn test_new_store_is_empty() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.list_employees().unwrap().is_empty());
    assert!(persistence.list_bands().unwrap().is_empty());
    assert!(persistence.list_scenarios().unwrap().is_empty());
    assert!(persistence.get_audit_timeline(None).unwrap().is_empty());
}

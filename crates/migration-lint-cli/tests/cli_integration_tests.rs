//! End-to-end tests of the migration-lint binary.

mod common;

use common::{TestFixture, CLEAN, WARN_ONLY};
use predicates::prelude::*;

#[test]
fn misnamed_file_with_unprefixed_table_fails() {
    let fixture = TestFixture::new();
    fixture.create_migration("bad.sql", "CREATE TABLE users (id uuid);");

    migration_lint!(fixture)
        .args(["migrations", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "bad.sql: [ERROR] Filename should match YYYYMMDDHHMMSS_description.sql\n\
             bad.sql:1: [ERROR] Tables must use tb_ prefix (CREATE TABLE users)\n\
             \n\
             1 file(s) checked: 2 error(s), 0 warning(s)",
        ));
}

#[test]
fn warnings_only_fail_in_strict_mode() {
    let fixture = TestFixture::new();
    fixture.create_migration("20250101000000_ok.sql", WARN_ONLY);

    migration_lint!(fixture)
        .arg("migrations")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "20250101000000_ok.sql: [WARNING] Consider adding COMMENT ON TABLE",
        ))
        .stdout(predicate::str::contains(
            "1 file(s) checked: 0 error(s), 1 warning(s)",
        ));

    migration_lint!(fixture)
        .args(["check", "migrations", "--strict"])
        .assert()
        .code(1);
}

#[test]
fn quiet_hides_warnings_from_report_and_exit_code() {
    let fixture = TestFixture::new();
    fixture.create_migration("20250101000000_ok.sql", WARN_ONLY);

    migration_lint!(fixture)
        .args(["migrations", "--strict", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING").not())
        .stdout(predicate::str::contains(
            "1 file(s) checked: 0 error(s), 0 warning(s)",
        ));
}

#[test]
fn empty_directory_succeeds_with_note() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .args(["migrations", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No SQL files found in migrations"));
}

#[test]
fn empty_directory_json_is_an_empty_array() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .args(["migrations", "--json"])
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("No SQL files found"));
}

#[test]
fn missing_path_is_fatal() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .arg("nowhere")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Error: nowhere not found"));
}

#[test]
fn default_path_is_supabase_migrations() {
    let fixture = TestFixture::new();
    fixture.create_file("supabase/migrations/20250101000000_init.sql", CLEAN);

    migration_lint!(fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 file(s) checked: 0 error(s), 0 warning(s)",
        ));
}

#[test]
fn json_report_lists_every_finding() {
    let fixture = TestFixture::new();
    fixture.create_migration("bad.sql", "CREATE TABLE users (id uuid);");

    let output = migration_lint!(fixture)
        .args(["migrations", "--json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let findings: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let findings = findings.as_array().unwrap();
    assert_eq!(findings.len(), 4);
    assert_eq!(findings[0]["line"], 0);
    assert!(findings[0].get("match").is_none());
    assert_eq!(findings[1]["line"], 1);
    assert_eq!(findings[1]["severity"], "error");
    assert_eq!(findings[1]["match"], "CREATE TABLE users");
    assert_eq!(findings[2]["severity"], "warning");
}

#[test]
fn sequential_and_parallel_reports_match() {
    let fixture = TestFixture::new();
    for i in 0..8 {
        fixture.create_migration(
            &format!("2025010100000{i}_m.sql"),
            &format!("CREATE TABLE t{i} (id int);\nINSERT INTO t{i} VALUES (1);"),
        );
    }

    let parallel = migration_lint!(fixture).arg("migrations").output().unwrap();
    let sequential = migration_lint!(fixture)
        .args(["migrations", "--sequential"])
        .output()
        .unwrap();
    assert_eq!(parallel.stdout, sequential.stdout);
    assert_eq!(parallel.status.code(), Some(1));
}

#[test]
fn project_config_disables_and_regrades_rules() {
    let fixture = TestFixture::new();
    fixture.create_migration(
        "20250101000000_seed.sql",
        "BEGIN;\nINSERT INTO tb_users VALUES (1);\nCOMMIT;",
    );

    migration_lint!(fixture)
        .arg("migrations")
        .assert()
        .success();

    fixture.create_file(
        "migration-lint.toml",
        "[rules.insert-in-migration]\nseverity = \"error\"\n",
    );
    migration_lint!(fixture)
        .arg("migrations")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[ERROR] INSERT statements should be in seed files, not migrations",
        ));

    fixture.create_file("migration-lint.toml", "[rules.MIG103]\nenabled = false\n");
    migration_lint!(fixture)
        .args(["migrations", "--strict"])
        .assert()
        .success();
}

#[test]
fn invalid_config_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_file("custom.toml", "[linter\n");
    fixture.create_migration("20250101000000_init.sql", CLEAN);

    migration_lint!(fixture)
        .args(["migrations", "-c", "custom.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to load config"));
}

#[test]
fn list_rules_prints_catalog_in_order() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)MIG001\s+table-prefix.*MIG011\s+search-path.*MIG103\s+insert-in-migration").unwrap());
}

#[test]
fn init_writes_config_once() {
    let fixture = TestFixture::new();

    migration_lint!(fixture).arg("init").assert().success();
    assert!(fixture.path().join("migration-lint.toml").exists());

    migration_lint!(fixture)
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    migration_lint!(fixture)
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn new_dry_run_prints_without_writing() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .args(["new", "add_orders_table", "--dry-run", "-d", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Would create: out"))
        .stdout(predicate::str::contains("_add_orders_table.sql"))
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS tb_orders ("));
    assert!(!fixture.path().join("out").exists());
}

#[test]
fn new_migration_lints_clean() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .args(["new", "add_total_fn", "-t", "function", "-d", "migrations", "-a", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Created: "));

    migration_lint!(fixture)
        .args(["migrations", "--strict"])
        .assert()
        .success();
}

#[test]
fn new_rejects_invalid_description() {
    let fixture = TestFixture::new();

    migration_lint!(fixture)
        .args(["new", "add users"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid description"));
}

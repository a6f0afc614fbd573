//! Golden tests for the built-in plans
//!
//! These run each built-in plan against a copy of `tests/fixtures/vgreen`
//! and check:
//! - the exact text of rewritten files
//! - per-file outcomes (updated / unchanged / missing) in plan order
//! - that a second run changes nothing

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Fresh, writable copy of the two Angular projects
fn workspace() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    copy_dir(&fixtures_dir().join("vgreen"), temp.path());
    temp
}

fn apply(root: &Path, plan: &str) -> Vec<Value> {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("resub"))
        .arg("--root")
        .arg(root)
        .arg("--format")
        .arg("jsonl")
        .arg("apply")
        .arg(plan)
        .output()
        .expect("failed to execute");
    assert!(output.status.success(), "apply {} failed", plan);

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn outcomes(items: &[Value]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|v| {
            (
                v["path"].as_str().unwrap_or_default().to_string(),
                v["kind"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

/// layout.ts after `admin-components`
const LAYOUT_MIGRATED: &str = "\
import { Component } from '@angular/core';
import { Router } from '@angular/router';
import { HttpClient } from '@angular/common/http';
import { environment } from '../../environments/environment';

@Component({
  selector: 'app-layout',
  templateUrl: './layout.html',
})
export class Layout {
  constructor(private http: HttpClient, private router: Router) {}

  openNotification(notification: any): void {
    this.http.get<any>(`${environment.apiUrl}/orders/${notification.orderId}`).subscribe();
  }

  loadOrders(): void {
    this.http.get<any>(`${environment.apiUrl}/orders`).subscribe();
  }
}
";

#[test]
fn golden_pagination_calls() {
    let ws = workspace();
    let items = apply(ws.path(), "pagination-calls");

    assert_eq!(
        outcomes(&items),
        vec![
            (
                "my-user/src/app/product/product-list/product-list.ts".to_string(),
                "updated".to_string()
            ),
            (
                "my-user/src/app/product/product-detail/product-detail.ts".to_string(),
                "error".to_string()
            ),
            ("my-user/src/app/home/home.ts".to_string(), "updated".to_string()),
            ("my-user/src/app/header/header.ts".to_string(), "unchanged".to_string()),
            (
                "my-user/src/app/account/wishlist/wishlist.ts".to_string(),
                "updated".to_string()
            ),
        ]
    );
    assert_eq!(items[0]["meta"]["replacements"], 2);
    assert_eq!(items[1]["errors"][0]["code"], "NOT_FOUND");

    // Only the call changes
    let original = read(&fixtures_dir().join("vgreen"), "my-user/src/app/home/home.ts");
    let updated = read(ws.path(), "my-user/src/app/home/home.ts");
    assert_eq!(
        updated,
        original.replace("getAllProducts()", "getAllProductsNoPagination()")
    );
    assert!(!updated.contains("getAllProducts()"));

    // Untargeted file stays byte-identical
    assert_eq!(
        fs::read(ws.path().join("my-user/src/app/header/header.ts")).unwrap(),
        fs::read(fixtures_dir().join("vgreen/my-user/src/app/header/header.ts")).unwrap()
    );
}

#[test]
fn golden_admin_components_layout() {
    let ws = workspace();
    let items = apply(ws.path(), "admin-components");

    let kinds: Vec<(String, String)> = outcomes(&items);
    assert_eq!(kinds.len(), 7);
    assert_eq!(kinds[1].1, "updated"); // orderdetail
    assert_eq!(kinds[2].1, "updated"); // layout
    assert_eq!(kinds[6].1, "unchanged"); // blog, already migrated
    assert_eq!(
        kinds.iter().filter(|(_, k)| k == "error").count(),
        4,
        "four component files are absent from the fixture"
    );

    assert_eq!(items[2]["meta"]["replacements"], 2);
    assert_eq!(items[2]["meta"]["import_inserted"], true);

    assert_eq!(
        read(ws.path(), "my-admin/src/app/layout/layout.ts"),
        LAYOUT_MIGRATED
    );
}

#[test]
fn golden_admin_components_crlf_layout() {
    let ws = workspace();
    let layout = ws.path().join("my-admin/src/app/layout/layout.ts");
    let crlf = fs::read_to_string(&layout).unwrap().replace('\n', "\r\n");
    fs::write(&layout, crlf).unwrap();

    let items = apply(ws.path(), "admin-components");
    assert_eq!(items[2]["kind"], "updated");
    assert_eq!(items[2]["meta"]["import_inserted"], true);

    let migrated = read(ws.path(), "my-admin/src/app/layout/layout.ts");
    assert_eq!(migrated, LAYOUT_MIGRATED.replace('\n', "\r\n"));
    assert!(!migrated.replace("\r\n", "").contains('\n'));

    let again = apply(ws.path(), "admin-components");
    assert_eq!(again[2]["kind"], "unchanged");
}

#[test]
fn golden_admin_components_does_not_duplicate_import() {
    let ws = workspace();
    apply(ws.path(), "admin-components");

    let blog = read(ws.path(), "my-admin/src/app/blogmanage/blog.ts");
    assert_eq!(
        blog.matches("import { environment } from '../../environments/environment';")
            .count(),
        1
    );
}

#[test]
fn golden_admin_services() {
    let ws = workspace();
    let items = apply(ws.path(), "admin-services");

    assert!(items.iter().all(|v| v["kind"] == "updated"));
    assert!(items.iter().all(|v| v["meta"]["import_inserted"] == true));

    let auth = read(ws.path(), "my-admin/src/app/services/auth.service.ts");
    assert!(auth.contains(
        "import { map, catchError, timeout } from 'rxjs/operators';\nimport { environment } from '../../environments/environment';\n"
    ));
    assert!(auth.contains("private baseUrl = environment.apiUrl;"));
    assert!(!auth.contains("localhost"));

    let api = read(ws.path(), "my-admin/src/app/services/api.service.ts");
    assert!(api.contains("private baseUrl = environment.apiUrl;\n"));
    assert!(!api.contains("Thay đổi"));

    let notifications = read(ws.path(), "my-admin/src/app/services/notification.service.ts");
    assert!(notifications.contains("private apiUrl = `${environment.apiUrl}/notifications`;"));
}

#[test]
fn golden_second_run_changes_nothing() {
    let ws = workspace();

    for plan in ["pagination-calls", "admin-components", "admin-services"] {
        apply(ws.path(), plan);
        let again = apply(ws.path(), plan);
        assert!(
            again.iter().all(|v| v["kind"] == "unchanged" || v["kind"] == "error"),
            "{} was not idempotent",
            plan
        );
    }
}
